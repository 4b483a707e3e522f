/*!
 * Tests for progress reporting
 */

use indicatif::{MultiProgress, ProgressDrawTarget};
use parking_lot::Mutex;
use std::sync::Arc;

use xcstrings_translator::translation::{
    LogProgressFactory, ProgressBars, ProgressReporterFactory, ProgressSink, TranslationRequest,
    TranslationResponse,
};

/// Factory that records which reporters were requested
#[derive(Default)]
struct RecordingFactory {
    requested: Arc<Mutex<Vec<(String, usize)>>>,
}

impl ProgressReporterFactory for RecordingFactory {
    fn reporter(&self, language: &str, total: usize) -> Box<dyn ProgressSink> {
        self.requested.lock().push((language.to_string(), total));
        Box::new(|_: usize, _: usize, _: &TranslationResponse| {})
    }
}

fn response(language: &str) -> TranslationResponse {
    TranslationResponse::success(&TranslationRequest::new("k", "Hi", "en", language), "x")
}

#[test]
fn test_recordingFactory_shouldRecordLanguageAndTotal() {
    let factory = RecordingFactory::default();
    let sink = factory.reporter("ko", 4);
    sink.on_response(1, 4, &response("ko"));
    assert_eq!(*factory.requested.lock(), vec![("ko".to_string(), 4)]);
}

#[test]
fn test_logProgressFactory_shouldAcceptEveryResponse() {
    crate::common::init_logging();
    let sink = LogProgressFactory.reporter("fr", 3);
    for completed in 1..=3 {
        sink.on_response(completed, 3, &response("fr"));
    }
}

#[test]
fn test_progressBars_withHiddenTarget_shouldCreateOneBarPerLanguage() {
    let bars = ProgressBars::with_multi_progress(MultiProgress::with_draw_target(
        ProgressDrawTarget::hidden(),
    ));

    let fr = bars.reporter("fr", 2);
    let de = bars.reporter("de", 1);
    fr.on_response(1, 2, &response("fr"));
    de.on_response(1, 1, &response("de"));
    fr.on_response(2, 2, &response("fr"));
}

#[test]
fn test_progressBars_drivenByBatch_shouldNotDisturbOutcome() {
    use std::time::Duration;
    use xcstrings_translator::app_config::FailurePolicy;
    use xcstrings_translator::providers::MockProvider;

    let bars = ProgressBars::with_multi_progress(MultiProgress::with_draw_target(
        ProgressDrawTarget::hidden(),
    ));
    let translator = crate::common::translator(
        MockProvider::working(),
        4,
        Duration::from_secs(10),
        FailurePolicy::AbortOnFirstFailure,
    );

    let outcome = tokio_test::block_on(async {
        let sink = bars.reporter("fr", 10);
        translator
            .translate_batch(crate::common::requests(10, "fr"), Some(sink.as_ref()))
            .await
    });

    assert!(outcome.is_complete());
    assert_eq!(outcome.responses.len(), 10);
}
