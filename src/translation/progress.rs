/*!
 * Progress reporting for batch runs.
 *
 * A [`ProgressSink`] is told about every collected response. The
 * orchestrator asks a [`ProgressReporterFactory`] for a fresh sink per
 * target language, so each language gets its own counter.
 */

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{info, warn};
use parking_lot::Mutex;

use super::model::TranslationResponse;

/// Receives one call per collected response
pub trait ProgressSink: Send + Sync {
    /// `completed` counts responses collected so far, this one included
    fn on_response(&self, completed: usize, total: usize, response: &TranslationResponse);
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize, &TranslationResponse) + Send + Sync,
{
    fn on_response(&self, completed: usize, total: usize, response: &TranslationResponse) {
        self(completed, total, response)
    }
}

/// Builds the sink used for one language's batch
pub trait ProgressReporterFactory: Send + Sync {
    fn reporter(&self, language: &str, total: usize) -> Box<dyn ProgressSink>;
}

/// Logs progress at every 10% step
#[derive(Debug)]
pub struct LogProgress {
    language: String,
    last_step: Mutex<usize>,
}

impl LogProgress {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            last_step: Mutex::new(0),
        }
    }
}

impl ProgressSink for LogProgress {
    fn on_response(&self, completed: usize, total: usize, response: &TranslationResponse) {
        if let Some(e) = response.error() {
            warn!("[{}] '{}' failed: {}", self.language, response.key, e);
        }
        if total == 0 {
            return;
        }

        let step = completed * 10 / total;
        let mut last_step = self.last_step.lock();
        if step > *last_step || completed == total {
            *last_step = step;
            info!(
                "[{}] {}/{} strings translated ({}%)",
                self.language,
                completed,
                total,
                completed * 100 / total
            );
        }
    }
}

/// Factory for [`LogProgress`] sinks
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressFactory;

impl ProgressReporterFactory for LogProgressFactory {
    fn reporter(&self, language: &str, _total: usize) -> Box<dyn ProgressSink> {
        Box::new(LogProgress::new(language))
    }
}

/// Terminal progress bars, one per language
#[derive(Debug, Clone, Default)]
pub struct ProgressBars {
    multi_progress: MultiProgress,
}

impl ProgressBars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_multi_progress(multi_progress: MultiProgress) -> Self {
        Self { multi_progress }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} strings ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }
}

/// Sink driving one progress bar
#[derive(Debug)]
pub struct BarProgress {
    bar: ProgressBar,
}

impl ProgressSink for BarProgress {
    fn on_response(&self, completed: usize, total: usize, _response: &TranslationResponse) {
        self.bar.set_position(completed as u64);
        if completed >= total {
            self.bar.finish_and_clear();
        }
    }
}

impl ProgressReporterFactory for ProgressBars {
    fn reporter(&self, language: &str, total: usize) -> Box<dyn ProgressSink> {
        let bar = self.multi_progress.add(ProgressBar::new(total as u64));
        bar.set_style(Self::style());
        bar.set_message(format!("Translating to {}", language));
        Box::new(BarProgress { bar })
    }
}
