/*!
 * Batch translation engine.
 *
 * A batch is one list of requests run under one deadline. A fixed pool of
 * worker tasks pulls requests from a shared bounded queue, calls the
 * provider and sends exactly one response per pulled request back to the
 * collector, which runs in the caller's task. Cancellation is a shared flag:
 * once set, workers stop pulling new requests while calls already in flight
 * finish normally. Under `AbortOnFirstFailure` the worker that received the
 * failure sets the flag itself, before handing the response over.
 */

use futures::FutureExt;
use log::{debug, error, info};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinSet;

use crate::app_config::{FailurePolicy, TranslationConfig};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::TranslationProvider;

use super::model::{TranslationRequest, TranslationResponse};
use super::progress::ProgressSink;

/// Settings for one batch run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchOptions {
    /// Number of workers; 0 is treated as 1
    pub concurrency: usize,
    /// Deadline for the whole batch
    pub timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from(&TranslationConfig::default())
    }
}

impl From<&TranslationConfig> for BatchOptions {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            timeout: config.timeout(),
            failure_policy: config.failure_policy,
        }
    }
}

/// Everything a batch produced before it ended
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Responses in completion order
    pub responses: Vec<TranslationResponse>,
    /// Set when the batch cannot be trusted to be complete
    pub error: Option<TranslationError>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.responses.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.responses.len() - self.succeeded()
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// One-shot cancellation flag shared by the workers of a batch
#[derive(Debug)]
pub struct Cancellation {
    tx: watch::Sender<bool>,
}

impl Cancellation {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Set the flag; returns true only for the call that actually set it
    pub fn cancel(&self) -> bool {
        self.tx.send_if_modified(|cancelled| {
            if *cancelled {
                false
            } else {
                *cancelled = true;
                true
            }
        })
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves once the flag is set
async fn wait_cancelled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
        // Sender gone: the batch itself was dropped.
        std::future::pending::<()>().await;
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "provider panicked".to_string())
}

/// Runs batches against one provider
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    provider: Arc<dyn TranslationProvider>,
    options: BatchOptions,
}

impl BatchTranslator {
    pub fn new(provider: Arc<dyn TranslationProvider>, options: BatchOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    pub fn provider(&self) -> &Arc<dyn TranslationProvider> {
        &self.provider
    }

    /// Translate every request, or as many as the policies allow
    ///
    /// The returned error is set when the batch was aborted by a failed
    /// response (`AbortOnFirstFailure` only), when the deadline elapsed, or
    /// when fewer responses than requests came back for any other reason.
    /// An abort takes precedence over a timeout.
    pub async fn translate_batch(
        &self,
        requests: Vec<TranslationRequest>,
        progress: Option<&dyn ProgressSink>,
    ) -> BatchOutcome {
        let total = requests.len();
        if total == 0 {
            return BatchOutcome::default();
        }

        let start_time = Instant::now();
        let workers = self.options.concurrency.max(1).min(total);
        let buffer = (workers * 2).min(total);

        let (request_tx, request_rx) = mpsc::channel::<TranslationRequest>(buffer);
        let (response_tx, mut response_rx) = mpsc::channel::<TranslationResponse>(buffer);
        let queue = Arc::new(Mutex::new(request_rx));
        let cancellation = Arc::new(Cancellation::new());
        let abort_on_failure = self.options.failure_policy == FailurePolicy::AbortOnFirstFailure;

        debug!(
            "Starting batch of {} requests with {} workers via {}",
            total,
            workers,
            self.provider.name()
        );

        let mut tasks = JoinSet::new();
        for worker_id in 0..workers {
            tasks.spawn(run_worker(
                worker_id,
                Arc::clone(&self.provider),
                Arc::clone(&queue),
                response_tx.clone(),
                Arc::clone(&cancellation),
                abort_on_failure,
            ));
        }
        drop(queue);
        drop(response_tx);

        let mut collector = Collector {
            responses: Vec::with_capacity(total),
            first_failure: None,
            total,
            abort_on_failure,
            cancellation: &cancellation,
            progress,
        };

        let mut producer_cancelled = cancellation.subscribe();
        let producer = async move {
            for request in requests {
                tokio::select! {
                    biased;
                    _ = wait_cancelled(&mut producer_cancelled) => break,
                    sent = request_tx.send(request) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
        };

        let collect = async {
            while let Some(response) = response_rx.recv().await {
                collector.record(response);
            }
        };

        let timed_out = tokio::time::timeout(self.options.timeout, async {
            tokio::join!(producer, collect);
        })
        .await
        .is_err();

        if timed_out {
            cancellation.cancel();
            tasks.abort_all();
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                if e.is_panic() {
                    error!("Translation worker panicked: {}", e);
                }
            }
        }

        if timed_out {
            // Every worker has stopped; keep what finished before the deadline.
            while let Ok(response) = response_rx.try_recv() {
                collector.record(response);
            }
        }

        let Collector {
            responses,
            first_failure,
            ..
        } = collector;
        let completed = responses.len();

        let error = first_failure
            .or_else(|| {
                timed_out.then(|| TranslationError::TimedOut {
                    completed,
                    total,
                    timeout: self.options.timeout,
                })
            })
            .or_else(|| (completed < total).then(|| TranslationError::Incomplete { completed, total }));

        let outcome = BatchOutcome { responses, error };
        info!(
            "Batch finished in {:?}: {} of {} requests succeeded, {} failed{}",
            start_time.elapsed(),
            outcome.succeeded(),
            total,
            outcome.failed(),
            if outcome.is_complete() { "" } else { " (incomplete)" }
        );
        outcome
    }
}

/// Response bookkeeping for one batch
struct Collector<'a> {
    responses: Vec<TranslationResponse>,
    first_failure: Option<TranslationError>,
    total: usize,
    abort_on_failure: bool,
    cancellation: &'a Cancellation,
    progress: Option<&'a dyn ProgressSink>,
}

impl Collector<'_> {
    fn record(&mut self, response: TranslationResponse) {
        if self.abort_on_failure && self.first_failure.is_none() {
            if let Err(e) = &response.outcome {
                self.first_failure = Some(TranslationError::BatchAborted {
                    key: response.key.clone(),
                    target_language: response.target_language.clone(),
                    source: e.clone(),
                });
                self.cancellation.cancel();
            }
        }

        self.responses.push(response);
        if let (Some(progress), Some(last)) = (self.progress, self.responses.last()) {
            progress.on_response(self.responses.len(), self.total, last);
        }
    }
}

async fn run_worker(
    worker_id: usize,
    provider: Arc<dyn TranslationProvider>,
    queue: Arc<Mutex<mpsc::Receiver<TranslationRequest>>>,
    responses: mpsc::Sender<TranslationResponse>,
    cancellation: Arc<Cancellation>,
    abort_on_failure: bool,
) {
    let mut cancelled = cancellation.subscribe();
    loop {
        if cancellation.is_cancelled() {
            break;
        }

        let next = tokio::select! {
            biased;
            _ = wait_cancelled(&mut cancelled) => None,
            request = async { queue.lock().await.recv().await } => request,
        };
        let Some(request) = next else {
            break;
        };
        if cancellation.is_cancelled() {
            break;
        }

        debug!(
            "Worker {} translating '{}' to {}",
            worker_id, request.key, request.target_language
        );

        let outcome = match AssertUnwindSafe(provider.translate(&request))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(panic) => Err(ProviderError::Internal(panic_message(&*panic))),
        };

        let response = match outcome {
            Ok(text) => TranslationResponse::success(&request, text),
            Err(e) => {
                if abort_on_failure && cancellation.cancel() {
                    debug!(
                        "Worker {} cancelling batch after failure on '{}' ({})",
                        worker_id, request.key, request.target_language
                    );
                }
                TranslationResponse::failure(&request, e)
            }
        };

        if responses.send(response).await.is_err() {
            break;
        }
    }
}
