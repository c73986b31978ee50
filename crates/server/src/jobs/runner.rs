//! Worker pool for CPU-bound PDF parses.
//!
//! Each job waits for a semaphore permit, then parses on the blocking thread
//! pool. While waiting or running it races a per-job cancel signal and the
//! configured time limit. A cancelled or timed-out parse keeps its permit
//! until the blocking call returns, so at most `workers` parses ever run.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use pdparse_core::config::{JobsConfig, ParserConfig};
use pdparse_core::ParsedDocument;
use pdparse_extract::ExtractionError;
use tokio::sync::{Notify, Semaphore};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::store::JobStore;
use super::types::{CancelOutcome, Job, Outcome};

/// The blocking parse a job runs. `pdparse_extract::parse_pdf` outside tests.
pub type ParseFn =
    Arc<dyn Fn(&[u8], &str, &ParserConfig) -> Result<ParsedDocument, ExtractionError> + Send + Sync>;

pub struct ParsePool {
    pub(crate) permits: Arc<Semaphore>,
    timeout: Option<Duration>,
    parser: Arc<ParserConfig>,
    parse: ParseFn,
    jobs: Arc<JobStore>,
    cancels: Mutex<HashMap<Uuid, Arc<Notify>>>,
}

impl ParsePool {
    pub fn new(config: &JobsConfig, parser: ParserConfig, jobs: Arc<JobStore>) -> Self {
        // 0 disables the limit.
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Self::with_parse(config.workers, timeout, parser, jobs, Arc::new(pdparse_extract::parse_pdf))
    }

    pub fn with_parse(
        workers: usize,
        timeout: Option<Duration>,
        parser: ParserConfig,
        jobs: Arc<JobStore>,
        parse: ParseFn,
    ) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
            timeout,
            parser: Arc::new(parser),
            parse,
            jobs,
            cancels: Mutex::new(HashMap::new()),
        }
    }

    /// Queue a parse. The job is visible in the store before this returns.
    pub fn submit(self: &Arc<Self>, filename: String, bytes: Vec<u8>) -> (Uuid, JoinHandle<Outcome>) {
        let id = Uuid::new_v4();
        let cancel = Arc::new(Notify::new());
        self.jobs.insert(Job::queued(id, filename.clone()));
        self.cancel_signals().insert(id, cancel.clone());

        let pool = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let outcome = pool.run(id, filename, bytes, cancel).await;
            pool.cancel_signals().remove(&id);
            outcome
        });
        (id, handle)
    }

    /// Mark a queued or running job cancelled and wake its runner.
    pub fn cancel(&self, id: &Uuid) -> CancelOutcome {
        let outcome = self.jobs.cancel(id);
        if outcome == CancelOutcome::Cancelled {
            if let Some(signal) = self.cancel_signals().get(id) {
                // notify_one stores a permit, so a runner that is not yet
                // waiting still sees it.
                signal.notify_one();
            }
            info!(job_id = %id, "Parse cancelled");
        }
        outcome
    }

    fn cancel_signals(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Arc<Notify>>> {
        self.cancels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(&self, id: Uuid, filename: String, bytes: Vec<u8>, cancel: Arc<Notify>) -> Outcome {
        let permit = tokio::select! {
            biased;
            _ = cancel.notified() => return Outcome::Cancelled,
            permit = Arc::clone(&self.permits).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => return self.record(id, &filename, Outcome::Failed("Worker pool is shut down".to_string())),
            },
        };
        if !self.jobs.mark_running(&id) {
            return Outcome::Cancelled;
        }

        let parser = Arc::clone(&self.parser);
        let parse = Arc::clone(&self.parse);
        let name = filename.clone();
        let work = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            parse(&bytes, &name, &parser)
        });

        let outcome = tokio::select! {
            biased;
            _ = cancel.notified() => Outcome::Cancelled,
            finished = within(self.timeout, work) => match finished {
                None => Outcome::TimedOut,
                Some(Ok(Ok(doc))) => Outcome::Completed(doc),
                Some(Ok(Err(e))) => Outcome::Failed(e.to_string()),
                Some(Err(e)) => Outcome::Failed(format!("Parser crashed: {e}")),
            },
        };
        self.record(id, &filename, outcome)
    }

    fn record(&self, id: Uuid, filename: &str, outcome: Outcome) -> Outcome {
        match &outcome {
            Outcome::Completed(doc) => info!(
                job_id = %id,
                file = %filename,
                courses = doc.statistics.courses_found,
                errors = doc.parsing_errors.len(),
                "Parse completed"
            ),
            Outcome::Failed(reason) => error!(job_id = %id, file = %filename, %reason, "Parse failed"),
            Outcome::TimedOut => warn!(job_id = %id, file = %filename, "Parse timed out"),
            Outcome::Cancelled => {}
        }
        if self.jobs.finish(&id, outcome.clone()).is_none() {
            warn!(job_id = %id, "Job record evicted before completion");
        }
        outcome
    }
}

/// Await `fut`, giving up after `limit` when one is set.
pub(crate) async fn within<F: Future>(limit: Option<Duration>, fut: F) -> Option<F::Output> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut).await.ok(),
        None => Some(fut.await),
    }
}
