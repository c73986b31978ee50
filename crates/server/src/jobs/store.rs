use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use lru::LruCache;
use tracing::debug;
use uuid::Uuid;

use super::types::{CancelOutcome, Job, JobCounts, JobState, Outcome};

/// Bounded in-memory job records.
///
/// Least recently touched records are evicted once `capacity` is reached;
/// an evicted ID then reads as unknown. Reads count as touches.
pub struct JobStore {
    jobs: Mutex<LruCache<Uuid, Job>>,
    /// Parses completed since startup, including evicted ones.
    processed: AtomicU64,
}

impl JobStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            jobs: Mutex::new(LruCache::new(capacity)),
            processed: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<Uuid, Job>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, job: Job) {
        let id = job.id;
        if let Some((evicted, old)) = self.lock().push(id, job) {
            if evicted != id {
                debug!(job_id = %evicted, state = ?old.state, "Evicted job record");
            }
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<Job> {
        self.lock().get(id).cloned()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn counts(&self) -> JobCounts {
        let mut counts = JobCounts::default();
        for (_, job) in self.lock().iter() {
            counts.add(job.state);
        }
        counts
    }

    /// `Queued -> Running`. False when the job was cancelled or evicted first.
    pub fn mark_running(&self, id: &Uuid) -> bool {
        match self.lock().get_mut(id) {
            Some(job) if job.state == JobState::Queued => {
                job.state = JobState::Running;
                job.started_at = Some(Utc::now());
                true
            }
            _ => false,
        }
    }

    /// Record a terminal outcome unless the job already has one.
    ///
    /// Returns the state the record ends up in, or `None` if it was evicted.
    pub fn finish(&self, id: &Uuid, outcome: Outcome) -> Option<JobState> {
        let mut jobs = self.lock();
        let job = jobs.get_mut(id)?;
        if !job.state.is_finished() {
            if matches!(outcome, Outcome::Completed(_)) {
                self.processed.fetch_add(1, Ordering::Relaxed);
            }
            job.finish(outcome);
        }
        Some(job.state)
    }

    pub fn cancel(&self, id: &Uuid) -> CancelOutcome {
        match self.lock().get_mut(id) {
            None => CancelOutcome::NotFound,
            Some(job) if job.state.is_finished() => CancelOutcome::AlreadyFinished(job.state),
            Some(job) => {
                job.finish(Outcome::Cancelled);
                CancelOutcome::Cancelled
            }
        }
    }
}
