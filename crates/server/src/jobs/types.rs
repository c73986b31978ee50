//! Job records for PDF parses.

use chrono::{DateTime, Utc};
use pdparse_core::ParsedDocument;
use serde::Serialize;
use uuid::Uuid;

// ── Lifecycle ────────────────────────────────────────────────────────

/// Lifecycle of one parse job.
///
/// `Queued -> Running -> {Completed, Failed, TimedOut}`; `Cancelled` can be
/// reached from either non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
    TimedOut,
}

impl JobState {
    pub fn is_finished(self) -> bool {
        !matches!(self, JobState::Queued | JobState::Running)
    }

    /// Status string on the wire. Clients only distinguish "still working".
    pub fn wire_status(self) -> &'static str {
        match self {
            JobState::Queued | JobState::Running => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
            JobState::Cancelled => "cancelled",
            JobState::TimedOut => "timed_out",
        }
    }
}

// ── Outcome ──────────────────────────────────────────────────────────

/// How a job ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    Completed(ParsedDocument),
    Failed(String),
    Cancelled,
    TimedOut,
}

impl Outcome {
    pub fn state(&self) -> JobState {
        match self {
            Outcome::Completed(_) => JobState::Completed,
            Outcome::Failed(_) => JobState::Failed,
            Outcome::Cancelled => JobState::Cancelled,
            Outcome::TimedOut => JobState::TimedOut,
        }
    }
}

// ── Record ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    pub filename: String,
    pub state: JobState,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub result: Option<ParsedDocument>,
    pub error: Option<String>,
}

impl Job {
    pub fn queued(id: Uuid, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
            state: JobState::Queued,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            result: None,
            error: None,
        }
    }

    /// Apply a terminal outcome.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.state = outcome.state();
        self.finished_at = Some(Utc::now());
        match outcome {
            Outcome::Completed(doc) => self.result = Some(doc),
            Outcome::Failed(reason) => self.error = Some(reason),
            Outcome::Cancelled => self.error = Some("Cancelled by request".to_string()),
            Outcome::TimedOut => self.error = Some("Parsing exceeded the time limit".to_string()),
        }
    }
}

/// Jobs per state among the records still held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct JobCounts {
    pub queued: usize,
    pub running: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub timed_out: usize,
}

impl JobCounts {
    pub(crate) fn add(&mut self, state: JobState) {
        let slot = match state {
            JobState::Queued => &mut self.queued,
            JobState::Running => &mut self.running,
            JobState::Completed => &mut self.completed,
            JobState::Failed => &mut self.failed,
            JobState::Cancelled => &mut self.cancelled,
            JobState::TimedOut => &mut self.timed_out,
        };
        *slot += 1;
    }
}

/// Result of a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    AlreadyFinished(JobState),
    NotFound,
}
