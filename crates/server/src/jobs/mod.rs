//! Parse jobs: bounded record store and the worker pool that fills it.

mod runner;
mod store;
mod types;


pub use runner::ParsePool;
pub use store::JobStore;
pub use types::{CancelOutcome, Job, JobCounts, JobState, Outcome};
