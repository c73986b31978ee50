//! Shared application state.

use std::sync::Arc;

use pdparse_core::Config;

use crate::jobs::{JobStore, ParsePool};

pub struct AppState {
    pub config: Config,
    pub jobs: Arc<JobStore>,
    pub pool: Arc<ParsePool>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let jobs = Arc::new(JobStore::new(config.jobs.store_capacity));
        let pool = Arc::new(ParsePool::new(&config.jobs, config.parser.clone(), Arc::clone(&jobs)));
        Self { config, jobs, pool }
    }
}
