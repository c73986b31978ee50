use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key).as_deref() {
        Some("true") | Some("1") | Some("yes") => true,
        Some("false") | Some("0") | Some("no") => false,
        _ => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub jobs: JobsConfig,
    pub parser: ParserConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PDPARSE_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PDPARSE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            jobs: JobsConfig::from_env_profiled(p),
            parser: ParserConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:  {}:{}, max_upload={}MB", self.server.host, self.server.port, self.server.max_upload_mb);
        tracing::info!(
            "  jobs:    workers={}, capacity={}, timeout={}s, background_default={}",
            self.jobs.workers,
            self.jobs.store_capacity,
            self.jobs.timeout_secs,
            self.jobs.background_by_default
        );
        tracing::info!("  parser:  university={}", self.parser.university);
    }

    /// Return a view safe for API responses.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": { "host": self.server.host, "port": self.server.port },
            "jobs": {
                "workers": self.jobs.workers,
                "store_capacity": self.jobs.store_capacity,
                "timeout_secs": self.jobs.timeout_secs,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: String::new(),
            server: ServerConfig::default(),
            jobs: JobsConfig::default(),
            parser: ParserConfig::default(),
        }
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub max_upload_mb: usize,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 8000),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            max_upload_mb: profiled_env_usize(p, "MAX_UPLOAD_MB", 50),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origin: "*".to_string(),
            max_upload_mb: 50,
        }
    }
}

// ── Background jobs ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Number of parses allowed to run at once.
    pub workers: usize,
    /// Maximum job records kept; least recently used are evicted.
    pub store_capacity: usize,
    pub timeout_secs: u64,
    /// Whether `POST /api/parse-pdf` queues work when the caller does not say.
    pub background_by_default: bool,
}

impl JobsConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            workers: profiled_env_usize(p, "PARSE_WORKERS", 4).max(1),
            store_capacity: profiled_env_usize(p, "JOB_STORE_CAPACITY", 256).max(1),
            timeout_secs: profiled_env_u64(p, "PARSE_TIMEOUT_SECS", 120),
            background_by_default: profiled_env_bool(p, "PARSE_BACKGROUND_DEFAULT", true),
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            store_capacity: 256,
            timeout_secs: 120,
            background_by_default: true,
        }
    }
}

// ── Parser ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Institution name used for the defaulted university / awarding body fields.
    pub university: String,
}

impl ParserConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            university: profiled_env_or(p, "UNIVERSITY_NAME", crate::document::DEFAULT_UNIVERSITY),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            university: crate::document::DEFAULT_UNIVERSITY.to_string(),
        }
    }
}
