//! Centralized configuration for cpair.
//!
//! Constants for the wire format and worker channels, plus the small amount of
//! runtime configuration a worker picks up from its environment. Process
//! workers inherit the environment of their parent, so every node in a tree
//! runs with the same settings.

use crate::error::{CpairError, Result};

/// Line format shared by stdin, stdout and every worker channel.
pub struct WireConfig;

impl WireConfig {
    /// Digits after the decimal point, matching C's `%f`.
    pub const DECIMAL_PLACES: usize = 6;
    pub const SEPARATOR: char = ' ';
    pub const TOKENS_PER_LINE: usize = 2;
}

/// Worker channel settings.
pub struct WorkerConfig;

impl WorkerConfig {
    /// Buffer size of the in-memory duplex used by task workers.
    pub const TASK_CHANNEL_CAPACITY: usize = 64 * 1024;
    /// Room for a two-line result even at `f32::MAX` magnitudes.
    pub const MIN_TASK_CHANNEL_CAPACITY: usize = 512;
}

/// Environment variable names.
pub struct EnvConfig;

impl EnvConfig {
    pub const WORKER_MODE: &'static str = "CPAIR_WORKER_MODE";
    pub const DEPTH: &'static str = "CPAIR_DEPTH";
    pub const LOG: &'static str = "CPAIR_LOG";
    pub const DEFAULT_LOG_FILTER: &'static str = "warn";
}

/// How a recursion frame is realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkerMode {
    /// Re-execute the worker program with piped stdin/stdout.
    #[default]
    Process,
    /// Run the splitter on a tokio task wired with in-memory channels.
    Task,
}

impl WorkerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerMode::Process => "process",
            WorkerMode::Task => "task",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "process" => Some(WorkerMode::Process),
            "task" => Some(WorkerMode::Task),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings a worker reads from its environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub worker_mode: WorkerMode,
    /// Depth of this worker in the recursion tree; the root is 0.
    pub depth: usize,
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_mode: WorkerMode::default(),
            depth: 0,
            log_filter: EnvConfig::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(EnvConfig::WORKER_MODE) {
            config.worker_mode = WorkerMode::from_str(&raw).ok_or_else(|| CpairError::Config {
                message: format!(
                    "{} must be 'process' or 'task', got {:?}",
                    EnvConfig::WORKER_MODE,
                    raw
                ),
            })?;
        }

        if let Some(raw) = lookup(EnvConfig::DEPTH) {
            config.depth = raw.trim().parse().map_err(|_| CpairError::Config {
                message: format!(
                    "{} must be a non-negative integer, got {:?}",
                    EnvConfig::DEPTH,
                    raw
                ),
            })?;
        }

        if let Some(raw) = lookup(EnvConfig::LOG) {
            if !raw.trim().is_empty() {
                config.log_filter = raw;
            }
        }

        Ok(config)
    }
}
