//! Error types for cpair.
//!
//! Every failure is fatal to the worker that hits it. The variants are grouped
//! into categories so the binary can tell a caller mistake (bad arguments,
//! malformed input) apart from an environment fault (spawn, pipe, I/O).

use crate::worker::WorkerRole;
use thiserror::Error;

/// Main error type for cpair.
#[derive(Debug, Error)]
pub enum CpairError {
    // Usage errors
    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Malformed input at line {line}: {reason} ({content:?})")]
    MalformedLine {
        /// 1-based line number within the channel being parsed.
        line: usize,
        content: String,
        reason: String,
    },

    // Resource errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Failed to spawn {role} worker: {message}")]
    Spawn {
        role: WorkerRole,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Channel error for {role} worker: {message}")]
    Channel { role: WorkerRole, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // Propagated worker failures
    #[error("{role} worker failed: {reason}")]
    WorkerFailed { role: WorkerRole, reason: String },

    #[error("Merge received no points from either worker")]
    EmptyMerge,
}

/// Result type alias for cpair operations.
pub type Result<T> = std::result::Result<T, CpairError>;

/// Coarse classification used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller supplied bad arguments or bad input.
    Usage,
    /// The environment failed us: pipes, spawning, I/O, configuration.
    Resource,
    /// A worker below us terminated unsuccessfully.
    Worker,
}

impl From<std::io::Error> for CpairError {
    fn from(err: std::io::Error) -> Self {
        CpairError::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl CpairError {
    /// Create a malformed-line error.
    pub fn malformed(line: usize, content: impl Into<String>, reason: impl Into<String>) -> Self {
        CpairError::MalformedLine {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error with context.
    pub fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        CpairError::Io {
            message: format!("{context}: {err}"),
            source: Some(err),
        }
    }

    /// Create a spawn error for the given worker.
    pub fn spawn(role: WorkerRole, err: std::io::Error) -> Self {
        CpairError::Spawn {
            role,
            message: err.to_string(),
            source: Some(err),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CpairError::Usage { .. } | CpairError::MalformedLine { .. } => ErrorCategory::Usage,

            CpairError::WorkerFailed { .. } => ErrorCategory::Worker,

            CpairError::Io { .. }
            | CpairError::Spawn { .. }
            | CpairError::Channel { .. }
            | CpairError::Config { .. }
            | CpairError::EmptyMerge => ErrorCategory::Resource,
        }
    }

    /// Check if this error is the caller's fault rather than the system's.
    pub fn is_usage_error(&self) -> bool {
        self.category() == ErrorCategory::Usage
    }
}
