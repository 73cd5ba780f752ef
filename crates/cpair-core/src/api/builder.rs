//! Builder for configuring a ClosestPair solver.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ClosestPair;
use crate::config::{RuntimeConfig, WorkerConfig, WorkerMode};
use crate::error::{CpairError, Result};
use crate::worker::{ProcessSpawner, TaskSpawner, WorkerSpawner};

/// Builder for configuring a [`ClosestPair`] solver.
///
/// # Example
///
/// ```rust,ignore
/// use cpair_core::{ClosestPair, WorkerMode};
///
/// let solver = ClosestPair::builder()
///     .worker_mode(WorkerMode::Process)
///     .worker_program("/usr/local/bin/cpair")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ClosestPairBuilder {
    worker_mode: WorkerMode,
    worker_program: Option<PathBuf>,
    task_channel_capacity: usize,
    depth: usize,
}

impl Default for ClosestPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClosestPairBuilder {
    pub fn new() -> Self {
        Self {
            worker_mode: WorkerMode::default(),
            worker_program: None,
            task_channel_capacity: WorkerConfig::TASK_CHANNEL_CAPACITY,
            depth: 0,
        }
    }

    /// Start from settings read out of the environment.
    pub fn from_runtime_config(config: &RuntimeConfig) -> Self {
        Self::new()
            .worker_mode(config.worker_mode)
            .depth(config.depth)
    }

    /// How recursion frames are realized.
    ///
    /// Default: [`WorkerMode::Process`]
    pub fn worker_mode(mut self, mode: WorkerMode) -> Self {
        self.worker_mode = mode;
        self
    }

    /// Program re-executed for each process worker.
    ///
    /// Required in process mode. The program must speak the cpair line
    /// protocol on stdin/stdout and take no arguments.
    pub fn worker_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.worker_program = Some(program.into());
        self
    }

    /// Channel buffer size for task workers.
    ///
    /// Default: [`WorkerConfig::TASK_CHANNEL_CAPACITY`]
    pub fn task_channel_capacity(mut self, capacity: usize) -> Self {
        self.task_channel_capacity = capacity;
        self
    }

    /// Depth of the node this solver runs as; the root is 0.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Build the solver.
    pub fn build(self) -> Result<ClosestPair> {
        let spawner: Arc<dyn WorkerSpawner> = match self.worker_mode {
            WorkerMode::Process => {
                let program = self.worker_program.ok_or_else(|| CpairError::Config {
                    message: "process mode needs a worker program".into(),
                })?;
                Arc::new(ProcessSpawner::new(program))
            }
            WorkerMode::Task => {
                Arc::new(TaskSpawner::new().with_capacity(self.task_channel_capacity))
            }
        };

        Ok(ClosestPair {
            spawner,
            depth: self.depth,
        })
    }
}
