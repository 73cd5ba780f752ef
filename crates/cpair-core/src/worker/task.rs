//! Workers realized as tokio tasks inside the current process.

use super::{Worker, WorkerRole, WorkerSpawner};
use crate::config::{WorkerConfig, WorkerMode};
use crate::error::Result;
use crate::splitter;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

/// Spawns workers as tasks on the current tokio runtime.
///
/// Each worker gets two in-memory duplex streams used one way each: one
/// carries the partition down, the other the result back up.
#[derive(Debug, Clone)]
pub struct TaskSpawner {
    capacity: usize,
}

impl Default for TaskSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSpawner {
    pub fn new() -> Self {
        Self {
            capacity: WorkerConfig::TASK_CHANNEL_CAPACITY,
        }
    }

    /// Override the buffer size of each channel.
    ///
    /// The parent only drains a worker's output after the worker exits, so a
    /// channel must hold a whole result; smaller values are raised to
    /// [`WorkerConfig::MIN_TASK_CHANNEL_CAPACITY`].
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(WorkerConfig::MIN_TASK_CHANNEL_CAPACITY);
        self
    }
}

impl WorkerSpawner for TaskSpawner {
    fn mode(&self) -> WorkerMode {
        WorkerMode::Task
    }

    fn spawn(&self, role: WorkerRole, depth: usize) -> Result<Worker> {
        let (parent_input, child_input) = tokio::io::duplex(self.capacity);
        let (child_output, parent_output) = tokio::io::duplex(self.capacity);

        let spawner: Arc<dyn WorkerSpawner> = Arc::new(self.clone());
        let span = info_span!("worker", %role, depth);
        let handle = tokio::spawn(
            splitter::run_node(child_input, child_output, spawner, depth).instrument(span),
        );

        debug!(%role, depth, "spawned task worker");
        Ok(Worker::from_task(
            role,
            Box::new(parent_input),
            Box::new(parent_output),
            handle,
        ))
    }
}
