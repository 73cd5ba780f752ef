//! Workers realized as child processes of the same program.

use super::{Worker, WorkerRole, WorkerSpawner};
use crate::config::{EnvConfig, WorkerMode};
use crate::error::{CpairError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Spawns workers by re-executing a cpair program.
///
/// The child's stdin is the partition feed and its stdout the result
/// channel; stderr is inherited so diagnostics from any depth reach the
/// terminal. No arguments are passed.
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    program: PathBuf,
}

impl ProcessSpawner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, depth: usize) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.env(EnvConfig::WORKER_MODE, WorkerMode::Process.as_str())
            .env(EnvConfig::DEPTH, depth.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }
}

impl WorkerSpawner for ProcessSpawner {
    fn mode(&self) -> WorkerMode {
        WorkerMode::Process
    }

    fn spawn(&self, role: WorkerRole, depth: usize) -> Result<Worker> {
        let child = self
            .command(depth)
            .spawn()
            .map_err(|e| CpairError::spawn(role, e))?;

        debug!(
            %role,
            depth,
            pid = child.id(),
            program = %self.program.display(),
            "spawned process worker"
        );
        Worker::from_process(role, child)
    }
}
