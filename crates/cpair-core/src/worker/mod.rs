//! Spawned recursion frames.
//!
//! A [`Worker`] owns exactly one end of each channel it shares with its
//! parent: the writer feeding the child's input and the reader draining the
//! child's output, plus whatever handle reports how the child terminated.
//! [`WorkerSpawner`] is the seam between the splitter and how a frame is
//! realized (a re-executed process or an in-process task).

mod process;
mod task;

pub use process::ProcessSpawner;
pub use task::TaskSpawner;

use crate::config::WorkerMode;
use crate::error::{CpairError, Result};
use crate::geometry::Point;
use crate::wire;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::debug;

/// Write half of a worker's input channel.
pub type WorkerInput = Box<dyn AsyncWrite + Send + Unpin>;

/// Read half of a worker's output channel.
pub type WorkerOutput = Box<dyn AsyncRead + Send + Unpin>;

/// Which partition a worker was spawned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerRole {
    /// Points with `x <= mean`.
    Lows,
    /// Points with `x > mean`.
    Highs,
}

impl WorkerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerRole::Lows => "lows",
            WorkerRole::Highs => "highs",
        }
    }
}

impl std::fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates workers for the splitter.
pub trait WorkerSpawner: Send + Sync {
    /// How this spawner realizes a worker.
    fn mode(&self) -> WorkerMode;

    /// Start a new splitter instance at `depth` with fresh input and output
    /// channels.
    fn spawn(&self, role: WorkerRole, depth: usize) -> Result<Worker>;
}

enum WorkerExit {
    Process(Child),
    Task(JoinHandle<Result<()>>),
}

/// A running child splitter and the parent's ends of its channels.
pub struct Worker {
    role: WorkerRole,
    input: Option<WorkerInput>,
    output: Option<WorkerOutput>,
    exit: Option<WorkerExit>,
}

impl Worker {
    /// Wrap a child process spawned with piped stdin and stdout.
    pub fn from_process(role: WorkerRole, mut child: Child) -> Result<Self> {
        let input = child.stdin.take().ok_or_else(|| CpairError::Channel {
            role,
            message: "child stdin was not piped".into(),
        })?;
        let output = child.stdout.take().ok_or_else(|| CpairError::Channel {
            role,
            message: "child stdout was not piped".into(),
        })?;

        Ok(Self {
            role,
            input: Some(Box::new(input)),
            output: Some(Box::new(output)),
            exit: Some(WorkerExit::Process(child)),
        })
    }

    /// Wrap a spawned task and the parent's ends of its channels.
    pub fn from_task(
        role: WorkerRole,
        input: WorkerInput,
        output: WorkerOutput,
        handle: JoinHandle<Result<()>>,
    ) -> Self {
        Self {
            role,
            input: Some(input),
            output: Some(output),
            exit: Some(WorkerExit::Task(handle)),
        }
    }

    pub fn role(&self) -> WorkerRole {
        self.role
    }

    /// Stream the partition to the worker and close its input.
    ///
    /// The input channel is consumed: a worker receives exactly one batch.
    pub async fn send(&mut self, points: &[Point]) -> Result<()> {
        let mut input = self.input.take().ok_or_else(|| CpairError::Channel {
            role: self.role,
            message: "input channel already closed".into(),
        })?;
        wire::write_points(&mut input, points).await?;
        drop(input);

        debug!(role = %self.role, count = points.len(), "partition sent");
        Ok(())
    }

    /// Block until the worker terminates.
    ///
    /// Any unsuccessful termination is reported as [`CpairError::WorkerFailed`].
    pub async fn wait(&mut self) -> Result<()> {
        // Dropping an unsent input closes it, so the worker cannot hang on us.
        self.input = None;

        let exit = self.exit.take().ok_or_else(|| CpairError::Channel {
            role: self.role,
            message: "worker already reaped".into(),
        })?;

        let failure = match exit {
            WorkerExit::Process(mut child) => {
                let status = child
                    .wait()
                    .await
                    .map_err(|e| CpairError::io(format!("waiting for {} worker", self.role), e))?;
                if status.success() {
                    None
                } else {
                    Some(format!("exited with {status}"))
                }
            }
            WorkerExit::Task(handle) => match handle.await {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(err.to_string()),
                Err(join_err) if join_err.is_panic() => Some("task panicked".to_string()),
                Err(join_err) => Some(join_err.to_string()),
            },
        };

        match failure {
            None => {
                debug!(role = %self.role, "worker finished");
                Ok(())
            }
            Some(reason) => {
                debug!(role = %self.role, %reason, "worker failed");
                Err(CpairError::WorkerFailed {
                    role: self.role,
                    reason,
                })
            }
        }
    }

    /// Drain the worker's output channel.
    ///
    /// Call only after [`Worker::wait`] succeeded.
    pub async fn collect(&mut self) -> Result<Vec<Point>> {
        let output = self.output.take().ok_or_else(|| CpairError::Channel {
            role: self.role,
            message: "output channel already drained".into(),
        })?;
        let points = wire::read_points(output).await?;

        debug!(role = %self.role, count = points.len(), "result collected");
        Ok(points)
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("role", &self.role)
            .field("input_open", &self.input.is_some())
            .field("output_open", &self.output.is_some())
            .field("running", &self.exit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_task(role: WorkerRole) -> Worker {
        let (input, _) = tokio::io::duplex(16);
        let (_, output) = tokio::io::duplex(16);
        let handle = tokio::spawn(async {
            Err::<(), _>(CpairError::malformed(1, "1 2 3", "expected 2 tokens, found 3"))
        });
        Worker::from_task(role, Box::new(input), Box::new(output), handle)
    }

    #[test]
    fn test_role_display() {
        assert_eq!(WorkerRole::Lows.to_string(), "lows");
        assert_eq!(WorkerRole::Highs.to_string(), "highs");
    }

    #[tokio::test]
    async fn test_task_failure_is_propagated() {
        let mut worker = failing_task(WorkerRole::Highs);
        assert_eq!(worker.role(), WorkerRole::Highs);
        let err = worker.wait().await.unwrap_err();
        match err {
            CpairError::WorkerFailed { role, reason } => {
                assert_eq!(role, WorkerRole::Highs);
                assert!(reason.contains("line 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    async fn explode() -> Result<()> {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panicking_task_is_a_failure() {
        let (input, _) = tokio::io::duplex(16);
        let (_, output) = tokio::io::duplex(16);
        let handle = tokio::spawn(explode());
        let mut worker =
            Worker::from_task(WorkerRole::Lows, Box::new(input), Box::new(output), handle);

        let err = worker.wait().await.unwrap_err();
        assert!(matches!(err, CpairError::WorkerFailed { .. }));
    }

    #[tokio::test]
    async fn test_channels_are_single_use() {
        let mut worker = failing_task(WorkerRole::Lows);
        let _ = worker.wait().await;

        assert!(matches!(
            worker.send(&[]).await,
            Err(CpairError::Channel { .. })
        ));
        assert!(matches!(
            worker.wait().await,
            Err(CpairError::Channel { .. })
        ));
    }
}
