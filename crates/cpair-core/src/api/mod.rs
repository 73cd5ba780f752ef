//! In-process entry point to the worker tree.

mod builder;

pub use builder::ClosestPairBuilder;

use crate::config::WorkerMode;
use crate::error::{CpairError, Result};
use crate::geometry::{Point, ResultPair};
use crate::splitter;
use crate::wire;
use crate::worker::WorkerSpawner;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

/// Closest-pair solver backed by a tree of workers.
///
/// The solver itself is the root node: it owns the spawner used for the
/// first split and passes it down the tree.
///
/// # Example
///
/// ```rust,ignore
/// use cpair_core::{ClosestPair, Point, WorkerMode};
///
/// let solver = ClosestPair::builder().worker_mode(WorkerMode::Task).build()?;
/// let pair = solver
///     .solve(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(10.0, 0.0)])
///     .await?;
/// ```
#[derive(Clone)]
pub struct ClosestPair {
    spawner: Arc<dyn WorkerSpawner>,
    depth: usize,
}

impl ClosestPair {
    pub fn builder() -> ClosestPairBuilder {
        ClosestPairBuilder::new()
    }

    pub fn worker_mode(&self) -> WorkerMode {
        self.spawner.mode()
    }

    /// Depth this solver reports for its own node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run the root node over arbitrary streams.
    ///
    /// `input` is read to end-of-stream; the answer, if any, is written to
    /// `output` in wire format.
    pub async fn run<R, W>(&self, input: R, output: W) -> Result<()>
    where
        R: AsyncRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        splitter::run_node(input, output, self.spawner.clone(), self.depth).await
    }

    /// Solve for an in-memory point set.
    ///
    /// Returns `None` when fewer than two points are given. Coordinates in
    /// the answer have been through the wire format and carry its precision.
    pub async fn solve(&self, points: &[Point]) -> Result<Option<ResultPair>> {
        let request = wire::encode_points(points);
        let mut response = Vec::new();
        self.run(request.as_bytes(), &mut response).await?;

        let returned = wire::read_points(response.as_slice()).await?;
        debug!(given = points.len(), returned = returned.len(), "solved");

        match returned.as_slice() {
            [] => Ok(None),
            [first, second] => Ok(Some(ResultPair::new(*first, *second))),
            other => Err(CpairError::Io {
                message: format!("root returned {} points, expected 0 or 2", other.len()),
                source: None,
            }),
        }
    }
}

impl std::fmt::Debug for ClosestPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosestPair")
            .field("worker_mode", &self.worker_mode())
            .field("depth", &self.depth)
            .finish()
    }
}
