//! The recursive splitter/merger run by every node of the worker tree.
//!
//! A node reads its whole point set, then either answers directly or splits
//! the set around the mean X, hands each half to a freshly spawned worker and
//! merges what the two workers return.
//!
//! The merge only looks at the (at most four) points the children returned,
//! never at a strip around the split line, so the tree answer is not
//! guaranteed to be the true closest pair of the whole input.

use crate::error::{CpairError, Result};
use crate::geometry::{closest_pair_brute_force, Partition, Point, ResultPair};
use crate::wire;
use crate::worker::{WorkerRole, WorkerSpawner};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// What a node does with the set it received.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeAction {
    /// Fewer than two points: no pair exists, emit nothing.
    Empty,
    /// Exactly two points: they are the answer, in input order.
    Pair(ResultPair),
    /// All points fall on one side of the mean: emit the first point twice.
    Unsplittable(ResultPair),
    /// Hand each half to a worker and merge their answers.
    Recurse(Partition),
}

impl NodeAction {
    /// Decide how to handle `points` at one node.
    pub fn plan(points: &[Point]) -> Self {
        match points {
            [] | [_] => NodeAction::Empty,
            [first, second] => NodeAction::Pair(ResultPair::new(*first, *second)),
            [first, ..] => {
                let partition = Partition::by_mean_x(points);
                if partition.is_degenerate() {
                    NodeAction::Unsplittable(ResultPair::degenerate(*first))
                } else {
                    NodeAction::Recurse(partition)
                }
            }
        }
    }
}

/// Run one node of the tree.
///
/// Reads the point set from `input` until end-of-stream, computes this
/// node's answer and writes it to `output`, which is shut down afterwards in
/// every successful case. Nothing is written when an error occurs.
pub async fn run_node<R, W>(
    input: R,
    mut output: W,
    spawner: Arc<dyn WorkerSpawner>,
    depth: usize,
) -> Result<()>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let points = wire::read_points(input).await?;
    let count = points.len();

    let answer = match NodeAction::plan(&points) {
        NodeAction::Empty => {
            debug!(depth, count, "no pair at this node");
            None
        }
        NodeAction::Pair(pair) => {
            debug!(depth, "two points, answering directly");
            Some(pair)
        }
        NodeAction::Unsplittable(pair) => {
            debug!(depth, count, "partition is degenerate, passing first point through");
            Some(pair)
        }
        NodeAction::Recurse(partition) => {
            Some(split_and_merge(partition, spawner.as_ref(), depth).await?)
        }
    };

    match answer {
        Some(pair) => wire::write_points(&mut output, &pair.points()).await,
        None => output
            .shutdown()
            .await
            .map_err(|e| CpairError::io("closing output", e)),
    }
}

/// Recurse on both halves and merge the workers' answers.
async fn split_and_merge(
    partition: Partition,
    spawner: &dyn WorkerSpawner,
    depth: usize,
) -> Result<ResultPair> {
    let Partition { mean, lows, highs } = partition;
    debug!(
        depth,
        mean,
        lows = lows.len(),
        highs = highs.len(),
        mode = %spawner.mode(),
        "splitting"
    );

    let mut low_worker = spawner.spawn(WorkerRole::Lows, depth + 1)?;
    let mut high_worker = spawner.spawn(WorkerRole::Highs, depth + 1)?;

    low_worker.send(&lows).await?;
    drop(lows);
    high_worker.send(&highs).await?;
    drop(highs);

    // Reap both before judging either, so no child is left unwaited.
    let low_status = low_worker.wait().await;
    let high_status = high_worker.wait().await;
    low_status?;
    high_status?;

    let mut returned = low_worker.collect().await?;
    returned.extend(high_worker.collect().await?);

    let merged = closest_pair_brute_force(&returned).ok_or(CpairError::EmptyMerge)?;
    debug!(
        depth,
        candidates = returned.len(),
        distance = merged.distance(),
        "merged"
    );
    Ok(merged)
}
