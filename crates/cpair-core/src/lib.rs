//! cpair core - closest pair of points by a tree of recursive workers.
//!
//! Every node of the tree reads a batch of points from its input channel,
//! splits it around the mean X coordinate, hands each half to a freshly
//! spawned worker, and merges the two answers it gets back. Workers are either
//! re-executed copies of the `cpair` program talking over stdin/stdout pipes,
//! or tokio tasks talking over in-memory duplex streams. Both speak the same
//! line protocol (see [`wire`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use cpair_core::{ClosestPair, Point, WorkerMode};
//!
//! #[tokio::main]
//! async fn main() -> cpair_core::Result<()> {
//!     let solver = ClosestPair::builder().worker_mode(WorkerMode::Task).build()?;
//!     let points = [Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(10.0, 0.0)];
//!
//!     if let Some(pair) = solver.solve(&points).await? {
//!         println!("closest: {:?} at {}", pair, pair.distance());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod splitter;
pub mod wire;
pub mod worker;

mod api;

pub use api::{ClosestPair, ClosestPairBuilder};
pub use config::{RuntimeConfig, WorkerMode};
pub use error::{CpairError, ErrorCategory, Result};
pub use geometry::{closest_pair_brute_force, Partition, Point, ResultPair};
pub use worker::{ProcessSpawner, TaskSpawner, Worker, WorkerRole, WorkerSpawner};
