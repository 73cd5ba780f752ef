//! Plane geometry used by the splitter: points, result pairs, the mean-X
//! partition and the brute-force pair finder.

mod brute_force;
mod partition;
mod point;

pub use brute_force::closest_pair_brute_force;
pub use partition::{mean_x, Partition};
pub use point::{Point, ResultPair};
