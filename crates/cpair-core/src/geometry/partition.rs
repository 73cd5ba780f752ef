//! Split of a point set around the mean X coordinate.

use super::point::Point;

/// Arithmetic mean of the X coordinates.
///
/// Accumulated in `f32` in input order. Returns `None` for an empty set.
pub fn mean_x(points: &[Point]) -> Option<f32> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(0.0_f32, |acc, p| acc + p.x);
    Some(sum / points.len() as f32)
}

/// The two halves handed to the child workers.
///
/// `lows` holds every point with `x <= mean`, `highs` every point with
/// `x > mean`. Both keep the relative order of the original set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub mean: f32,
    pub lows: Vec<Point>,
    pub highs: Vec<Point>,
}

impl Partition {
    /// Partition `points` around their mean X.
    pub fn by_mean_x(points: &[Point]) -> Self {
        let Some(mean) = mean_x(points) else {
            return Self::default();
        };

        let (lows, highs) = points
            .iter()
            .copied()
            .partition(|p| p.x <= mean);

        Self { mean, lows, highs }
    }

    /// True when one side is empty and recursing would not shrink the problem.
    pub fn is_degenerate(&self) -> bool {
        self.lows.is_empty() || self.highs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lows.len() + self.highs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
