//! Point and result-pair value types.

/// A point in the plane.
///
/// Coordinates are stored in single precision; distances are always computed
/// in double precision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// The closest pair found within some point set.
///
/// A degenerate pair holds the same point twice and means that no real pair
/// was available at that node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultPair {
    pub first: Point,
    pub second: Point,
}

impl ResultPair {
    pub const fn new(first: Point, second: Point) -> Self {
        Self { first, second }
    }

    pub const fn degenerate(point: Point) -> Self {
        Self {
            first: point,
            second: point,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.first == self.second
    }

    pub fn distance(&self) -> f64 {
        self.first.distance(&self.second)
    }

    /// The pair in wire order.
    pub fn points(&self) -> [Point; 2] {
        [self.first, self.second]
    }
}
