//! Quadratic closest-pair scan.
//!
//! Used at the leaves and for the merge over the children's returned points,
//! so the input never holds more than a handful of points.

use super::point::{Point, ResultPair};

/// Find the closest pair in `points` by checking every ordered pair.
///
/// Iteration is outer index ascending, inner index ascending, skipping
/// self-pairs. The minimum is tracked with a strict `<`, so on ties the first
/// pair visited wins. A single point yields the degenerate pair; an empty
/// slice yields `None`.
pub fn closest_pair_brute_force(points: &[Point]) -> Option<ResultPair> {
    match points {
        [] => None,
        [only] => Some(ResultPair::degenerate(*only)),
        _ => {
            let mut best = ResultPair::new(points[0], points[1]);
            let mut shortest = f64::MAX;

            for (i, a) in points.iter().enumerate() {
                for (j, b) in points.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let distance = a.distance(b);
                    if distance < shortest {
                        shortest = distance;
                        best = ResultPair::new(*a, *b);
                    }
                }
            }

            Some(best)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Independent reference: enumerate unordered pairs and keep the first
    /// strict minimum in canonical order.
    fn reference(points: &[Point]) -> Option<ResultPair> {
        let mut best: Option<(f64, ResultPair)> = None;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let d = points[i].distance(&points[j]);
                if best.map_or(true, |(bd, _)| d < bd) {
                    best = Some((d, ResultPair::new(points[i], points[j])));
                }
            }
        }
        best.map(|(_, pair)| pair)
    }

    #[test]
    fn test_empty_has_no_pair() {
        assert_eq!(closest_pair_brute_force(&[]), None);
    }

    #[test]
    fn test_singleton_is_degenerate() {
        let pair = closest_pair_brute_force(&[p(2.0, 3.0)]).unwrap();
        assert_eq!(pair, ResultPair::degenerate(p(2.0, 3.0)));
    }

    #[test]
    fn test_two_points_keep_order() {
        let pair = closest_pair_brute_force(&[p(9.0, 9.0), p(0.0, 0.0)]).unwrap();
        assert_eq!(pair, ResultPair::new(p(9.0, 9.0), p(0.0, 0.0)));
    }

    #[test]
    fn test_first_pair_wins_ties() {
        // Unit square: four pairs at distance 1.0, (0,0)-(0,1) is visited first.
        let square = [p(0.0, 0.0), p(0.0, 1.0), p(10.0, 0.0), p(10.0, 1.0)];
        let pair = closest_pair_brute_force(&square).unwrap();
        assert_eq!(pair, ResultPair::new(p(0.0, 0.0), p(0.0, 1.0)));
    }

    #[test]
    fn test_matches_reference_for_small_sets() {
        let sets: Vec<Vec<Point>> = vec![
            vec![p(0.0, 0.0), p(5.0, 5.0), p(1.0, 1.0)],
            vec![p(3.0, 0.0), p(0.0, 0.0), p(3.0, 4.0), p(0.5, 0.0)],
            vec![p(1.0, 1.0), p(1.0, 1.0), p(2.0, 2.0)],
            vec![p(-1.5, 2.25), p(7.0, -3.0), p(-1.0, 2.0), p(6.5, -3.5)],
            vec![p(0.0, 0.0), p(2.0, 0.0), p(4.0, 0.0), p(6.0, 0.0)],
        ];

        for set in sets {
            assert_eq!(closest_pair_brute_force(&set), reference(&set), "set {set:?}");
        }
    }

    #[test]
    fn test_duplicate_points_are_closest() {
        let pair = closest_pair_brute_force(&[p(4.0, 4.0), p(1.0, 1.0), p(4.0, 4.0)]).unwrap();
        assert_eq!(pair.distance(), 0.0);
        assert_eq!(pair, ResultPair::new(p(4.0, 4.0), p(4.0, 4.0)));
    }
}
