//! End-to-end tests of the worker tree through the `ClosestPair` facade.
//!
//! These run in task mode so the whole tree lives inside the test process;
//! the process-mode wiring is covered by the `cpair` binary's tests.

use cpair_core::{
    closest_pair_brute_force, ClosestPair, CpairError, Partition, Point, ResultPair, WorkerMode,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn task_solver() -> ClosestPair {
    ClosestPair::builder()
        .worker_mode(WorkerMode::Task)
        .build()
        .expect("task mode needs no program")
}

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Integer-valued points below 2^24 survive f32 and the wire format exactly.
fn random_points(rng: &mut StdRng, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| {
            p(
                rng.random_range(-1_000_000..1_000_000) as f32,
                rng.random_range(-1_000_000..1_000_000) as f32,
            )
        })
        .collect()
}

fn true_minimum(points: &[Point]) -> f64 {
    let mut best = f64::MAX;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            best = best.min(points[i].distance(&points[j]));
        }
    }
    best
}

#[tokio::test]
async fn test_fewer_than_two_points_have_no_pair() {
    let solver = task_solver();
    assert_eq!(solver.solve(&[]).await.unwrap(), None);
    assert_eq!(solver.solve(&[p(1.0, 2.0)]).await.unwrap(), None);
}

#[tokio::test]
async fn test_two_points_regardless_of_distance() {
    let solver = task_solver();
    let pair = solver
        .solve(&[p(-400.0, 12.0), p(399.0, -80.0)])
        .await
        .unwrap();
    assert_eq!(pair, Some(ResultPair::new(p(-400.0, 12.0), p(399.0, -80.0))));
}

#[tokio::test]
async fn test_unsplittable_set_passes_first_point_through() {
    let solver = task_solver();
    let pair = solver
        .solve(&[p(5.0, 0.0), p(5.0, 1.0), p(5.0, 2.0)])
        .await
        .unwrap()
        .unwrap();
    assert!(pair.is_degenerate());
    assert_eq!(pair.first, p(5.0, 0.0));
}

#[tokio::test]
async fn test_unit_square_pair_does_not_cross_the_split() {
    let solver = task_solver();
    let pair = solver
        .solve(&[p(0.0, 0.0), p(0.0, 1.0), p(10.0, 0.0), p(10.0, 1.0)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pair.distance(), 1.0);
    assert_eq!(pair.first.x, pair.second.x);
}

#[tokio::test]
async fn test_run_over_streams_matches_solve() {
    let solver = task_solver();
    let mut output = Vec::new();
    solver
        .run(&b"2 2\n0 0\n9 9\n2 3\n"[..], &mut output)
        .await
        .unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "2.000000 2.000000\n2.000000 3.000000\n"
    );
}

#[tokio::test]
async fn test_malformed_input_fails_without_output() {
    let solver = task_solver();
    let mut output = Vec::new();
    let err = solver
        .run(&b"0 0\n1\n"[..], &mut output)
        .await
        .unwrap_err();

    assert!(matches!(err, CpairError::MalformedLine { line: 2, .. }));
    assert!(output.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_random_sets_return_input_points_at_or_above_true_minimum() {
    let solver = task_solver();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for count in [3, 5, 8, 17, 64, 200] {
        let points = random_points(&mut rng, count);
        let pair = solver.solve(&points).await.unwrap().unwrap();

        assert!(points.contains(&pair.first), "{count}: {pair:?}");
        assert!(points.contains(&pair.second), "{count}: {pair:?}");
        // A subtree whose points share one X reports a degenerate pair, which
        // is a placeholder rather than a measured distance.
        if !pair.is_degenerate() {
            assert!(pair.distance() >= true_minimum(&points), "{count}: {pair:?}");
        }
    }
}

#[test]
fn test_random_partitions_conserve_points() {
    let mut rng = StdRng::seed_from_u64(7);

    for count in [3, 4, 10, 33] {
        let points = random_points(&mut rng, count);
        let partition = Partition::by_mean_x(&points);

        assert_eq!(partition.len(), points.len());
        assert!(partition.lows.iter().all(|q| q.x <= partition.mean));
        assert!(partition.highs.iter().all(|q| q.x > partition.mean));

        // Order inside each half follows the input order.
        let lows_in_order: Vec<Point> = points
            .iter()
            .copied()
            .filter(|q| q.x <= partition.mean)
            .collect();
        assert_eq!(partition.lows, lows_in_order);
    }
}

#[test]
fn test_brute_force_finds_true_minimum_for_small_sets() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..50 {
        let count = rng.random_range(2..=4);
        let points = random_points(&mut rng, count);
        let pair = closest_pair_brute_force(&points).unwrap();
        assert_eq!(pair.distance(), true_minimum(&points));
    }
}
