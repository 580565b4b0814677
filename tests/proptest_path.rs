//! Property-based tests for path queries.
//!
//! These tests use proptest to generate random paths and verify invariants.

use pathway_engine::{
    map_point_to_path_alike, Pathway, PolylineSegmentedPath, SegmentIndex, SegmentedPath, Vector3,
};
use proptest::prelude::*;

/// Generate a random point in a bounded range.
fn arb_point() -> impl Strategy<Value = Vector3> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(Vector3::from_array)
}

/// Generate a random waypoint list.
fn arb_points(max_points: usize) -> impl Strategy<Value = Vec<Vector3>> {
    prop::collection::vec(arb_point(), 2..=max_points)
}

/// Build a path, skipping inputs with nearly coincident neighbours.
fn build_path(points: &[Vector3], cyclic: bool) -> Option<PolylineSegmentedPath> {
    let path = PolylineSegmentedPath::try_new(points, cyclic).ok()?;
    (0..path.segment_count())
        .all(|i| path.segment_length(i) > 1e-3)
        .then_some(path)
}

/// Generate an open path whose x coordinate strictly increases, so it never
/// crosses itself.
fn arb_monotone_points(max_points: usize) -> impl Strategy<Value = Vec<Vector3>> {
    prop::collection::vec((0.5..20.0f64, -100.0..100.0f64, -100.0..100.0f64), 2..=max_points)
        .prop_map(|steps| {
            steps
                .into_iter()
                .scan(0.0, |x, (step, y, z)| {
                    *x += step;
                    Some(Vector3::new(*x, y, z))
                })
                .collect::<Vec<_>>()
        })
}

fn assert_near(a: Vector3, b: Vector3, tolerance: f64) -> Result<(), TestCaseError> {
    prop_assert!(
        a.distance(b) <= tolerance,
        "{:?} and {:?} are {} apart",
        a,
        b,
        a.distance(b)
    );
    Ok(())
}

proptest! {
    #[test]
    fn proptest_distance_point_round_trip(
        points in arb_points(10),
        cyclic in any::<bool>(),
        fraction in 0.0..=1.0f64,
    ) {
        let path = build_path(&points, cyclic);
        prop_assume!(path.is_some());
        let path = path.unwrap();

        let point = path.map_path_distance_to_point(fraction * path.length());
        let distance = path.map_point_to_path_distance(point);
        prop_assert!(distance >= 0.0 && distance <= path.length() + 1e-9);
        assert_near(path.map_path_distance_to_point(distance), point, 1e-6)?;
    }

    #[test]
    fn proptest_path_distance_round_trip(
        points in arb_monotone_points(10),
        fraction in 0.0..=1.0f64,
    ) {
        let path = PolylineSegmentedPath::new(&points, false);
        let distance = fraction * path.length();

        let point = path.map_path_distance_to_point(distance);
        let restored = path.map_point_to_path_distance(point);
        prop_assert!(
            (restored - distance).abs() < 1e-6,
            "{} mapped back to {}",
            distance,
            restored
        );
    }

    #[test]
    fn proptest_open_path_distance_clamps(
        points in arb_points(10),
        excess in 0.0..1000.0f64,
    ) {
        let path = build_path(&points, false);
        prop_assume!(path.is_some());
        let path = path.unwrap();

        prop_assert_eq!(
            path.map_path_distance_to_point(-excess),
            path.map_path_distance_to_point(0.0)
        );
        prop_assert_eq!(
            path.map_path_distance_to_point(path.length() + excess),
            path.map_path_distance_to_point(path.length())
        );
        prop_assert_eq!(path.map_path_distance_to_point(0.0), path.point(0));
    }

    #[test]
    fn proptest_cyclic_path_distance_wraps(
        points in arb_points(10),
        distance in -500.0..500.0f64,
    ) {
        let path = build_path(&points, true);
        prop_assume!(path.is_some());
        let path = path.unwrap();
        let length = path.length();

        let point = path.map_path_distance_to_point(distance);
        assert_near(path.map_path_distance_to_point(distance + length), point, 1e-6)?;
        assert_near(path.map_path_distance_to_point(distance - length), point, 1e-6)?;
    }

    #[test]
    fn proptest_segment_projection_is_nearest(
        points in arb_points(6),
        query in arb_point(),
        samples in prop::collection::vec(0.0..=1.0f64, 8),
    ) {
        let path = build_path(&points, false);
        prop_assume!(path.is_some());
        let path = path.unwrap();

        for segment in 0..path.segment_count() {
            let length = path.segment_length(segment);
            let t = path.map_point_to_segment_distance(segment, query);
            prop_assert!((0.0..=length).contains(&t));

            let best = query.distance(path.map_segment_distance_to_point(segment, t));
            for fraction in &samples {
                let other = path.map_segment_distance_to_point(segment, fraction * length);
                prop_assert!(best <= query.distance(other) + 1e-9);
            }
        }
    }

    #[test]
    fn proptest_move_points_keeps_caches_in_sync(
        points in arb_points(10),
        cyclic in any::<bool>(),
        moved in arb_points(4),
        start in 0usize..10,
    ) {
        let path = build_path(&points, cyclic);
        prop_assume!(path.is_some());
        let mut path = path.unwrap();

        let limit = path.point_count() - usize::from(cyclic);
        let start = start % limit;
        let count = moved.len().min(limit - start);
        prop_assume!(path.try_move_points(start, &moved[..count]).is_ok());

        for i in 0..path.segment_count() {
            let start = path.segment_start(i);
            let end = path.segment_end(i);
            prop_assert!((path.segment_tangent(i).length() - 1.0).abs() < 1e-9);
            prop_assert!((path.segment_length(i) - start.distance(end)).abs() < 1e-9);
        }
        if cyclic {
            prop_assert_eq!(path.point(0), path.point(path.point_count() - 1));
        }
    }

    #[test]
    fn proptest_index_matches_linear_scan(
        points in arb_points(16),
        cyclic in any::<bool>(),
        query in arb_point(),
    ) {
        let path = build_path(&points, cyclic);
        prop_assume!(path.is_some());
        let path = path.unwrap();

        let index = SegmentIndex::new(&path);
        prop_assert_eq!(
            index.map_point_to_path(&path, query),
            map_point_to_path_alike(&path, query)
        );
    }
}
