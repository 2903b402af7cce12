use super::rand::{draw_general_position, PointCfg, ReplayToken};
use super::*;
use nalgebra::vector;
use proptest::prelude::*;

#[test]
fn hull_of_square_drops_interior_point() {
    let points = vec![
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
        vector![1.0, 1.0],
    ];
    let hull = convex_hull(&points);
    assert_eq!(
        hull,
        vec![
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0]
        ]
    );
}

#[test]
fn small_sets_are_returned_unchanged() {
    let points = vec![vector![0.0, 3.0], vector![1.0, 0.0], vector![2.0, 1.0]];
    assert_eq!(convex_hull(&points), points);
    assert_eq!(convex_hull_indices(&points[..2]), vec![0, 1]);
    assert!(convex_hull(&[]).is_empty());
}

#[test]
fn jarvis_neighbours_on_square() {
    let points = vec![
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
        vector![1.0, 0.5],
    ];
    // CCW order 0,1,2,3; prev is the CCW successor, next the CW one.
    let n = jarvis_step(&points, 0).unwrap();
    assert_eq!(n, JarvisNeighbors { next: 3, prev: 1 });
    let n2 = jarvis_step(&points, 2).unwrap();
    assert_eq!(n2, JarvisNeighbors { next: 1, prev: 3 });
    assert_eq!(n2.other_than(1), 3);
    assert_eq!(n2.other_than(3), 1);
    assert!(jarvis_step(&points[..1], 0).is_none());
}

fn seeded_set(n: usize, seed: u64) -> PointSet {
    draw_general_position(
        PointCfg::with_count(n),
        GeomCfg::default(),
        ReplayToken::new(seed, 0),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn hull_edges_keep_all_points_on_the_left(n in 4usize..16, seed in any::<u64>()) {
        let set = seeded_set(n, seed);
        let pts = set.points();
        let hull = convex_hull_indices(pts);
        prop_assert!(hull.len() >= 3);
        prop_assert_eq!(pts[hull[0]], pts[0]);
        for k in 0..hull.len() {
            let a = pts[hull[k]];
            let b = pts[hull[(k + 1) % hull.len()]];
            for (i, &p) in pts.iter().enumerate() {
                if i == hull[k] || i == hull[(k + 1) % hull.len()] {
                    continue;
                }
                prop_assert!(signed_area(a, b, p) > 0.0);
            }
        }
    }

    #[test]
    fn jarvis_step_matches_hull_adjacency(n in 4usize..16, seed in any::<u64>()) {
        let set = seeded_set(n, seed);
        let pts = set.points();
        let hull = convex_hull_indices(pts);
        let h = hull.len();
        for k in 0..h {
            let nb = jarvis_step(pts, hull[k]).unwrap();
            prop_assert_eq!(nb.prev, hull[(k + 1) % h]);
            prop_assert_eq!(nb.next, hull[(k + h - 1) % h]);
        }
    }

    #[test]
    fn intersection_is_symmetric(
        coords in proptest::collection::vec(-5i32..5, 8),
        eps in prop_oneof![Just(0.0), Just(1e-2), Just(0.5)],
    ) {
        let p = |i: usize| vector![coords[2 * i] as f64, coords[2 * i + 1] as f64];
        let a = Segment::new(p(0), p(1));
        let b = Segment::new(p(2), p(3));
        prop_assert_eq!(a.intersects_eps(&b, eps), b.intersects_eps(&a, eps));
        prop_assert_eq!(
            a.intersects_eps(&b, eps),
            a.reversed().intersects_eps(&b.reversed(), eps)
        );
        // segments sharing an endpoint
        let c = Segment::new(p(1), p(2));
        prop_assert_eq!(a.intersects_eps(&c, eps), c.intersects_eps(&a, eps));
    }
}
