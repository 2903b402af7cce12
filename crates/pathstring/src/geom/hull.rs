//! Convex hulls: Graham scan plus a single Jarvis march step.
//!
//! The Graham scan builds a hull from scratch in O(n log n). The Jarvis step
//! answers "who are the hull neighbours of this point" in O(n), which lets
//! `hull_jump` repair the hull after deleting one vertex without a rebuild.

use std::cmp::Ordering;

use super::predicates::signed_area;
use super::types::Pt;

/// Hull vertices in CCW order, starting at the lowest point.
///
/// Sets with fewer than four points are returned unchanged. Points on a hull
/// edge (zero signed area) are not hull vertices.
pub fn convex_hull(points: &[Pt]) -> Vec<Pt> {
    convex_hull_indices(points)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Same as `convex_hull`, returning indices into `points`.
pub fn convex_hull_indices(points: &[Pt]) -> Vec<usize> {
    if points.len() < 4 {
        return (0..points.len()).collect();
    }
    let pivot = (0..points.len())
        .min_by(|&a, &b| lowest_first(points[a], points[b]))
        .unwrap_or(0);
    let origin = points[pivot];
    let mut rest: Vec<usize> = (0..points.len()).filter(|&i| i != pivot).collect();
    rest.sort_by(|&a, &b| {
        let (da, db) = (points[a] - origin, points[b] - origin);
        let (ta, tb) = (da.y.atan2(da.x), db.y.atan2(db.x));
        ta.partial_cmp(&tb)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                da.norm_squared()
                    .partial_cmp(&db.norm_squared())
                    .unwrap_or(Ordering::Equal)
            })
    });

    let mut stack: Vec<usize> = Vec::with_capacity(points.len());
    stack.push(pivot);
    for i in rest {
        while stack.len() >= 2 {
            let p1 = points[stack[stack.len() - 2]];
            let p2 = points[stack[stack.len() - 1]];
            if signed_area(p1, p2, points[i]) > 0.0 {
                break;
            }
            stack.pop();
        }
        stack.push(i);
    }
    stack
}

fn lowest_first(a: Pt, b: Pt) -> Ordering {
    match a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal),
        o => o,
    }
}

/// Angular extremes around a pivot, as indices into the queried slice.
///
/// - `next`: no point lies strictly left of `pivot → next`.
/// - `prev`: no point lies strictly right of `pivot → prev`.
///
/// For a pivot on the hull these are its two hull neighbours (`next` is the
/// clockwise one, `prev` the counterclockwise one).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JarvisNeighbors {
    pub next: usize,
    pub prev: usize,
}

impl JarvisNeighbors {
    /// The neighbour that is not `from`; `next` when neither matches.
    #[inline]
    pub fn other_than(&self, from: usize) -> usize {
        if self.next == from {
            self.prev
        } else {
            self.next
        }
    }
}

/// One pass of Jarvis march around `points[pivot]`.
///
/// Returns `None` if `points` has no point besides the pivot. Ties on the
/// supporting line keep the first candidate seen.
pub fn jarvis_step(points: &[Pt], pivot: usize) -> Option<JarvisNeighbors> {
    let origin = points[pivot];
    let mut next: Option<usize> = None;
    let mut prev: Option<usize> = None;
    for (i, &p) in points.iter().enumerate() {
        if i == pivot {
            continue;
        }
        if next.map_or(true, |n| signed_area(origin, points[n], p) > 0.0) {
            next = Some(i);
        }
        if prev.map_or(true, |q| signed_area(origin, points[q], p) < 0.0) {
            prev = Some(i);
        }
    }
    Some(JarvisNeighbors {
        next: next?,
        prev: prev?,
    })
}
