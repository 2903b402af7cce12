//! Signed area and eps-aware segment predicates.
//!
//! All collinearity decisions go through `Segment::orientation_eps`, so a
//! single `eps` controls which near-degenerate configurations count as
//! touching.

use super::types::{Orientation, Pt, Segment};

/// Twice the signed area of the triangle `(p1, p2, p)`.
/// Positive when `p` is left of `p1 → p2` (counterclockwise turn).
#[inline]
pub fn signed_area(p1: Pt, p2: Pt, p: Pt) -> f64 {
    (p2.x - p1.x) * (p.y - p1.y) - (p2.y - p1.y) * (p.x - p1.x)
}

#[inline]
fn within(x: f64, (lo, hi): (f64, f64)) -> bool {
    x >= lo && x <= hi
}

impl Segment {
    /// Twice the signed area of `(from, to, p)`.
    #[inline]
    pub fn signed_area(&self, p: Pt) -> f64 {
        signed_area(self.from, self.to, p)
    }

    /// Side of `from → to` that `p` lies on; `|area| <= eps` is collinear.
    #[inline]
    pub fn orientation_eps(&self, p: Pt, eps: f64) -> Orientation {
        let value = self.signed_area(p);
        if value.abs() <= eps {
            Orientation::Collinear
        } else if value < 0.0 {
            Orientation::Right
        } else {
            Orientation::Left
        }
    }

    /// Whether `p` lies on the segment: inside its x-range and within `eps`
    /// of the supporting line.
    #[inline]
    pub fn contains_eps(&self, p: Pt, eps: f64) -> bool {
        within(p.x, self.x_range()) && self.signed_area(p).abs() <= eps
    }

    /// Whether two segments meet.
    ///
    /// True for a proper crossing (each segment's endpoints on different
    /// sides of the other) and for any endpoint of one segment lying
    /// collinear inside the other's x-range. Shared endpoints therefore
    /// count as intersecting; callers skip path-adjacent edges themselves.
    ///
    /// The test is symmetric: `a.intersects_eps(&b, e) == b.intersects_eps(&a, e)`.
    pub fn intersects_eps(&self, other: &Segment, eps: f64) -> bool {
        let self_o1 = self.orientation_eps(other.from, eps);
        let self_o2 = self.orientation_eps(other.to, eps);
        let other_o1 = other.orientation_eps(self.from, eps);
        let other_o2 = other.orientation_eps(self.to, eps);
        if self_o1 != self_o2 && other_o1 != other_o2 {
            return true;
        }
        let self_x = self.x_range();
        let other_x = other.x_range();
        (self_o1 == Orientation::Collinear && within(other.from.x, self_x))
            || (self_o2 == Orientation::Collinear && within(other.to.x, self_x))
            || (other_o1 == Orientation::Collinear && within(self.from.x, other_x))
            || (other_o2 == Orientation::Collinear && within(self.to.x, other_x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    const EPS: f64 = 1e-2;

    fn seg(a: [f64; 2], b: [f64; 2]) -> Segment {
        Segment::new(vector![a[0], a[1]], vector![b[0], b[1]])
    }

    #[test]
    fn signed_area_sign_tracks_turn() {
        let a = vector![0.0, 0.0];
        let b = vector![1.0, 0.0];
        assert!((signed_area(a, b, vector![0.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!((signed_area(a, b, vector![0.0, -2.0]) + 2.0).abs() < 1e-12);
        assert_eq!(signed_area(a, b, vector![5.0, 0.0]), 0.0);
    }

    #[test]
    fn orientation_uses_eps_band() {
        let s = seg([0.0, 0.0], [10.0, 0.0]);
        assert_eq!(s.orientation_eps(vector![3.0, 1.0], EPS), Orientation::Left);
        assert_eq!(s.orientation_eps(vector![3.0, -1.0], EPS), Orientation::Right);
        // area = 10 * 0.0005 = 0.005 <= eps
        assert_eq!(
            s.orientation_eps(vector![3.0, 0.0005], EPS),
            Orientation::Collinear
        );
        assert_eq!(Orientation::Right.sign(), -1);
        assert_eq!(Orientation::Left.sign(), 1);
    }

    #[test]
    fn contains_requires_x_range() {
        let s = seg([0.0, 0.0], [2.0, 2.0]);
        assert!(s.contains_eps(vector![1.0, 1.0], EPS));
        assert!(s.contains_eps(vector![2.0, 2.0], EPS));
        assert!(!s.contains_eps(vector![3.0, 3.0], EPS));
        assert!(!s.contains_eps(vector![1.0, 1.5], EPS));
    }

    #[test]
    fn proper_crossing_and_disjoint() {
        let a = seg([0.0, 0.0], [2.0, 2.0]);
        let b = seg([0.0, 2.0], [2.0, 0.0]);
        assert!(a.intersects_eps(&b, EPS));
        let c = seg([3.0, 0.0], [4.0, 5.0]);
        assert!(!a.intersects_eps(&c, EPS));
    }

    #[test]
    fn shared_endpoint_counts_as_touching() {
        let a = seg([0.0, 0.0], [1.0, 3.0]);
        let b = seg([1.0, 3.0], [4.0, 1.0]);
        assert!(a.intersects_eps(&b, EPS));
        assert!(b.intersects_eps(&a, EPS));
    }

    #[test]
    fn collinear_overlap_and_gap() {
        let a = seg([0.0, 0.0], [2.0, 0.0]);
        let overlap = seg([1.0, 0.0], [3.0, 0.0]);
        let gap = seg([3.0, 0.0], [4.0, 0.0]);
        assert!(a.intersects_eps(&overlap, EPS));
        assert!(overlap.intersects_eps(&a, EPS));
        assert!(!a.intersects_eps(&gap, EPS));
        assert!(!gap.intersects_eps(&a, EPS));
    }

    #[test]
    fn t_junction_is_symmetric() {
        let a = seg([0.0, 0.0], [4.0, 0.0]);
        let b = seg([2.0, 0.0], [2.0, 3.0]);
        assert!(a.intersects_eps(&b, EPS));
        assert!(b.intersects_eps(&a, EPS));
        assert!(b.reversed().intersects_eps(&a.reversed(), EPS));
    }
}
