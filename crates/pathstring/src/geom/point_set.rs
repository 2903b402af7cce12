//! Validated point sets in general position, sorted by height.
//!
//! Invariants of `PointSet`:
//! - 2 ≤ len ≤ `MAX_POINTS`, all coordinates finite.
//! - Strictly increasing `y` (index 0 is the lowest point).
//! - No triple with `|signed_area| <= eps` for the eps it was validated with.
//!
//! Solvers address points by index into this order, so a pattern of length
//! `k` always refers to indices `0..=k`.

use std::cmp::Ordering;
use std::fmt;

use super::predicates::signed_area;
use super::types::{GeomCfg, Pt};

/// Largest supported point count. Patterns have at most `MAX_POINTS - 1`
/// characters, which bounds the DP recursion depth.
pub const MAX_POINTS: usize = 64;

/// Input that violates general position or size limits.
#[derive(Clone, Debug, PartialEq)]
pub enum InputError {
    TooFewPoints { got: usize },
    TooManyPoints { got: usize, max: usize },
    NonFinite { index: usize },
    HeightCollision { y: f64 },
    CollinearTriple { points: [Pt; 3] },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { got } => write!(f, "need at least 2 points, got {got}"),
            Self::TooManyPoints { got, max } => {
                write!(f, "at most {max} points supported, got {got}")
            }
            Self::NonFinite { index } => write!(f, "point {index} has a non-finite coordinate"),
            Self::HeightCollision { y } => write!(f, "two points share height y={y}"),
            Self::CollinearTriple { points: [a, b, c] } => write!(
                f,
                "collinear triple ({}, {}), ({}, {}), ({}, {})",
                a.x, a.y, b.x, b.y, c.x, c.y
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Immutable, height-sorted point set in general position.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    pts: Vec<Pt>,
}

impl PointSet {
    /// Sort `points` ascending by height and validate general position under `cfg.eps`.
    pub fn new(mut points: Vec<Pt>, cfg: GeomCfg) -> Result<Self, InputError> {
        if points.len() < 2 {
            return Err(InputError::TooFewPoints { got: points.len() });
        }
        if points.len() > MAX_POINTS {
            return Err(InputError::TooManyPoints {
                got: points.len(),
                max: MAX_POINTS,
            });
        }
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(InputError::NonFinite { index });
        }
        points.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal));
        if let Some(w) = points.windows(2).find(|w| w[0].y == w[1].y) {
            return Err(InputError::HeightCollision { y: w[0].y });
        }
        if let Some(points) = find_collinear_triple(&points, cfg.eps) {
            return Err(InputError::CollinearTriple { points });
        }
        Ok(Self { pts: points })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    /// Always false: a `PointSet` holds at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Pt] {
        &self.pts
    }

    /// Point `i` in ascending height order.
    #[inline]
    pub fn get(&self, i: usize) -> Pt {
        self.pts[i]
    }

    /// The `k` lowest points.
    #[inline]
    pub fn lowest(&self, k: usize) -> &[Pt] {
        &self.pts[..k]
    }
}

/// First triple (in index order) whose signed area is within `eps` of zero.
pub(crate) fn find_collinear_triple(points: &[Pt], eps: f64) -> Option<[Pt; 3]> {
    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if signed_area(points[i], points[j], points[k]).abs() <= eps {
                    return Some([points[i], points[j], points[k]]);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn sorts_by_height() {
        let ps = PointSet::new(
            vec![vector![0.0, 5.0], vector![1.0, 0.0], vector![3.0, 2.0]],
            GeomCfg::default(),
        )
        .unwrap();
        let ys: Vec<f64> = ps.points().iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 2.0, 5.0]);
        assert_eq!(ps.lowest(2).len(), 2);
    }

    #[test]
    fn rejects_degenerate_input() {
        let cfg = GeomCfg::default();
        assert!(matches!(
            PointSet::new(vec![vector![0.0, 0.0]], cfg),
            Err(InputError::TooFewPoints { got: 1 })
        ));
        assert!(matches!(
            PointSet::new(vec![vector![0.0, 1.0], vector![4.0, 1.0]], cfg),
            Err(InputError::HeightCollision { .. })
        ));
        assert!(matches!(
            PointSet::new(
                vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]],
                cfg
            ),
            Err(InputError::CollinearTriple { .. })
        ));
        assert!(matches!(
            PointSet::new(vec![vector![0.0, 0.0], vector![f64::NAN, 1.0]], cfg),
            Err(InputError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn rejects_oversized_sets() {
        let pts: Vec<Pt> = (0..=MAX_POINTS)
            .map(|i| vector![i as f64, (i * i) as f64])
            .collect();
        let err = PointSet::new(pts, GeomCfg::default()).unwrap_err();
        assert!(matches!(err, InputError::TooManyPoints { .. }));
        assert!(err.to_string().contains("at most 64"));
    }

    #[test]
    fn eps_controls_near_collinear_rejection() {
        // area of the triple is 0.02
        let pts = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.02]];
        assert!(PointSet::new(pts.clone(), GeomCfg::with_eps(1e-2)).is_ok());
        assert!(PointSet::new(pts, GeomCfg::with_eps(5e-2)).is_err());
    }
}
