//! Solution paths and solver errors.
//!
//! A `Solution` stores vertex indices into the height-sorted `PointSet`
//! rather than owned segments; segments are materialized on demand.

use std::fmt;

use crate::geom::{PointSet, Segment};
use crate::pattern::{PathString, PatternError, Step};

/// Directed Hamiltonian path over the `len()` lowest points of a `PointSet`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Solution {
    vertices: Vec<usize>,
}

impl Solution {
    #[inline]
    pub fn from_vertices(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }

    /// Visit order, as indices into the height-sorted point set.
    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    #[inline]
    pub fn first(&self) -> usize {
        self.vertices[0]
    }

    #[inline]
    pub fn last(&self) -> usize {
        self.vertices[self.vertices.len() - 1]
    }

    /// Edge `k` as a directed segment.
    #[inline]
    pub fn segment(&self, points: &PointSet, k: usize) -> Segment {
        Segment::new(
            points.get(self.vertices[k]),
            points.get(self.vertices[k + 1]),
        )
    }

    pub fn segments<'a>(&'a self, points: &'a PointSet) -> impl Iterator<Item = Segment> + 'a {
        self.vertices
            .windows(2)
            .map(move |w| Segment::new(points.get(w[0]), points.get(w[1])))
    }

    /// Height profile of the path.
    pub fn profile(&self, points: &PointSet) -> Result<PathString, PatternError> {
        let steps: Vec<Step> = self
            .vertices
            .windows(2)
            .map(|w| Step::between(points.get(w[0]), points.get(w[1])))
            .collect();
        PathString::from_steps(&steps)
    }

    /// Brute-force check that this is a simple path realizing `pattern`.
    ///
    /// Every non-adjacent edge pair is tested with `intersects_eps`.
    pub fn check(
        &self,
        points: &PointSet,
        pattern: PathString,
        eps: f64,
    ) -> Result<(), SolutionDefect> {
        let n = pattern.point_count();
        if self.vertices.len() != n || n > points.len() {
            return Err(SolutionDefect::WrongLength {
                expected: n,
                got: self.vertices.len(),
            });
        }
        let mut seen = vec![false; n];
        for &v in &self.vertices {
            if v >= n || seen[v] {
                return Err(SolutionDefect::NotHamiltonian { vertex: v });
            }
            seen[v] = true;
        }
        for (k, expected) in pattern.steps().enumerate() {
            let got = Step::between(
                points.get(self.vertices[k]),
                points.get(self.vertices[k + 1]),
            );
            if got != expected {
                return Err(SolutionDefect::WrongStep { at: k });
            }
        }
        let m = self.edge_count();
        for a in 0..m {
            let sa = self.segment(points, a);
            for b in (a + 2)..m {
                if sa.intersects_eps(&self.segment(points, b), eps) {
                    return Err(SolutionDefect::Crossing { edges: (a, b) });
                }
            }
        }
        Ok(())
    }
}

/// Why a path fails `Solution::check`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolutionDefect {
    WrongLength { expected: usize, got: usize },
    NotHamiltonian { vertex: usize },
    WrongStep { at: usize },
    Crossing { edges: (usize, usize) },
}

impl fmt::Display for SolutionDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, got } => {
                write!(f, "path visits {got} vertices, expected {expected}")
            }
            Self::NotHamiltonian { vertex } => {
                write!(f, "vertex {vertex} repeated or out of range")
            }
            Self::WrongStep { at } => write!(f, "step {at} has the wrong direction"),
            Self::Crossing { edges: (a, b) } => write!(f, "edges {a} and {b} intersect"),
        }
    }
}

impl std::error::Error for SolutionDefect {}

/// Errors from solver entry points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// The pattern needs `needed` points, the set has `available`.
    LengthMismatch { needed: usize, available: usize },
    Pattern(PatternError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { needed, available } => write!(
                f,
                "pattern addresses {needed} points but the set has {available}"
            ),
            Self::Pattern(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(e) => Some(e),
            Self::LengthMismatch { .. } => None,
        }
    }
}

impl From<PatternError> for SolveError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}
