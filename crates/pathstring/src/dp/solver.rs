//! Memoized recursion over the position of the highest point.
//!
//! For a pattern `s` of length `L` over points `0..=L` (ascending height),
//! point `L` is the top. In any path realizing `s` the top is either
//! - the first vertex (`s[0] == D`, Case I),
//! - the last vertex (`s[L-1] == U`, Case II), or
//! - an interior vertex at a peak `s[i..=i+1] == UD` (Case III).
//!
//! Removing the top from such a path leaves a path over `0..L` whose pattern
//! is `s[1..]`, `s[..L-1]`, or `s` with the peak collapsed to one step (either
//! `U` or `D`, depending on the two neighbours). Each case rebuilds candidates
//! from the memoized sub-solutions and keeps those whose new edges cross
//! nothing. Case III only sees paths whose shortcut edge (neighbour to
//! neighbour) was itself crossing-free, so results are a lower bound on the
//! true count, never an over-count.

use std::rc::Rc;

use super::memo::Memo;
use super::types::{SolveError, Solution};
use crate::geom::{GeomCfg, PointSet, Segment};
use crate::pattern::{PathString, Step};

/// One analysis session: a fixed point set, a tolerance, and its memo table.
///
/// Create a new session per point set. Reusing one across patterns of the
/// same set is the intended way to share subproblems.
#[derive(Debug)]
pub struct DpSession<'a> {
    points: &'a PointSet,
    cfg: GeomCfg,
    memo: Memo,
}

impl<'a> DpSession<'a> {
    pub fn new(points: &'a PointSet, cfg: GeomCfg) -> Self {
        tracing::debug!(points = points.len(), eps = cfg.eps, "new dp session");
        Self {
            points,
            cfg,
            memo: Memo::new(),
        }
    }

    #[inline]
    pub fn points(&self) -> &'a PointSet {
        self.points
    }

    #[inline]
    pub fn cfg(&self) -> GeomCfg {
        self.cfg
    }

    #[inline]
    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    /// All paths over the whole set realizing `pattern`.
    ///
    /// `pattern.len()` must be `points.len() - 1`. An empty slice means the
    /// recursion found no crossing-free realization.
    pub fn solve(&mut self, pattern: PathString) -> Result<&[Solution], SolveError> {
        if pattern.point_count() != self.points.len() {
            return Err(SolveError::LengthMismatch {
                needed: pattern.point_count(),
                available: self.points.len(),
            });
        }
        Ok(self.solve_unchecked(pattern))
    }

    /// Like `solve`, over the `pattern.len() + 1` lowest points.
    pub fn solve_lowest(&mut self, pattern: PathString) -> Result<&[Solution], SolveError> {
        if pattern.point_count() > self.points.len() {
            return Err(SolveError::LengthMismatch {
                needed: pattern.point_count(),
                available: self.points.len(),
            });
        }
        Ok(self.solve_unchecked(pattern))
    }

    /// Parse `pattern` (case-insensitive) and `solve` it.
    pub fn solve_str(&mut self, pattern: &str) -> Result<&[Solution], SolveError> {
        let pattern: PathString = pattern.parse()?;
        self.solve(pattern)
    }

    fn solve_unchecked(&mut self, pattern: PathString) -> &[Solution] {
        self.solutions(pattern);
        self.memo.get_slice(pattern).unwrap_or(&[])
    }

    fn solutions(&mut self, pattern: PathString) -> Rc<Vec<Solution>> {
        if let Some(hit) = self.memo.get(pattern) {
            return hit;
        }
        let built = self.build(pattern);
        self.memo.insert(pattern, built)
    }

    fn build(&mut self, s: PathString) -> Vec<Solution> {
        let top = s.len();
        if s.len() == 1 {
            let vertices = match s.first() {
                Step::Up => vec![0, 1],
                Step::Down => vec![1, 0],
            };
            return vec![Solution::from_vertices(vertices)];
        }

        let mut out = Vec::new();

        // Case I: the path starts at the top point.
        if s.first() == Step::Down {
            if let Some(sub) = s.tail() {
                for sol in self.solutions(sub).iter() {
                    out.extend(self.prepend_top(sol, top));
                }
            }
        }

        // Case II: the path ends at the top point.
        if s.last() == Step::Up {
            if let Some(sub) = s.init() {
                for sol in self.solutions(sub).iter() {
                    out.extend(self.append_top(sol, top));
                }
            }
        }

        // Case III: the top point sits on a peak and splits edge i.
        let peaks: Vec<usize> = s.peaks().collect();
        for i in peaks {
            for merged in [Step::Up, Step::Down] {
                let Some(sub) = s.collapse(i, merged) else {
                    continue;
                };
                for sol in self.solutions(sub).iter() {
                    out.extend(self.split_edge(sol, i, top));
                }
            }
        }
        out
    }

    #[inline]
    fn seg(&self, a: usize, b: usize) -> Segment {
        Segment::new(self.points.get(a), self.points.get(b))
    }

    /// `top → first`, checked against every edge but the first.
    fn prepend_top(&self, sol: &Solution, top: usize) -> Option<Solution> {
        let eps = self.cfg.eps;
        let new_edge = self.seg(top, sol.first());
        let v = sol.vertices();
        if (1..sol.edge_count()).any(|k| self.seg(v[k], v[k + 1]).intersects_eps(&new_edge, eps)) {
            return None;
        }
        let mut vertices = Vec::with_capacity(v.len() + 1);
        vertices.push(top);
        vertices.extend_from_slice(v);
        Some(Solution::from_vertices(vertices))
    }

    /// `last → top`, checked against every edge but the last.
    fn append_top(&self, sol: &Solution, top: usize) -> Option<Solution> {
        let eps = self.cfg.eps;
        let new_edge = self.seg(sol.last(), top);
        let v = sol.vertices();
        let m = sol.edge_count();
        if (0..m - 1).any(|k| self.seg(v[k], v[k + 1]).intersects_eps(&new_edge, eps)) {
            return None;
        }
        let mut vertices = Vec::with_capacity(v.len() + 1);
        vertices.extend_from_slice(v);
        vertices.push(top);
        Some(Solution::from_vertices(vertices))
    }

    /// Replace edge `i` (`a → b`) by `a → top → b`.
    ///
    /// The left neighbour shares `a` with the first new edge and is only
    /// checked against the second; the right neighbour symmetrically.
    fn split_edge(&self, sol: &Solution, i: usize, top: usize) -> Option<Solution> {
        let eps = self.cfg.eps;
        let v = sol.vertices();
        let up = self.seg(v[i], top);
        let down = self.seg(top, v[i + 1]);
        for k in 0..sol.edge_count() {
            if k == i {
                continue;
            }
            let e = self.seg(v[k], v[k + 1]);
            let hit = if k + 1 == i {
                e.intersects_eps(&down, eps)
            } else if k == i + 1 {
                e.intersects_eps(&up, eps)
            } else {
                e.intersects_eps(&up, eps) || e.intersects_eps(&down, eps)
            };
            if hit {
                return None;
            }
        }
        let mut vertices = Vec::with_capacity(v.len() + 1);
        vertices.extend_from_slice(&v[..=i]);
        vertices.push(top);
        vertices.extend_from_slice(&v[i + 1..]);
        Some(Solution::from_vertices(vertices))
    }
}
