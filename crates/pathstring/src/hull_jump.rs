//! Hull jumping: a second, heuristic path enumerator.
//!
//! Start at a hull vertex of the point set. Removing the current vertex
//! exposes a chain of the remaining set's hull (from its clockwise neighbour
//! to its counterclockwise neighbour); every chain vertex in the required
//! direction is a candidate next step. The chain is found with Jarvis steps
//! around the hole instead of rebuilding the hull.
//!
//! Every path produced this way is crossing-free (each new edge touches the
//! hull of the rest only at its endpoint), but the search is not exhaustive:
//! paths that step to an interior point of the remaining set are never
//! generated. Use it as a lower bound and a cross-check for `dp`, not as a
//! count.

use crate::dp::{DpSession, Solution, SolveError};
use crate::geom::{convex_hull_indices, jarvis_step, GeomCfg, JarvisNeighbors, PointSet, Pt};
use crate::pattern::{PathString, Step};

/// Paths found by hull jumping for `pattern` (length `points.len() - 1`).
pub fn hull_jump(points: &PointSet, pattern: PathString) -> Result<Vec<Solution>, SolveError> {
    if pattern.point_count() != points.len() {
        return Err(SolveError::LengthMismatch {
            needed: pattern.point_count(),
            available: points.len(),
        });
    }
    let mut jumper = Jumper {
        points,
        path: Vec::with_capacity(points.len()),
        out: Vec::new(),
    };
    let all: Vec<usize> = (0..points.len()).collect();
    for start in convex_hull_indices(points.points()) {
        jumper.path.push(start);
        jumper.recur(&all, start, pattern);
        jumper.path.clear();
    }
    Ok(jumper.out)
}

struct Jumper<'a> {
    points: &'a PointSet,
    path: Vec<usize>,
    out: Vec<Solution>,
}

impl Jumper<'_> {
    fn recur(&mut self, remaining: &[usize], cur: usize, pattern: PathString) {
        let here = self.points.get(cur);
        let Some(rest) = pattern.tail() else {
            if let Some(&last) = remaining.iter().find(|&&v| v != cur) {
                if Step::between(here, self.points.get(last)) == pattern.first() {
                    let mut vertices = self.path.clone();
                    vertices.push(last);
                    self.out.push(Solution::from_vertices(vertices));
                }
            }
            return;
        };
        let after: Vec<usize> = remaining.iter().copied().filter(|&v| v != cur).collect();
        let want = pattern.first();
        for cand in exposed_chain(self.points, remaining, cur).unwrap_or_default() {
            if Step::between(here, self.points.get(cand)) != want {
                continue;
            }
            self.path.push(cand);
            self.recur(&after, cand, rest);
            self.path.pop();
        }
    }
}

/// Hull neighbours of `pivot` within `subset`, as point-set indices.
fn neighbors(points: &PointSet, subset: &[usize], pivot: usize) -> Option<JarvisNeighbors> {
    let local: Vec<Pt> = subset.iter().map(|&v| points.get(v)).collect();
    let at = subset.iter().position(|&v| v == pivot)?;
    let nb = jarvis_step(&local, at)?;
    Some(JarvisNeighbors {
        next: subset[nb.next],
        prev: subset[nb.prev],
    })
}

/// Vertices of `hull(subset \ {cur})` visible from `cur`, walking from the
/// clockwise neighbour of `cur` to the counterclockwise one.
///
/// `cur` must be a hull vertex of `subset`. The walk is capped at
/// `subset.len()` steps; a tie on a hull edge can end it early, in which case
/// the chain is shorter than the true one.
pub(crate) fn exposed_chain(points: &PointSet, subset: &[usize], cur: usize) -> Option<Vec<usize>> {
    let around = neighbors(points, subset, cur)?;
    let (first, last) = (around.next, around.prev);
    if first == last {
        return Some(vec![first]);
    }
    let after: Vec<usize> = subset.iter().copied().filter(|&v| v != cur).collect();
    let mut came_from = neighbors(points, subset, first)?.other_than(cur);
    let mut at = first;
    let mut chain = vec![first];
    for _ in 0..subset.len() {
        if at == last {
            break;
        }
        let step = neighbors(points, &after, at)?.other_than(came_from);
        came_from = at;
        at = step;
        if chain.contains(&at) {
            break;
        }
        chain.push(at);
    }
    Some(chain)
}

/// Comparison of hull jumping against the DP for one pattern.
#[derive(Clone, Debug, Default)]
pub struct CrossCheck {
    pub hull_jump: usize,
    pub dp: usize,
    /// Hull-jumping paths failing the brute-force validity check.
    pub invalid: Vec<Solution>,
    /// Valid hull-jumping paths the DP did not produce.
    pub missing_from_dp: Vec<Solution>,
}

impl CrossCheck {
    #[inline]
    pub fn agrees(&self) -> bool {
        self.invalid.is_empty() && self.missing_from_dp.is_empty()
    }
}

/// Run both enumerators on `pattern` and report disagreements.
pub fn cross_check(
    points: &PointSet,
    pattern: PathString,
    cfg: GeomCfg,
) -> Result<CrossCheck, SolveError> {
    let jumped = hull_jump(points, pattern)?;
    let mut session = DpSession::new(points, cfg);
    let dp = session.solve(pattern)?;
    let mut report = CrossCheck {
        hull_jump: jumped.len(),
        dp: dp.len(),
        ..CrossCheck::default()
    };
    for sol in jumped {
        if sol.check(points, pattern, cfg.eps).is_err() {
            report.invalid.push(sol);
        } else if !dp.contains(&sol) {
            report.missing_from_dp.push(sol);
        }
    }
    Ok(report)
}
