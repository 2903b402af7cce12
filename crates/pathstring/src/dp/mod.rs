//! Path-string DP: enumerate crossing-free directed paths with a given
//! up/down profile.
//!
//! Purpose
//! - Given a height-sorted `PointSet` and a `PathString` of length `n - 1`,
//!   build the paths through all `n` points whose steps follow the pattern
//!   and whose edges pairwise do not meet (except consecutive edges at their
//!   shared vertex).
//!
//! Why this design
//! - Subproblems are "same question on the lowest `k` points", so a pattern
//!   is a complete key within one point set. `DpSession` owns the `Memo` and
//!   borrows the `PointSet`; a new point set means a new session.
//! - Solutions are vertex-index lists; segments are rebuilt from the
//!   immutable point array when needed.
//!
//! Layout: `types.rs` (Solution, errors), `memo.rs` (table), `solver.rs`
//! (recursion). Code cross-refs: `oracle::CountingOracle` mirrors the case
//! structure without geometry.

mod memo;
mod solver;
mod types;

pub use memo::Memo;
pub use solver::DpSession;
pub use types::{Solution, SolutionDefect, SolveError};

use crate::geom::{GeomCfg, PointSet};
use crate::pattern::PathString;

/// Solve one pattern in a throwaway session.
pub fn solve_once(
    points: &PointSet,
    pattern: PathString,
    cfg: GeomCfg,
) -> Result<Vec<Solution>, SolveError> {
    let mut session = DpSession::new(points, cfg);
    session.solve(pattern).map(|s| s.to_vec())
}
