//! Crossing-free directed paths with a prescribed up/down profile.
//!
//! Given `n` points in the plane (distinct heights, no three collinear) and a
//! string over `{U, D}` of length `n - 1`, enumerate the Hamiltonian paths
//! whose `k`-th edge goes up or down as the `k`-th character says and whose
//! edges do not cross.
//!
//! - `dp`: exact enumeration by recursion on the position of the top point.
//! - `oracle`: geometry-free upper bound (number of height orders per pattern).
//! - `hull_jump`: heuristic enumerator walking the shrinking convex hull.
//! - `batch`: all patterns of one length, single or multiple point sets.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - `api` collects the names callers usually need; module paths may move.

pub mod api;
pub mod batch;
pub mod dp;
pub mod geom;
pub mod hull_jump;
pub mod oracle;
pub mod pattern;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{GeomCfg, PointSet, Pt};
pub use pattern::{PathString, Step};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::batch::{enumerate_patterns, BatchObserver, PatternReport};
    pub use crate::dp::{DpSession, Solution};
    pub use crate::geom::rand::{draw_general_position, PointCfg, ReplayToken};
    pub use crate::geom::{GeomCfg, PointSet, Pt, Segment};
    pub use crate::oracle::CountingOracle;
    pub use crate::pattern::{PathString, Step};
    pub use nalgebra::Vector2 as Vec2;
}
