//! Curated internal API (UNSTABLE).
//!
//! Important
//! - Not a public API. Re-exports here are a convenience for the CLI, benches
//!   and one-off probes; breaking changes are allowed.

// Geometry and point sets
pub use crate::geom::{
    convex_hull, convex_hull_indices, jarvis_step, signed_area, GeomCfg, InputError,
    JarvisNeighbors, Orientation, PointSet, Pt, Segment, MAX_POINTS,
};
// Samplers
pub use crate::geom::rand::{
    draw_convex_position, draw_general_position, GeneratorError, PointCfg, ReplayToken,
};
// Patterns
pub use crate::pattern::{PathString, PatternError, Step, MAX_LEN};
// Solvers
pub use crate::dp::{solve_once, DpSession, Memo, Solution, SolutionDefect, SolveError};
pub use crate::hull_jump::{cross_check, hull_jump, CrossCheck};
pub use crate::oracle::{CountingOracle, OracleError};
// Batch drivers
pub use crate::batch::{
    compare_point_sets, emit_solutions, enumerate_patterns, BatchError, BatchObserver,
    BatchSummary, PatternReport, ResultSink, TrialRow,
};
