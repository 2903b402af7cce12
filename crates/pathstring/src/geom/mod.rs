//! Planar geometry for path strings (points, directed segments, hulls).
//!
//! Purpose
//! - Provide the single set of eps-aware predicates (signed area, orientation,
//!   containment, intersection) shared by the DP solver and hull jumping.
//! - Keep the tolerance explicit: every near-collinear decision takes `eps`
//!   (usually `GeomCfg::eps`) instead of reading a hidden constant.
//!
//! Layout
//! - `types`: `Pt`, `Segment`, `Orientation`, `GeomCfg`.
//! - `predicates`: signed area and the segment tests.
//! - `hull`: Graham scan and the single Jarvis march step.
//! - `point_set`: validated, height-sorted point sets.
//! - `rand`: reproducible general-position and convex-position samplers.
//!
//! Code cross-refs: `dp::DpSession`, `hull_jump::hull_jump`.

pub mod hull;
mod point_set;
mod predicates;
pub mod rand;
mod types;

pub use hull::{convex_hull, convex_hull_indices, jarvis_step, JarvisNeighbors};
pub use point_set::{InputError, PointSet, MAX_POINTS};
pub use predicates::signed_area;
pub use types::{GeomCfg, Orientation, Pt, Segment};

#[cfg(test)]
mod tests;
