//! Random point sets in general position (rejection sampling + replay tokens).
//!
//! Purpose
//! - Supply the solvers with reproducible, validated `PointSet`s.
//!
//! Model
//! - General position: draw points uniformly in `[0, width) × [0, height)`,
//!   rejecting a candidate that repeats a height or is eps-collinear with any
//!   pair already placed. Rejections retry up to `max_attempts` draws.
//! - Convex position: draw angles on a circle of radius `r`; redraw the whole
//!   set if validation fails.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::fmt;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::point_set::{InputError, PointSet, MAX_POINTS};
use super::predicates::signed_area;
use super::types::{GeomCfg, Pt};

/// Sampler errors.
#[derive(Clone, Debug, PartialEq)]
pub enum GeneratorError {
    InvalidParams { reason: String },
    Exhausted { attempts: u32, placed: usize },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid sampler params: {reason}"),
            Self::Exhausted { attempts, placed } => write!(
                f,
                "no general-position sample after {attempts} draws ({placed} points placed)"
            ),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the next sample in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// General-position sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct PointCfg {
    pub count: usize,
    pub width: f64,
    pub height: f64,
    /// Total candidate draws allowed before giving up.
    pub max_attempts: u32,
}

impl Default for PointCfg {
    fn default() -> Self {
        Self {
            count: 8,
            width: 1000.0,
            height: 1000.0,
            max_attempts: 100_000,
        }
    }
}

impl PointCfg {
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if !(2..=MAX_POINTS).contains(&self.count) {
            return Err(GeneratorError::invalid(format!(
                "count must be in 2..={MAX_POINTS}, got {}",
                self.count
            )));
        }
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(GeneratorError::invalid("window must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(GeneratorError::invalid("window must have positive extent"));
        }
        Ok(())
    }
}

/// Draw `cfg.count` points in general position under `geom.eps`.
pub fn draw_general_position(
    cfg: PointCfg,
    geom: GeomCfg,
    tok: ReplayToken,
) -> Result<PointSet, GeneratorError> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let mut pts: Vec<Pt> = Vec::with_capacity(cfg.count);
    let mut attempts = 0u32;
    while pts.len() < cfg.count {
        if attempts >= cfg.max_attempts {
            return Err(GeneratorError::Exhausted {
                attempts,
                placed: pts.len(),
            });
        }
        attempts += 1;
        let cand = Vector2::new(
            rng.gen_range(0.0..cfg.width),
            rng.gen_range(0.0..cfg.height),
        );
        if fits_general_position(&pts, cand, geom.eps) {
            pts.push(cand);
        } else {
            tracing::trace!(attempts, placed = pts.len(), "rejected candidate point");
        }
    }
    PointSet::new(pts, geom).map_err(|e| GeneratorError::invalid(e.to_string()))
}

fn fits_general_position(placed: &[Pt], cand: Pt, eps: f64) -> bool {
    if placed.iter().any(|p| p.y == cand.y) {
        return false;
    }
    for (i, &a) in placed.iter().enumerate() {
        for &b in &placed[i + 1..] {
            if signed_area(a, b, cand).abs() <= eps {
                return false;
            }
        }
    }
    true
}

/// Draw `count` points on a circle of radius `radius` around the origin.
///
/// Every subset of the result is in convex position.
pub fn draw_convex_position(
    count: usize,
    radius: f64,
    geom: GeomCfg,
    tok: ReplayToken,
    max_attempts: u32,
) -> Result<PointSet, GeneratorError> {
    if !(2..=MAX_POINTS).contains(&count) {
        return Err(GeneratorError::invalid(format!(
            "count must be in 2..={MAX_POINTS}, got {count}"
        )));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(GeneratorError::invalid("radius must be finite and positive"));
    }
    let mut rng = tok.to_std_rng();
    for attempt in 0..max_attempts {
        let pts: Vec<Pt> = (0..count)
            .map(|_| {
                let theta = rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI);
                Vector2::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        match PointSet::new(pts, geom) {
            Ok(set) => return Ok(set),
            Err(InputError::HeightCollision { .. } | InputError::CollinearTriple { .. }) => {
                tracing::trace!(attempt, "convex sample not in general position, redrawing");
            }
            Err(e) => return Err(GeneratorError::invalid(e.to_string())),
        }
    }
    Err(GeneratorError::Exhausted {
        attempts: max_attempts,
        placed: 0,
    })
}
