//! Basic planar types and the tolerance shared by all predicates.
//!
//! - `GeomCfg`: the one epsilon used for orientation/collinearity decisions.
//! - `Segment`: directed segment `from → to`.
//! - `Orientation`: side of a directed segment a point lies on.

use nalgebra::Vector2;

/// Plane point. Heights are read from `y`.
pub type Pt = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// `eps` bounds `|signed_area|` for a point to count as collinear with a
/// segment. It is in squared source units, so it should scale with the
/// coordinate range of the sampler (the default suits a 1000×1000 window).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps: 1e-2 }
    }
}

impl GeomCfg {
    #[inline]
    pub fn with_eps(eps: f64) -> Self {
        Self { eps }
    }
}

/// Which side of a directed segment a point lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Strictly right of `from → to` (negative signed area).
    Right,
    /// Within `eps` of the supporting line.
    Collinear,
    /// Strictly left of `from → to` (positive signed area).
    Left,
}

impl Orientation {
    /// Sign as −1/0/+1.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Right => -1,
            Orientation::Collinear => 0,
            Orientation::Left => 1,
        }
    }
}

/// Directed segment `from → to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Pt,
    pub to: Pt,
}

impl Segment {
    #[inline]
    pub fn new(from: Pt, to: Pt) -> Self {
        Self { from, to }
    }

    /// Same segment, opposite direction.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// `(min x, max x)` of the two endpoints.
    #[inline]
    pub fn x_range(&self) -> (f64, f64) {
        (self.from.x.min(self.to.x), self.from.x.max(self.to.x))
    }

    #[inline]
    pub fn is_ascending(&self) -> bool {
        self.to.y > self.from.y
    }
}
