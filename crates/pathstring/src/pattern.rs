//! Path strings: words over {U, D} describing a path's height profile.
//!
//! Representation
//! - `PathString` packs up to `MAX_LEN` steps into a `u64` (bit `i` set means
//!   step `i` is `D`) plus a length. It is `Copy` and hashes cheaply, so the DP
//!   and oracle memo tables key on it directly instead of on owned strings.
//! - The length of a pattern also fixes the point subset it refers to
//!   (`len + 1` lowest points), so the pattern alone is a complete memo key.
//!
//! Subproblem operations mirror the three DP cases: `tail` (drop the first
//! step), `init` (drop the last step), and `collapse` (merge a `UD` pair into a
//! single step).

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::geom::{Pt, MAX_POINTS};

/// Longest supported pattern.
pub const MAX_LEN: usize = MAX_POINTS - 1;

/// One step of a path: the next vertex is higher (`Up`) or lower (`Down`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Up,
    Down,
}

impl Step {
    /// Direction of the move `from → to` (heights are distinct).
    #[inline]
    pub fn between(from: Pt, to: Pt) -> Self {
        if to.y > from.y {
            Step::Up
        } else {
            Step::Down
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Step::Up => 'U',
            Step::Down => 'D',
        }
    }

    #[inline]
    fn bit(self) -> u64 {
        match self {
            Step::Up => 0,
            Step::Down => 1,
        }
    }
}

/// Pattern parse errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    Empty,
    TooLong { len: usize, max: usize },
    InvalidChar { index: usize, ch: char },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "path string must not be empty"),
            Self::TooLong { len, max } => {
                write!(f, "path string of length {len} exceeds maximum {max}")
            }
            Self::InvalidChar { index, ch } => {
                write!(f, "invalid character {ch:?} at position {index} (expected U or D)")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Non-empty word over {U, D} of length at most `MAX_LEN`.
///
/// Invariant: bits at positions `>= len` are zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathString {
    len: u8,
    bits: u64,
}

#[inline]
fn mask(len: usize) -> u64 {
    (1u64 << len) - 1
}

impl PathString {
    /// Build from steps.
    pub fn from_steps(steps: &[Step]) -> Result<Self, PatternError> {
        if steps.is_empty() {
            return Err(PatternError::Empty);
        }
        if steps.len() > MAX_LEN {
            return Err(PatternError::TooLong {
                len: steps.len(),
                max: MAX_LEN,
            });
        }
        let bits = steps
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, s)| acc | (s.bit() << i));
        Ok(Self {
            len: steps.len() as u8,
            bits,
        })
    }

    /// The `index`-th pattern of length `len` in enumeration order.
    ///
    /// Reads `index` as a `len`-digit binary number, most significant digit
    /// first, with `0 → U` and `1 → D`; index 0 is `UU…U`.
    pub fn from_index(len: usize, index: u64) -> Result<Self, PatternError> {
        if len == 0 {
            return Err(PatternError::Empty);
        }
        if len > MAX_LEN {
            return Err(PatternError::TooLong { len, max: MAX_LEN });
        }
        Ok(Self::from_index_unchecked(len, index))
    }

    /// All `2^len` patterns of length `len`, in `from_index` order.
    pub fn all(len: usize) -> Result<impl Iterator<Item = PathString>, PatternError> {
        Self::from_index(len, 0)?;
        Ok((0..(1u64 << len)).map(move |i| Self::from_index_unchecked(len, i)))
    }

    fn from_index_unchecked(len: usize, index: u64) -> Self {
        let bits = (0..len).fold(0u64, |acc, p| acc | (((index >> (len - 1 - p)) & 1) << p));
        Self {
            len: len as u8,
            bits,
        }
    }

    /// Uniformly random pattern of length `len`.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Result<Self, PatternError> {
        if len == 0 {
            return Err(PatternError::Empty);
        }
        if len > MAX_LEN {
            return Err(PatternError::TooLong { len, max: MAX_LEN });
        }
        Ok(Self {
            len: len as u8,
            bits: rng.gen::<u64>() & mask(len),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; patterns are non-empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of points a path with this profile visits.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.len() + 1
    }

    #[inline]
    pub fn get(&self, i: usize) -> Step {
        debug_assert!(i < self.len());
        if (self.bits >> i) & 1 == 1 {
            Step::Down
        } else {
            Step::Up
        }
    }

    #[inline]
    pub fn first(&self) -> Step {
        self.get(0)
    }

    #[inline]
    pub fn last(&self) -> Step {
        self.get(self.len() - 1)
    }

    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Drop the first step. `None` for length-1 patterns.
    #[inline]
    pub fn tail(&self) -> Option<Self> {
        (self.len > 1).then(|| Self {
            len: self.len - 1,
            bits: self.bits >> 1,
        })
    }

    /// Drop the last step. `None` for length-1 patterns.
    #[inline]
    pub fn init(&self) -> Option<Self> {
        (self.len > 1).then(|| Self {
            len: self.len - 1,
            bits: self.bits & mask(self.len() - 1),
        })
    }

    /// Replace steps `i` and `i + 1` by the single step `step`.
    pub fn collapse(&self, i: usize, step: Step) -> Option<Self> {
        if i + 1 >= self.len() {
            return None;
        }
        let low = self.bits & mask(i);
        let high = self.bits >> (i + 2);
        Some(Self {
            len: self.len - 1,
            bits: low | (step.bit() << i) | (high << (i + 1)),
        })
    }

    /// Positions `i` with step `i` = U and step `i + 1` = D.
    pub fn peaks(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len().saturating_sub(1))
            .filter(move |&i| self.get(i) == Step::Up && self.get(i + 1) == Step::Down)
    }
}

impl FromStr for PathString {
    type Err = PatternError;

    /// Case-insensitive parse of a `U`/`D` word.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .chars()
            .enumerate()
            .map(|(index, ch)| match ch.to_ascii_uppercase() {
                'U' => Ok(Step::Up),
                'D' => Ok(Step::Down),
                _ => Err(PatternError::InvalidChar { index, ch }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_steps(&steps)
    }
}

impl fmt::Display for PathString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in self.steps() {
            write!(f, "{}", s.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for PathString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathString({self})")
    }
}
