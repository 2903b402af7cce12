//! Counting oracle: how many vertex orders realize a pattern, ignoring geometry.
//!
//! The recursion is the DP's case split (top point first, last, or on a peak
//! with the peak collapsed to `U` or `D`) with every candidate accepted.
//! Each order of `n` distinct heights is reached by exactly one branch, so
//! `count(s)` is the number of height orders with up/down signature `s`, and
//! it bounds the DP's output for `s` on any point set.

use std::collections::HashMap;
use std::fmt;

use crate::pattern::{PathString, Step};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OracleError {
    /// The count for `pattern` does not fit in `u128`.
    Overflow { pattern: PathString },
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { pattern } => write!(f, "count for {pattern} overflows u128"),
        }
    }
}

impl std::error::Error for OracleError {}

/// Memoized counter. Counts do not depend on coordinates, so one oracle can
/// serve any number of point sets.
#[derive(Debug, Default)]
pub struct CountingOracle {
    memo: HashMap<PathString, u128>,
}

impl CountingOracle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub fn count(&mut self, s: PathString) -> Result<u128, OracleError> {
        if let Some(&hit) = self.memo.get(&s) {
            return Ok(hit);
        }
        let total = if s.len() == 1 {
            1
        } else {
            let mut parts: Vec<PathString> = Vec::new();
            if s.first() == Step::Down {
                parts.extend(s.tail());
            }
            if s.last() == Step::Up {
                parts.extend(s.init());
            }
            for i in s.peaks() {
                parts.extend(s.collapse(i, Step::Up));
                parts.extend(s.collapse(i, Step::Down));
            }
            let mut total: u128 = 0;
            for part in parts {
                let c = self.count(part)?;
                total = total
                    .checked_add(c)
                    .ok_or(OracleError::Overflow { pattern: s })?;
            }
            total
        };
        self.memo.insert(s, total);
        Ok(total)
    }
}
