//! Per-session memo table for the DP solver.
//!
//! Keys are bare `PathString`s: within one session the pattern length fixes
//! the point subset (the `len + 1` lowest points), so no point data is part of
//! the key. That is only sound while the table is tied to a single point set,
//! which is why `DpSession` owns its `Memo` and there is no shared instance.

use std::collections::HashMap;
use std::rc::Rc;

use super::types::Solution;
use crate::pattern::PathString;

/// Insert-only map from pattern to every path built for it.
#[derive(Debug)]
pub struct Memo {
    table: HashMap<PathString, Rc<Vec<Solution>>>,
}

// No `Default`: a memo only makes sense next to the point set it was built on.
#[allow(clippy::new_without_default)]
impl Memo {
    /// Empty table for a new session.
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, key: PathString) -> Option<Rc<Vec<Solution>>> {
        self.table.get(&key).cloned()
    }

    #[inline]
    pub fn get_slice(&self, key: PathString) -> Option<&[Solution]> {
        self.table.get(&key).map(|v| v.as_slice())
    }

    #[inline]
    pub fn contains(&self, key: PathString) -> bool {
        self.table.contains_key(&key)
    }

    /// Store `solutions` under `key`. An existing entry is kept and returned;
    /// entries are never overwritten.
    pub fn insert(&mut self, key: PathString, solutions: Vec<Solution>) -> Rc<Vec<Solution>> {
        let entry = self.table.entry(key).or_insert_with(|| Rc::new(solutions));
        Rc::clone(entry)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total number of stored paths across all entries.
    pub fn stored_paths(&self) -> usize {
        self.table.values().map(|v| v.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_never_overwrites() {
        let mut memo = Memo::new();
        let key: PathString = "U".parse().unwrap();
        let first = memo.insert(key, vec![Solution::from_vertices(vec![0, 1])]);
        let second = memo.insert(key, Vec::new());
        assert_eq!(first.len(), 1);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.stored_paths(), 1);
        assert!(memo.contains(key));
        assert_eq!(memo.get_slice(key).map(|s| s.len()), Some(1));
    }
}
