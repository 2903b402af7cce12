//! Batch drivers: every pattern of one length against one or more point sets.
//!
//! - `enumerate_patterns`: all `2^(n-1)` patterns on one set, one shared
//!   `DpSession`, per-pattern counts next to the oracle bound.
//! - `compare_point_sets`: the same sweep over several sets (one session
//!   each), reporting per-pattern min/max.
//!
//! Progress reporting and result display are observers the caller attaches
//! (`BatchObserver`, `ResultSink`); they see results but never steer the
//! sweep.

use std::fmt;

use crate::dp::{DpSession, Solution, SolveError};
use crate::geom::{GeomCfg, PointSet, Segment};
use crate::oracle::{CountingOracle, OracleError};
use crate::pattern::{PathString, PatternError};

/// Count for one pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternReport {
    pub pattern: PathString,
    /// Paths the DP found.
    pub solutions: usize,
    /// Oracle bound for the pattern.
    pub bound: u128,
}

/// Called once per solved pattern, in enumeration order.
pub trait BatchObserver {
    fn pattern_solved(
        &mut self,
        index: u64,
        report: &PatternReport,
        points: &PointSet,
        solutions: &[Solution],
    );
}

impl BatchObserver for () {
    fn pattern_solved(&mut self, _: u64, _: &PatternReport, _: &PointSet, _: &[Solution]) {}
}

/// Consumer of drawn paths (display, logging).
pub trait ResultSink {
    fn accept(&mut self, points: &PointSet, segments: &[Segment]);
}

/// Feed each solution to `sink` as a segment list.
pub fn emit_solutions<S: ResultSink + ?Sized>(
    points: &PointSet,
    solutions: &[Solution],
    sink: &mut S,
) {
    for sol in solutions {
        let segments: Vec<Segment> = sol.segments(points).collect();
        sink.accept(points, &segments);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchError {
    Solve(SolveError),
    Oracle(OracleError),
    /// `compare_point_sets` needs at least one set, all of the same size.
    MixedSizes { expected: usize, got: usize },
    NoPointSets,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solve(e) => write!(f, "solve failed: {e}"),
            Self::Oracle(e) => write!(f, "oracle failed: {e}"),
            Self::MixedSizes { expected, got } => {
                write!(f, "point sets differ in size: {expected} vs {got}")
            }
            Self::NoPointSets => write!(f, "no point sets given"),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Solve(e) => Some(e),
            Self::Oracle(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SolveError> for BatchError {
    fn from(e: SolveError) -> Self {
        Self::Solve(e)
    }
}

impl From<OracleError> for BatchError {
    fn from(e: OracleError) -> Self {
        Self::Oracle(e)
    }
}

impl From<PatternError> for BatchError {
    fn from(e: PatternError) -> Self {
        Self::Solve(SolveError::Pattern(e))
    }
}

/// Result of `enumerate_patterns`.
#[derive(Clone, Debug)]
pub struct BatchSummary {
    pub reports: Vec<PatternReport>,
    /// Memo entries the session ended with.
    pub memo_entries: usize,
}

impl BatchSummary {
    /// Crossing-free Hamiltonian paths found over all patterns: a lower bound
    /// on the number of such paths on the set.
    pub fn total_paths(&self) -> usize {
        self.reports.iter().map(|r| r.solutions).sum()
    }

    /// Patterns with no path found.
    pub fn infeasible(&self) -> impl Iterator<Item = &PatternReport> {
        self.reports.iter().filter(|r| r.solutions == 0)
    }

    pub fn min_solutions(&self) -> Option<&PatternReport> {
        self.reports.iter().min_by_key(|r| r.solutions)
    }
}

/// Solve every pattern of length `points.len() - 1` with one shared session.
pub fn enumerate_patterns<O: BatchObserver + ?Sized>(
    points: &PointSet,
    cfg: GeomCfg,
    observer: &mut O,
) -> Result<BatchSummary, BatchError> {
    let len = points.len() - 1;
    let mut session = DpSession::new(points, cfg);
    let mut oracle = CountingOracle::new();
    let mut reports = Vec::with_capacity(1usize << len.min(20));
    for (index, pattern) in (0u64..).zip(PathString::all(len)?) {
        let bound = oracle.count(pattern)?;
        let solutions = session.solve(pattern)?;
        let report = PatternReport {
            pattern,
            solutions: solutions.len(),
            bound,
        };
        tracing::debug!(%pattern, solutions = report.solutions, bound = %bound, "pattern solved");
        observer.pattern_solved(index, &report, points, solutions);
        reports.push(report);
    }
    let memo_entries = session.memo().len();
    tracing::debug!(points = points.len(), memo_entries, "batch finished");
    Ok(BatchSummary {
        reports,
        memo_entries,
    })
}

/// Per-pattern spread across several point sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialRow {
    pub pattern: PathString,
    pub min: usize,
    pub max: usize,
    pub bound: u128,
}

/// Solve every pattern on every set (one session per set).
pub fn compare_point_sets(sets: &[PointSet], cfg: GeomCfg) -> Result<Vec<TrialRow>, BatchError> {
    let first = sets.first().ok_or(BatchError::NoPointSets)?;
    let n = first.len();
    if let Some(other) = sets.iter().find(|s| s.len() != n) {
        return Err(BatchError::MixedSizes {
            expected: n,
            got: other.len(),
        });
    }
    let mut sessions: Vec<DpSession<'_>> = sets.iter().map(|s| DpSession::new(s, cfg)).collect();
    let mut oracle = CountingOracle::new();
    let mut rows = Vec::new();
    for pattern in PathString::all(n - 1)? {
        let mut min = usize::MAX;
        let mut max = 0;
        for session in sessions.iter_mut() {
            let count = session.solve(pattern)?.len();
            min = min.min(count);
            max = max.max(count);
        }
        rows.push(TrialRow {
            pattern,
            min,
            max,
            bound: oracle.count(pattern)?,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::rand::{draw_general_position, PointCfg, ReplayToken};
    use nalgebra::vector;

    fn seeded(n: usize, seed: u64) -> PointSet {
        draw_general_position(
            PointCfg::with_count(n),
            GeomCfg::default(),
            ReplayToken::new(seed, 0),
        )
        .unwrap()
    }

    struct Recorder {
        seen: Vec<(u64, String, usize)>,
    }

    impl BatchObserver for Recorder {
        fn pattern_solved(
            &mut self,
            index: u64,
            report: &PatternReport,
            _points: &PointSet,
            solutions: &[Solution],
        ) {
            assert_eq!(report.solutions, solutions.len());
            self.seen
                .push((index, report.pattern.to_string(), report.solutions));
        }
    }

    #[test]
    fn observer_sees_every_pattern_in_order() {
        let points = seeded(5, 1);
        let mut rec = Recorder { seen: Vec::new() };
        let summary = enumerate_patterns(&points, GeomCfg::default(), &mut rec).unwrap();
        assert_eq!(rec.seen.len(), 16);
        assert_eq!(rec.seen[0].1, "UUUU");
        assert_eq!(rec.seen[15].1, "DDDD");
        assert!(rec.seen.iter().enumerate().all(|(i, s)| s.0 == i as u64));
        assert_eq!(summary.reports.len(), 16);
        assert!(summary.reports.iter().all(|r| r.solutions as u128 <= r.bound));
        assert!(summary.memo_entries >= 16);
    }

    #[test]
    fn monotone_patterns_always_have_one_path() {
        let points = seeded(7, 5);
        let summary = enumerate_patterns(&points, GeomCfg::default(), &mut ()).unwrap();
        let first = summary.reports.first().unwrap();
        let last = summary.reports.last().unwrap();
        assert_eq!((first.pattern.to_string().as_str(), first.solutions), ("UUUUUU", 1));
        assert_eq!((last.pattern.to_string().as_str(), last.solutions), ("DDDDDD", 1));
        assert!(summary.total_paths() >= summary.reports.len() - summary.infeasible().count());
        assert!(summary.min_solutions().is_some());
    }

    #[test]
    fn trials_bracket_each_set() {
        let sets: Vec<PointSet> = (0..3).map(|s| seeded(5, 100 + s)).collect();
        let rows = compare_point_sets(&sets, GeomCfg::default()).unwrap();
        assert_eq!(rows.len(), 16);
        let single = enumerate_patterns(&sets[1], GeomCfg::default(), &mut ()).unwrap();
        for (row, rep) in rows.iter().zip(&single.reports) {
            assert_eq!(row.pattern, rep.pattern);
            assert!(row.min <= rep.solutions && rep.solutions <= row.max);
            assert!(row.max as u128 <= row.bound);
        }
    }

    #[test]
    fn trials_reject_bad_input() {
        assert_eq!(
            compare_point_sets(&[], GeomCfg::default()).unwrap_err(),
            BatchError::NoPointSets
        );
        let sets = vec![seeded(4, 1), seeded(5, 2)];
        assert_eq!(
            compare_point_sets(&sets, GeomCfg::default()).unwrap_err(),
            BatchError::MixedSizes {
                expected: 4,
                got: 5
            }
        );
    }

    struct CollectSink(Vec<Vec<Segment>>);

    impl ResultSink for CollectSink {
        fn accept(&mut self, _points: &PointSet, segments: &[Segment]) {
            self.0.push(segments.to_vec());
        }
    }

    #[test]
    fn sink_receives_segments() {
        let points = PointSet::new(
            vec![vector![0.0, 0.0], vector![1.0, 2.0], vector![2.0, 1.0]],
            GeomCfg::default(),
        )
        .unwrap();
        let sols = crate::dp::solve_once(&points, "UD".parse().unwrap(), GeomCfg::default())
            .unwrap();
        let mut sink = CollectSink(Vec::new());
        emit_solutions(&points, &sols, &mut sink);
        assert_eq!(sink.0.len(), 2);
        for segs in &sink.0 {
            assert_eq!(segs.len(), 2);
            assert!(segs[0].is_ascending());
            assert!(!segs[1].is_ascending());
            assert_eq!(segs[0].to, segs[1].from);
        }
    }
}
