use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};
use pathstring::api::{
    compare_point_sets, cross_check, emit_solutions, enumerate_patterns, BatchObserver, DpSession,
    GeomCfg, PathString, PatternReport, PointSet, Solution,
};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod points;
mod provenance;
mod table;

use points::{write_json, JsonSink, PointArgs};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "pathstring")]
#[command(about = "Crossing-free path strings on random point sets")]
struct Cmd {
    /// Collinearity / containment tolerance
    #[arg(long, global = true, default_value_t = 1e-2)]
    eps: f64,

    /// Free-form label copied into provenance sidecars
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve one pattern (random if omitted) and optionally dump the paths as JSON
    Solve {
        #[command(flatten)]
        pts: PointArgs,
        #[arg(long)]
        pattern: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Re-check every path by brute force
        #[arg(long)]
        verify: bool,
    },
    /// Every pattern of length n-1 on one set; table of counts vs. the oracle bound
    Batch {
        #[command(flatten)]
        pts: PointArgs,
        /// .csv or .parquet
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = 20)]
        progress_every: u64,
    },
    /// Every pattern on several independent sets; per-pattern min/max
    Trials {
        #[command(flatten)]
        pts: PointArgs,
        #[arg(long, default_value_t = 5)]
        sets: u64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compare hull jumping against the DP
    HullJump {
        #[command(flatten)]
        pts: PointArgs,
        /// Single pattern; all patterns if omitted
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    ensure!(
        cmd.eps.is_finite() && cmd.eps >= 0.0,
        "--eps must be finite and non-negative"
    );
    let geom = GeomCfg::with_eps(cmd.eps);
    match cmd.action {
        Action::Solve {
            pts,
            pattern,
            out,
            verify,
        } => solve(&pts, pattern, out, verify, geom, cmd.tag),
        Action::Batch {
            pts,
            out,
            progress_every,
        } => batch(&pts, out, progress_every, geom, cmd.tag),
        Action::Trials { pts, sets, out } => trials(&pts, sets, out, geom, cmd.tag),
        Action::HullJump { pts, pattern } => hull_jump(&pts, pattern, geom),
        Action::Report => report(cmd.tag),
    }
}

fn pattern_for(points: &PointSet, pts: &PointArgs, given: Option<String>) -> Result<PathString> {
    match given {
        Some(s) => Ok(s.parse()?),
        None => {
            let mut rng = pts.token().next().to_std_rng();
            Ok(PathString::random(points.len() - 1, &mut rng)?)
        }
    }
}

fn solve(
    pts: &PointArgs,
    pattern: Option<String>,
    out: Option<PathBuf>,
    verify: bool,
    geom: GeomCfg,
    tag: Option<String>,
) -> Result<()> {
    let points = pts.load(geom)?;
    let pattern = pattern_for(&points, pts, pattern)?;
    let mut session = DpSession::new(&points, geom);
    let sols = session.solve(pattern)?.to_vec();
    tracing::info!(%pattern, solutions = sols.len(), memo = session.memo().len(), "solved");
    if verify {
        for sol in &sols {
            sol.check(&points, pattern, geom.eps).map_err(|d| {
                anyhow::anyhow!("path {:?} failed verification: {d}", sol.vertices())
            })?;
        }
        tracing::info!(paths = sols.len(), "verified");
    }
    for sol in &sols {
        println!("{}", format_path(sol));
    }
    if let Some(out) = out {
        let mut sink = JsonSink::new(pattern.to_string(), &points);
        emit_solutions(&points, &sols, &mut sink);
        write_json(&out, &sink.into_doc())?;
        let params = json!({
            "cmd": "solve",
            "pattern": pattern.to_string(),
            "points": points.len(),
            "seed": pts.seed,
            "index": pts.index,
            "eps": geom.eps,
        });
        write_sidecar(&out, &Payload::new(params, tag))?;
    }
    Ok(())
}

fn format_path(sol: &Solution) -> String {
    let parts: Vec<String> = sol.vertices().iter().map(|v| v.to_string()).collect();
    parts.join(" -> ")
}

/// Logs every `every`-th pattern.
struct Progress {
    every: u64,
    total: u64,
}

impl BatchObserver for Progress {
    fn pattern_solved(
        &mut self,
        index: u64,
        report: &PatternReport,
        _points: &PointSet,
        _solutions: &[Solution],
    ) {
        if self.every > 0 && index % self.every == 0 {
            tracing::info!(
                index,
                total = self.total,
                pattern = %report.pattern,
                solutions = report.solutions,
                "progress"
            );
        }
    }
}

fn batch(
    pts: &PointArgs,
    out: Option<PathBuf>,
    progress_every: u64,
    geom: GeomCfg,
    tag: Option<String>,
) -> Result<()> {
    let points = pts.load(geom)?;
    let mut progress = Progress {
        every: progress_every,
        total: 1u64 << (points.len() - 1).min(63),
    };
    let summary = enumerate_patterns(&points, geom, &mut progress)?;
    let infeasible = summary.infeasible().count();
    tracing::info!(
        points = points.len(),
        patterns = summary.reports.len(),
        total_paths = summary.total_paths(),
        infeasible,
        memo = summary.memo_entries,
        "batch done"
    );
    if let Some(min) = summary.min_solutions() {
        println!("fewest paths: {} ({})", min.pattern, min.solutions);
    }
    println!("crossing-free paths (lower bound): {}", summary.total_paths());
    if let Some(out) = out {
        let mut df = table::reports_frame(&summary.reports)?;
        table::write_frame(&mut df, &out)?;
        let params = json!({
            "cmd": "batch",
            "points": points.len(),
            "seed": pts.seed,
            "index": pts.index,
            "convex": pts.convex,
            "eps": geom.eps,
        });
        write_sidecar(&out, &Payload::new(params, tag))?;
    }
    Ok(())
}

fn trials(
    pts: &PointArgs,
    sets: u64,
    out: Option<PathBuf>,
    geom: GeomCfg,
    tag: Option<String>,
) -> Result<()> {
    ensure!(sets > 0, "--sets must be positive");
    let mut tok = pts.token();
    let mut drawn = Vec::new();
    for _ in 0..sets {
        drawn.push(pts.load_at(geom, tok)?);
        tok = tok.next();
    }
    let rows = compare_point_sets(&drawn, geom)?;
    for row in &rows {
        println!("{} min={} max={} bound={}", row.pattern, row.min, row.max, row.bound);
    }
    tracing::info!(sets, patterns = rows.len(), "trials done");
    if let Some(out) = out {
        let mut df = table::trials_frame(&rows)?;
        table::write_frame(&mut df, &out)?;
        let params = json!({
            "cmd": "trials",
            "points": pts.points,
            "sets": sets,
            "seed": pts.seed,
            "index": pts.index,
            "convex": pts.convex,
            "eps": geom.eps,
        });
        write_sidecar(&out, &Payload::new(params, tag))?;
    }
    Ok(())
}

fn hull_jump(pts: &PointArgs, pattern: Option<String>, geom: GeomCfg) -> Result<()> {
    let points = pts.load(geom)?;
    let patterns: Vec<PathString> = match pattern {
        Some(s) => vec![s.parse()?],
        None => PathString::all(points.len() - 1)?.collect(),
    };
    let mut disagreements = 0usize;
    for p in patterns {
        let check = cross_check(&points, p, geom)?;
        let status = if check.agrees() { "ok" } else { "MISMATCH" };
        if !check.agrees() {
            disagreements += 1;
            tracing::warn!(
                pattern = %p,
                invalid = check.invalid.len(),
                missing_from_dp = check.missing_from_dp.len(),
                "hull jumping disagrees with dp"
            );
        }
        println!("{p} hull_jump={} dp={} {status}", check.hull_jump, check.dp);
    }
    tracing::info!(disagreements, "cross-check done");
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "pathstring_version": pathstring::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
