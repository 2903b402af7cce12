//! Result tables (CSV or Parquet, picked by extension) via polars.

use anyhow::{bail, Context, Result};
use pathstring::api::{PatternReport, TrialRow};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

fn bound_u64(bound: u128) -> Result<u64> {
    u64::try_from(bound).with_context(|| format!("oracle bound {bound} exceeds the u64 column"))
}

/// Columns: `pattern, solutions, bound, ratio`.
pub fn reports_frame(reports: &[PatternReport]) -> Result<DataFrame> {
    let patterns: Vec<String> = reports.iter().map(|r| r.pattern.to_string()).collect();
    let solutions: Vec<u64> = reports.iter().map(|r| r.solutions as u64).collect();
    let bounds = reports
        .iter()
        .map(|r| bound_u64(r.bound))
        .collect::<Result<Vec<u64>>>()?;
    let ratio: Vec<f64> = solutions
        .iter()
        .zip(&bounds)
        .map(|(&s, &b)| s as f64 / b as f64)
        .collect();
    Ok(df!(
        "pattern" => patterns,
        "solutions" => solutions,
        "bound" => bounds,
        "ratio" => ratio
    )?)
}

/// Columns: `pattern, min, max, bound`.
pub fn trials_frame(rows: &[TrialRow]) -> Result<DataFrame> {
    let patterns: Vec<String> = rows.iter().map(|r| r.pattern.to_string()).collect();
    let min: Vec<u64> = rows.iter().map(|r| r.min as u64).collect();
    let max: Vec<u64> = rows.iter().map(|r| r.max as u64).collect();
    let bounds = rows
        .iter()
        .map(|r| bound_u64(r.bound))
        .collect::<Result<Vec<u64>>>()?;
    Ok(df!(
        "pattern" => patterns,
        "min" => min,
        "max" => max,
        "bound" => bounds
    )?)
}

pub fn write_frame(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let ext = out.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !matches!(ext, "csv" | "parquet") {
        bail!("unsupported table extension {ext:?} (use .csv or .parquet)");
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    if ext == "csv" {
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
    } else {
        ParquetWriter::new(file).finish(df)?;
    }
    tracing::info!(rows = df.height(), out = %out.display(), "wrote table");
    Ok(())
}
