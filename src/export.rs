//! CSV and JSON files for a finished benchmark

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use stepfree_core::bench::{BenchmarkReport, ComparisonRecord, ComparisonRow};
use stepfree_core::routing::HeuristicMode;

pub struct ExportPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
}

#[derive(Serialize)]
struct Metadata<'a> {
    timestamp: DateTime<Utc>,
    seed: u64,
    num_tests: usize,
    profile: Option<&'a str>,
    weighting_epoch: u64,
    heuristic: HeuristicMode,
    repetitions: usize,
    warmup: usize,
    invalid_pairs: usize,
}

#[derive(Serialize)]
struct Document<'a> {
    metadata: Metadata<'a>,
    results: &'a [ComparisonRecord],
}

/// Write `benchmark_<timestamp>.csv` and `.json` into `dir`, creating it
pub fn write_all(report: &BenchmarkReport, dir: &Path) -> Result<ExportPaths> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let stamp = report.started_at.format("%Y%m%d_%H%M%S");
    let paths = ExportPaths {
        csv: dir.join(format!("benchmark_{stamp}.csv")),
        json: dir.join(format!("benchmark_{stamp}.json")),
    };

    write_csv(&report.records, &paths.csv)?;
    write_json(report, &paths.json)?;
    Ok(paths)
}

/// One row per accepted pair, numbers pre-formatted
pub fn write_csv(records: &[ComparisonRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(ComparisonRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Metadata plus every record with its per-repetition timings
pub fn write_json(report: &BenchmarkReport, path: &Path) -> Result<()> {
    let document = Document {
        metadata: Metadata {
            timestamp: report.started_at,
            seed: report.seed,
            num_tests: report.records.len(),
            profile: report.profile.as_deref(),
            weighting_epoch: report.weighting_epoch,
            heuristic: report.config.heuristic,
            repetitions: report.config.repetitions,
            warmup: report.config.warmup,
            invalid_pairs: report.invalid_pairs,
        },
        results: &report.records,
    };

    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    Ok(())
}
