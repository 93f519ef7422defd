//! Persistence of models and per-generation statistics.
//!
//! Training must survive a full disk or an unwritable directory: dump
//! failures are logged and skipped, never propagated.

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::genetic::Model;
use crate::utils::prelude::*;

/// Wall-clock breakdown of one generation, in milliseconds.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PerformanceStats {
    pub evaluation_ms: u64,
    pub evolution_ms: u64,
    pub total_ms: u64,
}

/// Aggregate match counts across the whole population.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StatsCounts {
    pub matches: usize,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// Distribution of single-match runtimes.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TimingStats {
    pub avg_match_ms: f64,
    pub min_match_ms: u64,
    pub max_match_ms: u64,
}

/// Everything a consumer needs to chart one generation. Unknown fields on
/// the reading side are theirs to ignore.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationStats {
    pub generation: u32,
    pub best_fitness: f64,
    pub avg_fitness: f64,
    pub best_model: Model,
    pub all_models: Vec<Model>,
    pub timestamp: i64,
    pub performance: PerformanceStats,
    pub stats_counts: StatsCounts,
    pub timing_stats: TimingStats,
}

/// Serializes a value as pretty JSON under `path`, creating parent
/// directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("could not create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("could not write {}", path.display()))?;
    Ok(())
}

/// Best-effort dump: a failed write costs a log line, not the run.
pub fn persist_or_log<T: Serialize>(path: &Path, value: &T) {
    if let Err(e) = write_json(path, value) {
        log::error!("skipping stats dump: {e:#}");
    }
}
