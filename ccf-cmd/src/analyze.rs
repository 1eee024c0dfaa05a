//! Load → assess → persist.

use crate::AnalyzeArgs;
use anyhow::Context;
use ccf_data::config::EngineConfig;
use ccf_hydro::DailyRecord;
use ccf_io::{daily_table, panels};
use log::info;
use std::path::PathBuf;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct AnalysisReport {
    pub daily: Vec<DailyRecord>,
    pub daily_table: PathBuf,
    /// `(panel name, path)` in panel order.
    pub panels: Vec<(String, PathBuf)>,
}

/// Run the assessment for one input file.
///
/// Nothing is written until the full daily sequence has been computed, so a
/// failing input leaves the output directory untouched.
pub fn run_analysis(args: &AnalyzeArgs) -> anyhow::Result<AnalysisReport> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let loaded = ccf_io::load_hourly_csv(&args.input)
        .with_context(|| format!("failed to load hourly observations from {}", args.input.display()))?;
    info!(
        "Loaded {} hourly records ({} duplicates dropped)",
        loaded.records.len(),
        loaded.duplicates_dropped
    );

    let daily = ccf_data::assess(&loaded.records, &config)
        .with_context(|| format!("assessment failed for {}", args.input.display()))?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create output directory {}", args.output_dir.display()))?;

    let table_path = daily_table::daily_table_path(&args.output_dir, &args.input);
    daily_table::write_daily_table_file(&table_path, &daily)
        .with_context(|| format!("failed to write {}", table_path.display()))?;

    let panel_paths = panels::write_panels(&args.output_dir, &panels::build_panels(&daily))
        .context("failed to write panel series")?;

    Ok(AnalysisReport {
        daily,
        daily_table: table_path,
        panels: panel_paths,
    })
}
