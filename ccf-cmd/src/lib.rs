//! Command implementations for the CCF CLI.
//!
//! `analyze` loads an hourly observation file, runs the daily compound
//! flood-risk assessment, writes the daily table and panel series, and
//! prints a summary of the most recent days.

use clap::Args;
use std::path::PathBuf;

pub mod analyze;
pub mod summary;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Hourly observations CSV (timestamp, water_level_m, discharge_m3s, rainfall_mm, ...)
    pub input: PathBuf,

    /// Directory for the daily table and panel series (created if missing)
    #[arg(short = 'o', long, default_value = "output")]
    pub output_dir: PathBuf,

    /// TOML file overriding baselines, thresholds, and normalisers
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Number of trailing days to show in the summary
    #[arg(long, default_value_t = summary::DEFAULT_TAIL_DAYS)]
    pub tail: usize,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let report = analyze::run_analysis(&args)?;
    print!("{}", summary::render(&report, args.tail));
    Ok(())
}
