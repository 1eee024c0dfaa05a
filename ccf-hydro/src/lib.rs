//! Core types for coastal compound flood risk assessment.
//!
//! Hourly observations come in as [`hourly::HourlyRecord`]s, the engine in
//! `ccf-data` turns them into [`daily::DailyRecord`]s, and every crate in the
//! workspace reports failures through [`error::FloodError`].

pub mod daily;
pub mod date_range;
pub mod error;
pub mod hourly;

pub use daily::{DailyRecord, RiskState};
pub use error::FloodError;
pub use hourly::HourlyRecord;
