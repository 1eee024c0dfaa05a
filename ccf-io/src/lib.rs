//! File-level I/O around the flood-risk engine.
//!
//! - [`loader`] reads a raw hourly CSV into validated, ordered
//!   [`HourlyRecord`](ccf_hydro::HourlyRecord)s.
//! - [`daily_table`] persists and re-reads the daily record table.
//! - [`panels`] exports the per-panel data series the chart renderer reads.
//!
//! # CSV Formats
//!
//! - **Hourly input** (has headers): `timestamp,water_level_m,discharge_m3s,rainfall_mm`
//!   plus optional `soil_moisture,slr_adjust_m,wave_setup_m`, in any column order.
//! - **Daily table** (has headers): `date,daily_CFL,daily_PHWe,...,risk_state,risk_multiplier`.

pub mod daily_table;
pub mod loader;
pub mod panels;

pub use loader::{load_hourly_csv, load_hourly_csv_str, LoadedHourly};
