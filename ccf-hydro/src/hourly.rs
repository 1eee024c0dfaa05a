use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Name of the timestamp column in hourly input files.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Numeric columns every hourly input must carry.
pub const REQUIRED_NUMERIC_COLUMNS: [&str; 3] = ["water_level_m", "discharge_m3s", "rainfall_mm"];

/// Columns that are read when present and defaulted otherwise.
pub const OPTIONAL_COLUMNS: [&str; 3] = ["soil_moisture", "slr_adjust_m", "wave_setup_m"];

/// A single hourly observation at a coastal site.
///
/// Required signals may be missing at individual hours (`None`); the
/// additive adjustments are already defaulted to 0.0 by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub timestamp: DateTime<Utc>,
    /// Observed or modelled tide plus surge level above local datum (m).
    pub water_level_m: Option<f64>,
    /// River discharge proxy (m3/s).
    pub discharge_m3s: Option<f64>,
    /// Local rainfall proxy (mm).
    pub rainfall_mm: Option<f64>,
    /// Catchment wetness proxy in [0, 1].
    pub soil_moisture: Option<f64>,
    /// Additive mean sea-level rise adjustment (m).
    pub slr_adjust_m: f64,
    /// Additive wave setup adjustment (m).
    pub wave_setup_m: f64,
}

impl HourlyRecord {
    /// A record with no adjustments and no soil moisture reading.
    pub fn new(
        timestamp: DateTime<Utc>,
        water_level_m: Option<f64>,
        discharge_m3s: Option<f64>,
        rainfall_mm: Option<f64>,
    ) -> Self {
        HourlyRecord {
            timestamp,
            water_level_m,
            discharge_m3s,
            rainfall_mm,
            soil_moisture: None,
            slr_adjust_m: 0.0,
            wave_setup_m: 0.0,
        }
    }

    /// The UTC calendar day this record falls in.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Hour of day (0-23) in UTC.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}
