//! Hourly observation CSV loading.
//!
//! Expected format (with headers), columns in any order:
//!
//! ```text
//! timestamp,water_level_m,discharge_m3s,rainfall_mm,soil_moisture,slr_adjust_m,wave_setup_m
//! 1995-07-12T00:00:00Z,0.84,412.0,0.0,0.31,0.10,
//! ```
//!
//! Unknown columns are ignored. Empty or non-numeric cells become missing
//! values. Rows are sorted by timestamp and duplicate timestamps keep their
//! first occurrence.

use ccf_hydro::hourly::{OPTIONAL_COLUMNS, REQUIRED_NUMERIC_COLUMNS, TIMESTAMP_COLUMN};
use ccf_hydro::{FloodError, HourlyRecord};
use ccf_utils::dates::parse_timestamp_utc;
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Hourly records ready for assessment, plus what was cleaned on the way in.
#[derive(Debug, Clone)]
pub struct LoadedHourly {
    pub records: Vec<HourlyRecord>,
    /// `None` when loaded from an in-memory string.
    pub source_path: Option<PathBuf>,
    pub duplicates_dropped: usize,
    /// Numeric cells that could not be parsed and were treated as missing.
    pub coerced_cells: usize,
}

/// Column positions resolved from the header row.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, FloodError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        let mut missing: Vec<String> = std::iter::once(TIMESTAMP_COLUMN)
            .chain(REQUIRED_NUMERIC_COLUMNS)
            .filter(|name| !index.contains_key(*name))
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            missing.sort();
            let mut found: Vec<String> = index.keys().cloned().collect();
            found.sort();
            return Err(FloodError::Schema { missing, found });
        }
        Ok(Columns { index })
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// Parse a numeric cell. Empty, `NaN`, and unparseable cells are missing;
/// only the unparseable ones are counted as coerced.
fn numeric_cell(record: &StringRecord, column: Option<usize>, coerced: &mut usize) -> Option<f64> {
    let raw = column.and_then(|i| record.get(i))?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => None,
        Ok(v) => Some(v),
        Err(_) => {
            *coerced += 1;
            None
        }
    }
}

/// Load an hourly observations CSV file.
pub fn load_hourly_csv(path: &Path) -> Result<LoadedHourly, FloodError> {
    let file = std::fs::File::open(path)?;
    let mut loaded = load_hourly_reader(file)?;
    log::info!(
        "loader: Loaded {} hourly records from {}",
        loaded.records.len(),
        path.display()
    );
    loaded.source_path = Some(path.to_path_buf());
    Ok(loaded)
}

/// Load hourly observations from a CSV string.
pub fn load_hourly_csv_str(csv_data: &str) -> Result<LoadedHourly, FloodError> {
    load_hourly_reader(csv_data.as_bytes())
}

fn load_hourly_reader<R: Read>(reader: R) -> Result<LoadedHourly, FloodError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let ts_col = columns.get(TIMESTAMP_COLUMN);
    let [level_col, discharge_col, rainfall_col] = REQUIRED_NUMERIC_COLUMNS.map(|c| columns.get(c));
    let [soil_col, slr_col, wave_col] = OPTIONAL_COLUMNS.map(|c| columns.get(c));

    let mut records = Vec::new();
    let mut coerced = 0usize;
    for result in rdr.records() {
        let r = result?;
        let line = r.position().map_or(0, |p| p.line());
        let raw_ts = ts_col.and_then(|i| r.get(i)).unwrap_or("").trim();
        let timestamp = parse_timestamp_utc(raw_ts).map_err(|_| FloodError::InvalidTimestamp {
            line,
            value: raw_ts.to_string(),
        })?;

        records.push(HourlyRecord {
            timestamp,
            water_level_m: numeric_cell(&r, level_col, &mut coerced),
            discharge_m3s: numeric_cell(&r, discharge_col, &mut coerced),
            rainfall_mm: numeric_cell(&r, rainfall_col, &mut coerced),
            soil_moisture: numeric_cell(&r, soil_col, &mut coerced).map(|v| v.clamp(0.0, 1.0)),
            slr_adjust_m: numeric_cell(&r, slr_col, &mut coerced).unwrap_or(0.0),
            wave_setup_m: numeric_cell(&r, wave_col, &mut coerced).unwrap_or(0.0),
        });
    }

    if records.is_empty() {
        return Err(FloodError::EmptyInput);
    }

    // Stable sort, so the first occurrence of a duplicate timestamp survives.
    records.sort_by_key(|r| r.timestamp);
    let before = records.len();
    records.dedup_by_key(|r| r.timestamp);
    let duplicates_dropped = before - records.len();

    if duplicates_dropped > 0 {
        log::warn!("loader: Dropped {} records with duplicate timestamps", duplicates_dropped);
    }
    if coerced > 0 {
        log::warn!("loader: Treated {} non-numeric cells as missing", coerced);
    }

    for (column, present) in REQUIRED_NUMERIC_COLUMNS.iter().zip([
        records.iter().any(|r| r.water_level_m.is_some()),
        records.iter().any(|r| r.discharge_m3s.is_some()),
        records.iter().any(|r| r.rainfall_mm.is_some()),
    ]) {
        if !present {
            return Err(FloodError::DataQuality {
                column: column.to_string(),
            });
        }
    }

    Ok(LoadedHourly {
        records,
        source_path: None,
        duplicates_dropped,
        coerced_cells: coerced,
    })
}
