//! Daily record table persistence.
//!
//! One row per day with a header naming every field; `date` is always the
//! first column. Undefined aggregates are written as empty cells and floats
//! in shortest round-trip form, so reading a written table reproduces every
//! value exactly.

use ccf_hydro::{DailyRecord, FloodError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// `<output_dir>/daily_metrics_<input stem>.csv`
pub fn daily_table_path(output_dir: &Path, input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    output_dir.join(format!("daily_metrics_{stem}.csv"))
}

pub fn write_daily_table<W: Write>(writer: W, daily: &[DailyRecord]) -> Result<(), FloodError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in daily {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table to `path` via a sibling temp file and rename, so a failed
/// write never leaves a truncated table behind.
pub fn write_daily_table_file(path: &Path, daily: &[DailyRecord]) -> Result<(), FloodError> {
    let tmp = path.with_extension("csv.partial");
    let result = std::fs::File::create(&tmp)
        .map_err(FloodError::from)
        .and_then(|file| write_daily_table(std::io::BufWriter::new(file), daily));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    std::fs::rename(&tmp, path)?;
    log::info!("daily_table: Wrote {} days to {}", daily.len(), path.display());
    Ok(())
}

pub fn read_daily_table<R: Read>(reader: R) -> Result<Vec<DailyRecord>, FloodError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut daily = Vec::new();
    for result in rdr.deserialize::<DailyRecord>() {
        daily.push(result?);
    }
    Ok(daily)
}

pub fn read_daily_table_file(path: &Path) -> Result<Vec<DailyRecord>, FloodError> {
    read_daily_table(std::fs::File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccf_hydro::RiskState;
    use chrono::NaiveDate;

    fn sample() -> Vec<DailyRecord> {
        let first = DailyRecord {
            date: NaiveDate::from_ymd_opt(1995, 7, 12).unwrap(),
            daily_cfl: 8.8,
            daily_phwe: 3.6000000000000005,
            daily_severe_phwe: 2.4,
            cumulative_cfl: 8.8,
            cumulative_phwe: 3.6000000000000005,
            cumulative_severe_phwe: 2.4,
            max_ewl_m: Some(1.8),
            min_ewl_m: Some(0.5),
            mean_rainfall_mm: Some(0.1 + 0.2),
            sum_rainfall_mm: Some(7.2),
            mean_discharge_m3s: Some(412.25),
            hot_day: true,
            hot_night: true,
            compound: true,
            consecutive_hot_days: 1,
            consecutive_hot_nights: 1,
            consecutive_compound_cycles: 1,
            risk_state: RiskState::Stable,
            risk_multiplier: 1.0 + 8.8 / 40.0 + 3.6000000000000005 / 20.0 + 0.5,
        };
        let gap = DailyRecord {
            date: NaiveDate::from_ymd_opt(1995, 7, 13).unwrap(),
            daily_cfl: 0.0,
            daily_phwe: 0.0,
            daily_severe_phwe: 0.0,
            max_ewl_m: None,
            min_ewl_m: None,
            mean_rainfall_mm: None,
            sum_rainfall_mm: None,
            mean_discharge_m3s: None,
            hot_day: false,
            hot_night: false,
            compound: false,
            consecutive_hot_days: 0,
            consecutive_hot_nights: 0,
            consecutive_compound_cycles: 0,
            risk_state: RiskState::Failure,
            risk_multiplier: 1.0 + 8.8 / 40.0 + 3.6000000000000005 / 20.0,
            ..first.clone()
        };
        vec![first, gap]
    }

    #[test]
    fn test_header_names_every_field_date_first() {
        let mut buf = Vec::new();
        write_daily_table(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "date,daily_CFL,daily_PHWe,daily_severe_PHWe,cumulative_CFL,cumulative_PHWe,\
cumulative_severe_PHWe,max_ewl_m,min_ewl_m,mean_rainfall_mm,sum_rainfall_mm,\
mean_discharge_m3s,hot_day,hot_night,compound,consecutive_hot_days,\
consecutive_hot_nights,consecutive_compound_cycles,risk_state,risk_multiplier"
        );
        let gap_row = text.lines().nth(2).unwrap();
        assert!(gap_row.starts_with("1995-07-13,0.0,0.0,0.0,8.8,"));
        assert!(gap_row.contains(",,,,,false,false,false,0,0,0,Failure,"));
    }

    #[test]
    fn test_written_table_reads_back_identically() {
        let daily = sample();
        let mut buf = Vec::new();
        write_daily_table(&mut buf, &daily).unwrap();
        let back = read_daily_table(buf.as_slice()).unwrap();
        assert_eq!(back, daily);
    }

    #[test]
    fn test_reader_accepts_date_utc_and_any_column_order() {
        let csv = "\
risk_multiplier,risk_state,date_utc,daily_CFL,daily_PHWe,daily_severe_PHWe,cumulative_CFL,cumulative_PHWe,cumulative_severe_PHWe,max_ewl_m,min_ewl_m,mean_rainfall_mm,sum_rainfall_mm,mean_discharge_m3s,hot_day,hot_night,compound,consecutive_hot_days,consecutive_hot_nights,consecutive_compound_cycles
1.5,Straining,2001-01-01,1,2,3,4,5,6,1.1,0.2,,,,true,false,false,3,0,0
";
        let back = read_daily_table(csv.as_bytes()).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].date, NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
        assert_eq!(back[0].risk_state, RiskState::Straining);
        assert_eq!(back[0].consecutive_hot_days, 3);
        assert_eq!(back[0].mean_rainfall_mm, None);
    }

    #[test]
    fn test_file_round_trip_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = daily_table_path(dir.path(), Path::new("data/sample_chicago_1995.csv"));
        assert_eq!(path.file_name().unwrap(), "daily_metrics_sample_chicago_1995.csv");

        write_daily_table_file(&path, &sample()).unwrap();
        assert!(!path.with_extension("csv.partial").exists());
        assert_eq!(read_daily_table_file(&path).unwrap(), sample());
    }
}
