//! Daily compound flood-risk engine.
//!
//! A single linear pass: hourly records → effective water level → daily
//! flood-load aggregates → hot-day/hot-night streaks → risk state and
//! escalation multiplier. [`assess`] runs the whole pipeline and either
//! returns every [`DailyRecord`] or fails without partial output.

pub mod aggregation;
pub mod config;
pub mod risk;
pub mod streaks;

use aggregation::DailyLoad;
use ccf_hydro::{DailyRecord, FloodError, HourlyRecord};
use config::EngineConfig;
use streaks::DayStreaks;

/// Effective water level (EWL)
pub mod effective_level {
    use ccf_hydro::HourlyRecord;

    /// Water level plus sea-level-rise and wave-setup offsets.
    ///
    /// `None` when the hour has no water level reading.
    pub fn effective_water_level(record: &HourlyRecord) -> Option<f64> {
        record
            .water_level_m
            .map(|level| level + record.slr_adjust_m + record.wave_setup_m)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{TimeZone, Utc};

        #[test]
        fn test_adjustments_are_additive() {
            let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
            let mut record = HourlyRecord::new(ts, Some(1.25), None, None);
            assert_eq!(effective_water_level(&record), Some(1.25));
            record.slr_adjust_m = 0.5;
            record.wave_setup_m = 0.25;
            assert_eq!(effective_water_level(&record), Some(2.0));
        }

        #[test]
        fn test_missing_level_stays_missing() {
            let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
            let mut record = HourlyRecord::new(ts, None, Some(3.0), Some(0.0));
            record.slr_adjust_m = 0.5;
            assert_eq!(effective_water_level(&record), None);
        }
    }
}

fn assemble(load: DailyLoad, streaks: DayStreaks, config: &EngineConfig) -> DailyRecord {
    let streak = streaks.consecutive_compound_cycles;
    DailyRecord {
        date: load.date,
        daily_cfl: load.daily_cfl,
        daily_phwe: load.daily_phwe,
        daily_severe_phwe: load.daily_severe_phwe,
        cumulative_cfl: load.cumulative_cfl,
        cumulative_phwe: load.cumulative_phwe,
        cumulative_severe_phwe: load.cumulative_severe_phwe,
        max_ewl_m: load.max_ewl_m,
        min_ewl_m: load.min_ewl_m,
        mean_rainfall_mm: load.mean_rainfall_mm,
        sum_rainfall_mm: load.sum_rainfall_mm,
        mean_discharge_m3s: load.mean_discharge_m3s,
        hot_day: streaks.hot_day,
        hot_night: streaks.hot_night,
        compound: streaks.compound,
        consecutive_hot_days: streaks.consecutive_hot_days,
        consecutive_hot_nights: streaks.consecutive_hot_nights,
        consecutive_compound_cycles: streak,
        risk_state: risk::classify(load.cumulative_cfl, load.cumulative_phwe, streak, &config.risk),
        risk_multiplier: risk::risk_multiplier(
            load.cumulative_cfl,
            load.cumulative_phwe,
            streak,
            &config.multiplier,
        ),
    }
}

/// Run the full daily assessment over an ordered hourly record set.
pub fn assess(records: &[HourlyRecord], config: &EngineConfig) -> Result<Vec<DailyRecord>, FloodError> {
    config.validate()?;
    let loads = aggregation::aggregate_days(records, &config.aggregation)?;
    let streaks = streaks::track_streaks(&loads, &config.streaks);

    let daily: Vec<DailyRecord> = loads
        .into_iter()
        .zip(streaks)
        .map(|(load, streaks)| assemble(load, streaks, config))
        .collect();

    if let Some(last) = daily.last() {
        log::info!(
            "Assessed {} days; final state {} (multiplier {:.2}, cumulative CFL {:.2}, PHWe {:.2})",
            daily.len(),
            last.risk_state,
            last.risk_multiplier,
            last.cumulative_cfl,
            last.cumulative_phwe
        );
    }
    Ok(daily)
}
