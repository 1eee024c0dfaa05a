//! Daily aggregation of hourly effective water levels.
//!
//! Hours are grouped by UTC calendar day with a single forward pass over the
//! (already ordered) records. Every day between the first and last record is
//! emitted, including days with no observations, which contribute zero load.

use crate::config::AggregationConfig;
use crate::effective_level::effective_water_level;
use ccf_hydro::date_range::DateRange;
use ccf_hydro::{FloodError, HourlyRecord};
use chrono::NaiveDate;

/// Flood-load metrics for one day, before streaks and risk are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLoad {
    pub date: NaiveDate,
    /// Number of hourly records that fell in this day.
    pub hours: usize,
    pub daily_cfl: f64,
    pub daily_phwe: f64,
    pub daily_severe_phwe: f64,
    pub cumulative_cfl: f64,
    pub cumulative_phwe: f64,
    pub cumulative_severe_phwe: f64,
    pub max_ewl_m: Option<f64>,
    pub min_ewl_m: Option<f64>,
    pub mean_rainfall_mm: Option<f64>,
    pub sum_rainfall_mm: Option<f64>,
    pub mean_discharge_m3s: Option<f64>,
}

/// Per-hour load contributions in meter-hours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HourlyLoad {
    pub cfl: f64,
    pub phwe: f64,
    pub severe_phwe: f64,
}

/// True when `hour` falls in the night window. The window wraps midnight,
/// so 20 and 8 select 20:00 through 07:59.
pub fn is_night(hour: u32, config: &AggregationConfig) -> bool {
    hour >= config.night_start_hour || hour < config.night_end_hour
}

/// Excess of `level` over `baseline`, clipped at zero. Missing levels add nothing.
fn excess(level: Option<f64>, baseline: f64) -> f64 {
    level.map_or(0.0, |l| (l - baseline).max(0.0))
}

pub fn hourly_load(record: &HourlyRecord, config: &AggregationConfig) -> HourlyLoad {
    let ewl = effective_water_level(record);
    let cfl = excess(ewl, config.baseline_day_m);
    if !is_night(record.hour(), config) {
        return HourlyLoad { cfl, ..Default::default() };
    }
    HourlyLoad {
        cfl,
        phwe: excess(ewl, config.baseline_night_m),
        severe_phwe: excess(ewl, config.severe_baseline_night_m),
    }
}

/// Fails unless timestamps are strictly ascending (which also rules out duplicates).
pub fn check_ordering(records: &[HourlyRecord]) -> Result<(), FloodError> {
    for (i, pair) in records.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(FloodError::OrderingViolation {
                index: i + 1,
                previous: pair[0].timestamp,
                current: pair[1].timestamp,
            });
        }
    }
    Ok(())
}

/// Mean and sum over the values that are present.
#[derive(Debug, Default)]
struct PresentValues {
    sum: f64,
    count: usize,
}

impl PresentValues {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn sum(&self) -> Option<f64> {
        (self.count > 0).then_some(self.sum)
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Default)]
struct DayAccumulator {
    hours: usize,
    load: HourlyLoad,
    max_ewl: Option<f64>,
    min_ewl: Option<f64>,
    rainfall: PresentValues,
    discharge: PresentValues,
}

impl DayAccumulator {
    fn push(&mut self, record: &HourlyRecord, config: &AggregationConfig) {
        let hour = hourly_load(record, config);
        self.hours += 1;
        self.load.cfl += hour.cfl;
        self.load.phwe += hour.phwe;
        self.load.severe_phwe += hour.severe_phwe;

        if let Some(ewl) = effective_water_level(record).filter(|v| !v.is_nan()) {
            self.max_ewl = Some(self.max_ewl.map_or(ewl, |m| m.max(ewl)));
            self.min_ewl = Some(self.min_ewl.map_or(ewl, |m| m.min(ewl)));
        }
        self.rainfall.push(record.rainfall_mm);
        self.discharge.push(record.discharge_m3s);
    }

    fn finish(self, date: NaiveDate, running: &mut HourlyLoad) -> DailyLoad {
        running.cfl += self.load.cfl;
        running.phwe += self.load.phwe;
        running.severe_phwe += self.load.severe_phwe;
        DailyLoad {
            date,
            hours: self.hours,
            daily_cfl: self.load.cfl,
            daily_phwe: self.load.phwe,
            daily_severe_phwe: self.load.severe_phwe,
            cumulative_cfl: running.cfl,
            cumulative_phwe: running.phwe,
            cumulative_severe_phwe: running.severe_phwe,
            max_ewl_m: self.max_ewl,
            min_ewl_m: self.min_ewl,
            mean_rainfall_mm: self.rainfall.mean(),
            sum_rainfall_mm: self.rainfall.sum(),
            mean_discharge_m3s: self.discharge.mean(),
        }
    }
}

/// Reduce ordered hourly records to one [`DailyLoad`] per calendar day.
pub fn aggregate_days(
    records: &[HourlyRecord],
    config: &AggregationConfig,
) -> Result<Vec<DailyLoad>, FloodError> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(FloodError::EmptyInput);
    };
    check_ordering(records)?;

    let days = DateRange(first.date(), last.date());
    let mut out = Vec::with_capacity(days.num_days());
    let mut running = HourlyLoad::default();
    let mut remaining = records.iter().peekable();

    for date in days {
        let mut acc = DayAccumulator::default();
        while let Some(record) = remaining.next_if(|r| r.date() == date) {
            acc.push(record, config);
        }
        if acc.hours == 0 {
            log::debug!("{date}: no hourly records, carrying cumulative load forward");
        }
        out.push(acc.finish(date, &mut running));
    }

    if out.is_empty() {
        return Err(FloodError::EmptyInput);
    }
    log::info!(
        "Aggregated {} hourly records into {} days ({} to {})",
        records.len(),
        out.len(),
        first.date(),
        last.date()
    );
    Ok(out)
}
