//! Hot-day / hot-night flags and their consecutive-occurrence counts.

use crate::aggregation::DailyLoad;
use crate::config::StreakConfig;

/// Flags and running streak lengths for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayStreaks {
    pub hot_day: bool,
    pub hot_night: bool,
    pub compound: bool,
    pub consecutive_hot_days: u32,
    pub consecutive_hot_nights: u32,
    pub consecutive_compound_cycles: u32,
}

/// Consecutive-true counter: resets to 0 on false, otherwise previous + 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakCounter(u32);

impl StreakCounter {
    pub fn advance(&mut self, hot: bool) -> u32 {
        self.0 = if hot { self.0.saturating_add(1) } else { 0 };
        self.0
    }
}

/// Comparisons against NaN are false, so undefined loads never count as hot.
pub fn day_flags(load: &DailyLoad, config: &StreakConfig) -> (bool, bool) {
    (
        load.daily_cfl > config.hot_day_cfl_threshold,
        load.daily_phwe > config.hot_night_phwe_threshold,
    )
}

pub fn track_streaks(days: &[DailyLoad], config: &StreakConfig) -> Vec<DayStreaks> {
    let mut hot_days = StreakCounter::default();
    let mut hot_nights = StreakCounter::default();
    let mut compound_cycles = StreakCounter::default();

    days.iter()
        .map(|load| {
            let (hot_day, hot_night) = day_flags(load, config);
            let compound = hot_day && hot_night;
            DayStreaks {
                hot_day,
                hot_night,
                compound,
                consecutive_hot_days: hot_days.advance(hot_day),
                consecutive_hot_nights: hot_nights.advance(hot_night),
                consecutive_compound_cycles: compound_cycles.advance(compound),
            }
        })
        .collect()
}
