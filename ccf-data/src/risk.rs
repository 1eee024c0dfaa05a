//! Per-day risk state and escalation multiplier.
//!
//! Both are pure functions of the day's cumulative loads and compound streak.
//! The state is not latched: cumulative loads never fall, but a broken
//! compound streak can drop a day back from Failure to Straining or Stable.

use crate::config::{MultiplierConfig, RiskThresholds, RiskTier};
use ccf_hydro::RiskState;

impl RiskTier {
    /// True when any axis reaches its bound.
    pub fn is_met(&self, cumulative_cfl: f64, cumulative_phwe: f64, compound_streak: u32) -> bool {
        cumulative_cfl >= self.cfl
            || cumulative_phwe >= self.phwe
            || compound_streak >= self.compound_streak
    }
}

pub fn classify(
    cumulative_cfl: f64,
    cumulative_phwe: f64,
    compound_streak: u32,
    thresholds: &RiskThresholds,
) -> RiskState {
    if thresholds.failure.is_met(cumulative_cfl, cumulative_phwe, compound_streak) {
        RiskState::Failure
    } else if thresholds.straining.is_met(cumulative_cfl, cumulative_phwe, compound_streak) {
        RiskState::Straining
    } else {
        RiskState::Stable
    }
}

/// `1 + cfl/norm_cfl + phwe/norm_phwe + streak * streak_factor`
pub fn risk_multiplier(
    cumulative_cfl: f64,
    cumulative_phwe: f64,
    compound_streak: u32,
    config: &MultiplierConfig,
) -> f64 {
    1.0 + cumulative_cfl / config.norm_cfl
        + cumulative_phwe / config.norm_phwe
        + f64::from(compound_streak) * config.streak_factor
}
