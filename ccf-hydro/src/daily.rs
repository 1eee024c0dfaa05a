use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete daily risk classification, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskState {
    Stable,
    Straining,
    Failure,
}

impl RiskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskState::Stable => "Stable",
            RiskState::Straining => "Straining",
            RiskState::Failure => "Failure",
        }
    }

    /// Colour used for this state in the risk band panel.
    pub fn color(&self) -> &'static str {
        match self {
            RiskState::Stable => "green",
            RiskState::Straining => "orange",
            RiskState::Failure => "red",
        }
    }
}

impl fmt::Display for RiskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flood-load metrics, streaks, and risk classification for one UTC day.
///
/// Load terms are in meter-hours. Field order is the column order of the
/// persisted daily table, with `date` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(alias = "date_utc")]
    pub date: NaiveDate,
    #[serde(rename = "daily_CFL")]
    pub daily_cfl: f64,
    #[serde(rename = "daily_PHWe")]
    pub daily_phwe: f64,
    #[serde(rename = "daily_severe_PHWe")]
    pub daily_severe_phwe: f64,
    #[serde(rename = "cumulative_CFL")]
    pub cumulative_cfl: f64,
    #[serde(rename = "cumulative_PHWe")]
    pub cumulative_phwe: f64,
    #[serde(rename = "cumulative_severe_PHWe")]
    pub cumulative_severe_phwe: f64,
    /// `None` when the day has no water level readings.
    pub max_ewl_m: Option<f64>,
    pub min_ewl_m: Option<f64>,
    pub mean_rainfall_mm: Option<f64>,
    pub sum_rainfall_mm: Option<f64>,
    pub mean_discharge_m3s: Option<f64>,
    pub hot_day: bool,
    pub hot_night: bool,
    pub compound: bool,
    pub consecutive_hot_days: u32,
    pub consecutive_hot_nights: u32,
    pub consecutive_compound_cycles: u32,
    pub risk_state: RiskState,
    pub risk_multiplier: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_state_severity_order() {
        assert!(RiskState::Stable < RiskState::Straining);
        assert!(RiskState::Straining < RiskState::Failure);
        assert_eq!(
            [RiskState::Failure, RiskState::Stable, RiskState::Straining]
                .iter()
                .max(),
            Some(&RiskState::Failure)
        );
    }

    #[test]
    fn test_risk_state_labels() {
        assert_eq!(RiskState::Straining.to_string(), "Straining");
        assert_eq!(RiskState::Stable.color(), "green");
        assert_eq!(RiskState::Failure.color(), "red");
        assert_eq!(
            serde_json::to_string(&RiskState::Failure).unwrap(),
            "\"Failure\""
        );
    }
}
