//! Engine configuration.
//!
//! Each component receives its own section explicitly; there is no global
//! threshold state. Every field defaults to the documented constant, so a
//! TOML override file only needs the sections it changes. Risk tiers are
//! replaced whole:
//!
//! ```toml
//! [aggregation]
//! baseline_day_m = 1.2
//!
//! [risk.failure]
//! cfl = 100.0
//! phwe = 50.0
//! compound_streak = 5
//! ```

use ccf_hydro::FloodError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Stricter night baseline used for severe PHWe.
pub const SEVERE_BASELINE_NIGHT_M: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub aggregation: AggregationConfig,
    pub streaks: StreakConfig,
    pub risk: RiskThresholds,
    pub multiplier: MultiplierConfig,
}

/// Baselines and night window for the daily aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub baseline_day_m: f64,
    pub baseline_night_m: f64,
    pub severe_baseline_night_m: f64,
    /// First night hour (inclusive).
    pub night_start_hour: u32,
    /// First hour after the night ends (exclusive).
    pub night_end_hour: u32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        AggregationConfig {
            baseline_day_m: 1.0,
            baseline_night_m: 0.7,
            severe_baseline_night_m: SEVERE_BASELINE_NIGHT_M,
            night_start_hour: 20,
            night_end_hour: 8,
        }
    }
}

/// Daily "hot" thresholds for the streak tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
    pub hot_day_cfl_threshold: f64,
    pub hot_night_phwe_threshold: f64,
}

impl Default for StreakConfig {
    fn default() -> Self {
        StreakConfig {
            hot_day_cfl_threshold: 6.0,
            hot_night_phwe_threshold: 3.0,
        }
    }
}

/// One tier of the risk rule. The tier holds when any axis reaches its bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskTier {
    /// Minimum cumulative CFL.
    pub cfl: f64,
    /// Minimum cumulative PHWe.
    pub phwe: f64,
    /// Minimum consecutive compound cycles.
    pub compound_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub straining: RiskTier,
    pub failure: RiskTier,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            straining: RiskTier {
                cfl: 40.0,
                phwe: 20.0,
                compound_streak: 2,
            },
            failure: RiskTier {
                cfl: 80.0,
                phwe: 40.0,
                compound_streak: 4,
            },
        }
    }
}

/// Normalisers for the continuous risk multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplierConfig {
    pub norm_cfl: f64,
    pub norm_phwe: f64,
    pub streak_factor: f64,
}

impl Default for MultiplierConfig {
    fn default() -> Self {
        MultiplierConfig {
            norm_cfl: 40.0,
            norm_phwe: 20.0,
            streak_factor: 0.5,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) TOML override and validate the result.
    pub fn from_toml_str(contents: &str) -> Result<Self, FloodError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, FloodError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FloodError> {
        let agg = &self.aggregation;
        for (name, value) in [
            ("aggregation.baseline_day_m", agg.baseline_day_m),
            ("aggregation.baseline_night_m", agg.baseline_night_m),
            ("aggregation.severe_baseline_night_m", agg.severe_baseline_night_m),
            ("streaks.hot_day_cfl_threshold", self.streaks.hot_day_cfl_threshold),
            ("streaks.hot_night_phwe_threshold", self.streaks.hot_night_phwe_threshold),
            ("risk.straining.cfl", self.risk.straining.cfl),
            ("risk.straining.phwe", self.risk.straining.phwe),
            ("risk.failure.cfl", self.risk.failure.cfl),
            ("risk.failure.phwe", self.risk.failure.phwe),
            ("multiplier.streak_factor", self.multiplier.streak_factor),
        ] {
            if !value.is_finite() {
                return Err(FloodError::InvalidConfig(format!("{name} must be finite, got {value}")));
            }
        }
        if agg.night_start_hour > 23 {
            return Err(FloodError::InvalidConfig(format!(
                "aggregation.night_start_hour must be within 0..=23, got {}",
                agg.night_start_hour
            )));
        }
        if agg.night_end_hour > 24 {
            return Err(FloodError::InvalidConfig(format!(
                "aggregation.night_end_hour must be within 0..=24, got {}",
                agg.night_end_hour
            )));
        }
        for (name, value) in [
            ("multiplier.norm_cfl", self.multiplier.norm_cfl),
            ("multiplier.norm_phwe", self.multiplier.norm_phwe),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FloodError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        let (straining, failure) = (&self.risk.straining, &self.risk.failure);
        if failure.cfl < straining.cfl
            || failure.phwe < straining.phwe
            || failure.compound_streak < straining.compound_streak
        {
            return Err(FloodError::InvalidConfig(
                "risk.failure tier must not be weaker than risk.straining on any axis".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.aggregation.baseline_day_m, 1.0);
        assert_eq!(config.aggregation.baseline_night_m, 0.7);
        assert_eq!(config.aggregation.severe_baseline_night_m, 1.0);
        assert_eq!(config.aggregation.night_start_hour, 20);
        assert_eq!(config.aggregation.night_end_hour, 8);
        assert_eq!(config.streaks.hot_day_cfl_threshold, 6.0);
        assert_eq!(config.streaks.hot_night_phwe_threshold, 3.0);
        assert_eq!(config.risk.straining.compound_streak, 2);
        assert_eq!(config.risk.failure.compound_streak, 4);
        assert_eq!(config.multiplier.norm_cfl, 40.0);
        assert_eq!(config.multiplier.norm_phwe, 20.0);
        assert_eq!(config.multiplier.streak_factor, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_override_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
[aggregation]
baseline_day_m = 1.2
night_start_hour = 19

[risk.failure]
cfl = 100.0
phwe = 50.0
compound_streak = 5
"#,
        )
        .unwrap();
        assert_eq!(config.aggregation.baseline_day_m, 1.2);
        assert_eq!(config.aggregation.night_start_hour, 19);
        assert_eq!(config.aggregation.baseline_night_m, 0.7);
        assert_eq!(config.risk.failure.compound_streak, 5);
        assert_eq!(config.risk.straining, RiskThresholds::default().straining);
        assert_eq!(config.multiplier, MultiplierConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_night_hour() {
        let mut config = EngineConfig::default();
        config.aggregation.night_start_hour = 24;
        assert!(matches!(config.validate(), Err(FloodError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_normaliser() {
        let mut config = EngineConfig::default();
        config.multiplier.norm_phwe = 0.0;
        assert!(matches!(config.validate(), Err(FloodError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_failure_tier_weaker_than_straining() {
        let mut config = EngineConfig::default();
        config.risk.failure.compound_streak = 1;
        assert!(matches!(config.validate(), Err(FloodError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = EngineConfig::from_toml_str("[aggregation]\nbaseline_day_m = \"high\"\n");
        assert!(matches!(result, Err(FloodError::Toml(_))));
    }
}
