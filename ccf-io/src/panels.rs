//! Chart series for the five result panels.
//!
//! Each panel is exported as a JSON file holding its title, axis labels, and
//! data points. The renderer only reads these files; missing values are
//! written as `null`.

use ccf_hydro::{DailyRecord, FloodError, RiskState};
use ccf_utils::dates::format_date;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Daily effective water level range and rainfall total.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelinePoint {
    pub date: String,
    pub max_ewl_m: Option<f64>,
    pub min_ewl_m: Option<f64>,
    pub sum_rainfall_mm: Option<f64>,
}

/// A single (date, value) pair used for line and bar chart data points.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateValue {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiskBandPoint {
    pub date: String,
    pub risk_state: RiskState,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Panel<T> {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<T>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PanelSet {
    pub timeline: Panel<TimelinePoint>,
    pub cfl_curve: Panel<DateValue>,
    pub phwe_bars: Panel<DateValue>,
    pub risk_band: Panel<RiskBandPoint>,
    pub escalation_gauge: Panel<DateValue>,
}

const X_LABEL: &str = "Date (UTC)";

fn date_values(daily: &[DailyRecord], value: impl Fn(&DailyRecord) -> f64) -> Vec<DateValue> {
    daily
        .iter()
        .map(|d| DateValue {
            date: format_date(&d.date),
            value: value(d),
        })
        .collect()
}

pub fn build_panels(daily: &[DailyRecord]) -> PanelSet {
    PanelSet {
        timeline: Panel {
            title: "Water level timeline (daily max/min EWL) and rainfall",
            x_label: X_LABEL,
            y_label: "EWL (m) / rainfall (mm)",
            points: daily
                .iter()
                .map(|d| TimelinePoint {
                    date: format_date(&d.date),
                    max_ewl_m: d.max_ewl_m,
                    min_ewl_m: d.min_ewl_m,
                    sum_rainfall_mm: d.sum_rainfall_mm,
                })
                .collect(),
        },
        cfl_curve: Panel {
            title: "Cumulative Flood Load (CFL)",
            x_label: X_LABEL,
            y_label: "Cumulative CFL (m·h)",
            points: date_values(daily, |d| d.cumulative_cfl),
        },
        phwe_bars: Panel {
            title: "Persistent High-Water excess (PHWe) during night window",
            x_label: X_LABEL,
            y_label: "Daily PHWe (m·h)",
            points: date_values(daily, |d| d.daily_phwe),
        },
        risk_band: Panel {
            title: "Daily risk state",
            x_label: X_LABEL,
            y_label: "",
            points: daily
                .iter()
                .map(|d| RiskBandPoint {
                    date: format_date(&d.date),
                    risk_state: d.risk_state,
                    color: d.risk_state.color(),
                })
                .collect(),
        },
        escalation_gauge: Panel {
            title: "Escalation gauge (risk multiplier)",
            x_label: X_LABEL,
            y_label: "risk_multiplier (dimensionless)",
            points: date_values(daily, |d| d.risk_multiplier),
        },
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FloodError> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}

/// Write each panel to `<output_dir>/<panel name>.json`.
///
/// Returns `(name, path)` pairs in panel order.
pub fn write_panels(output_dir: &Path, panels: &PanelSet) -> Result<Vec<(String, PathBuf)>, FloodError> {
    let series = [
        ("panel1_timeline", serde_json::to_value(&panels.timeline)?),
        ("panel2_cfl_curve", serde_json::to_value(&panels.cfl_curve)?),
        ("panel3_phwe_bars", serde_json::to_value(&panels.phwe_bars)?),
        ("panel4_risk_band", serde_json::to_value(&panels.risk_band)?),
        ("panel5_escalation_gauge", serde_json::to_value(&panels.escalation_gauge)?),
    ];

    let mut written = Vec::with_capacity(series.len());
    for (name, value) in series {
        let path = output_dir.join(format!("{name}.json"));
        write_json(&path, &value)?;
        written.push((name.to_string(), path));
    }
    log::info!("panels: Wrote {} panel series to {}", written.len(), output_dir.display());
    Ok(written)
}
