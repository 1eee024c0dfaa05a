//! Console summary of the most recent days.

use crate::analyze::AnalysisReport;
use ccf_hydro::DailyRecord;
use ccf_utils::dates::format_date;
use ccf_utils::numbers::format_thousands;
use std::fmt::Write;

pub const DEFAULT_TAIL_DAYS: usize = 14;

const COLUMNS: [&str; 8] = [
    "date",
    "daily_CFL",
    "daily_PHWe",
    "cumulative_CFL",
    "cumulative_PHWe",
    "consecutive_compound_cycles",
    "risk_multiplier",
    "risk_state",
];

fn row(d: &DailyRecord) -> [String; 8] {
    [
        format_date(&d.date),
        format_thousands(d.daily_cfl),
        format_thousands(d.daily_phwe),
        format_thousands(d.cumulative_cfl),
        format_thousands(d.cumulative_phwe),
        d.consecutive_compound_cycles.to_string(),
        format_thousands(d.risk_multiplier),
        d.risk_state.to_string(),
    ]
}

/// Right-aligned table of the last `tail` days.
pub fn tail_table(daily: &[DailyRecord], tail: usize) -> String {
    let rows: Vec<[String; 8]> = daily[daily.len().saturating_sub(tail)..]
        .iter()
        .map(row)
        .collect();

    let mut widths = COLUMNS.map(str::len);
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths)
        .map(|(name, w)| format!("{name:>w$}"))
        .collect();
    let _ = writeln!(out, "{}", header.join(" "));
    for r in &rows {
        let cells: Vec<String> = r.iter().zip(widths).map(|(c, w)| format!("{c:>w$}")).collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

pub fn render(report: &AnalysisReport, tail: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n=== Coastal Compound Flood Risk: Summary (last {} days) ===",
        tail.min(report.daily.len())
    );
    out.push_str(&tail_table(&report.daily, tail));
    let _ = writeln!(out, "\nSaved daily metrics to: {}", report.daily_table.display());
    let _ = writeln!(out, "Saved panel series:");
    for (name, path) in &report.panels {
        let _ = writeln!(out, "  - {}: {}", name, path.display());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccf_hydro::RiskState;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn record(day: u32, cumulative_cfl: f64, state: RiskState) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            daily_cfl: 2.5,
            daily_phwe: 0.0,
            daily_severe_phwe: 0.0,
            cumulative_cfl,
            cumulative_phwe: 0.0,
            cumulative_severe_phwe: 0.0,
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
            risk_state: state,
            risk_multiplier: 1.0 + cumulative_cfl / 40.0,
        }
    }

    #[test]
    fn test_tail_table_keeps_last_rows() {
        let daily: Vec<DailyRecord> = (1..=20)
            .map(|d| record(d, 2.5 * d as f64, RiskState::Stable))
            .collect();
        let table = tail_table(&daily, 3);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].trim_start().starts_with("date"));
        assert!(lines[1].trim_start().starts_with("2024-01-18"));
        assert!(lines[3].contains("50.00"));
        assert!(lines[3].ends_with("Stable"));
    }

    #[test]
    fn test_tail_longer_than_series_shows_everything() {
        let daily = vec![record(1, 1234.5, RiskState::Failure)];
        let table = tail_table(&daily, 14);
        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("1,234.50"));
    }

    #[test]
    fn test_render_lists_outputs() {
        let report = AnalysisReport {
            daily: vec![record(1, 10.0, RiskState::Straining)],
            daily_table: PathBuf::from("output/daily_metrics_x.csv"),
            panels: vec![("panel1_timeline".to_string(), PathBuf::from("output/panel1_timeline.json"))],
        };
        let text = render(&report, DEFAULT_TAIL_DAYS);
        assert!(text.contains("(last 1 days)"));
        assert!(text.contains("Saved daily metrics to: output/daily_metrics_x.csv"));
        assert!(text.contains("  - panel1_timeline: output/panel1_timeline.json"));
        assert!(text.contains("Straining"));
    }
}
