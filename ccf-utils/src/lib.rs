//! Shared utility functions for CCF crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    /// Naive timestamp layouts accepted in hourly inputs, read as UTC.
    const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse an observation timestamp into UTC.
    ///
    /// Accepts RFC 3339 with any offset (`2023-01-01T05:00:00-05:00`, `...Z`),
    /// the same with a space separator, naive date-times (taken as UTC), and
    /// bare dates (midnight UTC). Fractional seconds are allowed.
    pub fn parse_timestamp_utc(s: &str) -> anyhow::Result<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Some(naive) = s.strip_suffix(" UTC").or_else(|| s.strip_suffix('Z')) {
            if let Ok(dt) = parse_naive(naive) {
                return Ok(dt.and_utc());
            }
        }
        if let Ok(dt) = parse_naive(s) {
            return Ok(dt.and_utc());
        }
        let date = parse_date(s).map_err(|_| anyhow::anyhow!("unrecognised timestamp '{s}'"))?;
        Ok(date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()).unwrap_or_default())
    }

    fn parse_naive(s: &str) -> anyhow::Result<NaiveDateTime> {
        for fmt in NAIVE_TIMESTAMP_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(dt);
            }
        }
        // Fractional seconds
        Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))?)
    }

}

/// Number formatting for summary tables
pub mod numbers {
    /// Format with two decimals and comma thousands separators, e.g. `12,345.68`.
    ///
    /// Non-finite values print as `NaN`, `inf` or `-inf`.
    pub fn format_thousands(value: f64) -> String {
        if !value.is_finite() {
            return format!("{value}");
        }
        let fixed = format!("{:.2}", value.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!("{sign}{grouped}.{frac_part}")
    }

    /// Like [`format_thousands`] but renders a missing value as `NaN`.
    pub fn format_optional(value: Option<f64>) -> String {
        value.map_or_else(|| "NaN".to_string(), format_thousands)
    }

}
