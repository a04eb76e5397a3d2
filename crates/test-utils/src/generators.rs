//! Frame name generators.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Convenience constructor for a series start time.
///
/// # Panics
/// Panics on an impossible date; intended for tests only.
pub fn start(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid test date")
}

/// Frame file name in the current (underscore) grammar.
pub fn frame_name(variable: &str, level: Option<u32>, time: NaiveDateTime) -> String {
    let stamp = time.format("%d-%m-%Y_%H_%M");
    match level {
        Some(level) => format!("{}_{}_{}.png", variable, level, stamp),
        None => format!("{}_{}.png", variable, stamp),
    }
}

/// Frame file name in the legacy (colon) grammar.
pub fn legacy_frame_name(variable: &str, level: Option<u32>, time: NaiveDateTime) -> String {
    let stamp = time.format("%d-%m-%Y_%H:%M");
    match level {
        Some(level) => format!("{}_{}_{}.png", variable, level, stamp),
        None => format!("{}_{}.png", variable, stamp),
    }
}

/// `count` frame names spaced `step_hours` apart, in chronological order.
pub fn series(
    variable: &str,
    level: Option<u32>,
    first: NaiveDateTime,
    count: usize,
    step_hours: i64,
) -> Vec<String> {
    (0..count)
        .map(|i| frame_name(variable, level, first + Duration::hours(step_hours * i as i64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_name() {
        let t = start(2025, 6, 1, 3);
        assert_eq!(frame_name("slp", None, t), "slp_01-06-2025_03_00.png");
        assert_eq!(frame_name("u_temp", Some(500), t), "u_temp_500_01-06-2025_03_00.png");
        assert_eq!(legacy_frame_name("slp", None, t), "slp_01-06-2025_03:00.png");
    }

    #[test]
    fn test_series_crosses_midnight() {
        let names = series("slp", None, start(2025, 6, 1, 18), 3, 3);
        assert_eq!(
            names,
            vec![
                "slp_01-06-2025_18_00.png",
                "slp_01-06-2025_21_00.png",
                "slp_02-06-2025_00_00.png",
            ]
        );
    }
}
