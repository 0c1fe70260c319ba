//! Time helpers

use chrono::{DateTime, Local, NaiveDateTime};

/// Format an instant as a local wall-clock timestamp without timezone
/// suffix (`YYYY-MM-DDTHH:MM:SS`).
///
/// The by-date rotation query is evaluated against local plant time; a
/// timezone conversion here would shift the active block.
pub fn format_wall_clock(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Current local wall-clock timestamp, formatted for the by-date query
pub fn wall_clock_now() -> String {
    format_wall_clock(Local::now())
}

/// Parse a wall-clock timestamp produced by [`format_wall_clock`]
pub fn parse_wall_clock(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wall_clock_format() {
        let at = Local.with_ymd_and_hms(2025, 1, 10, 14, 5, 9).unwrap();
        assert_eq!(format_wall_clock(at), "2025-01-10T14:05:09");
    }

    #[test]
    fn test_wall_clock_roundtrip() {
        let s = wall_clock_now();
        assert!(parse_wall_clock(&s).is_some());
        // no timezone suffix
        assert!(!s.ends_with('Z'));
        assert_eq!(s.len(), 19);
    }
}
