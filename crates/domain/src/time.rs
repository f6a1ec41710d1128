//! Wall-clock timestamps for rendered state.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded when a status response is applied to the page.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// `HH:MM:SS` rendering used in the page footer.
#[must_use]
pub fn clock(ts: Timestamp) -> String {
    ts.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        assert!(ts >= before);
    }

    #[test]
    fn should_format_clock_time() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(clock(ts), "09:05:07");
    }
}
