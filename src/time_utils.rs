// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and timezone resolution.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format an absolute instant as a `YYYY-MM-DD` key in the given timezone.
///
/// This is the wall-clock date the instant fell on for the user, which can
/// differ from the UTC calendar date near midnight.
pub fn local_date_key(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Parse an IANA timezone name, falling back to UTC on unknown input.
///
/// Profile data is untrusted here; a bad zone degrades the date math to UTC
/// instead of failing the whole request.
pub fn parse_timezone(raw: &str) -> Tz {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(timezone = raw, "Unknown timezone, falling back to UTC");
        Tz::UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .expect("valid datetime")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let date = instant("2024-03-15T23:30:00Z");
        assert_eq!(format_utc_rfc3339(date), "2024-03-15T23:30:00Z");
    }

    #[test]
    fn test_local_date_key_depends_on_timezone() {
        let late_evening_utc = instant("2024-03-15T23:30:00Z");

        assert_eq!(local_date_key(late_evening_utc, Tz::UTC), "2024-03-15");
        // Tokyo is UTC+9, so the same instant is already the next day there.
        assert_eq!(
            local_date_key(late_evening_utc, parse_timezone("Asia/Tokyo")),
            "2024-03-16"
        );
        // Los Angeles (DST, UTC-7) is still mid-afternoon the same day.
        assert_eq!(
            local_date_key(late_evening_utc, parse_timezone("America/Los_Angeles")),
            "2024-03-15"
        );
    }

    #[test]
    fn test_parse_timezone_falls_back_to_utc() {
        assert_eq!(parse_timezone("Not/AZone"), Tz::UTC);
        assert_eq!(parse_timezone("Europe/Berlin").name(), "Europe/Berlin");
    }
}
