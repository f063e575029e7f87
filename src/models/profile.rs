// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cycle profile supplied by the caller (the user-profile service owns it).

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::time_utils::parse_timezone;

pub const DEFAULT_CYCLE_LENGTH: u32 = 7;

/// The user's cycle parameters for one read/write operation.
///
/// This service only reads these; profile data is treated as untrusted input
/// and degraded gracefully (unknown timezone falls back to UTC, a degenerate
/// cycle length behaves as "always day 1") rather than rejected.
#[derive(Debug, Clone, Copy)]
pub struct CycleProfile {
    pub cycle_start_date: Option<NaiveDate>,
    pub cycle_length_days: u32,
    pub timezone: Tz,
}

impl CycleProfile {
    pub fn new(cycle_start_date: Option<NaiveDate>, cycle_length_days: u32, timezone: &str) -> Self {
        Self {
            cycle_start_date,
            cycle_length_days,
            timezone: parse_timezone(timezone),
        }
    }
}

impl Default for CycleProfile {
    fn default() -> Self {
        Self {
            cycle_start_date: None,
            cycle_length_days: DEFAULT_CYCLE_LENGTH,
            timezone: Tz::UTC,
        }
    }
}
