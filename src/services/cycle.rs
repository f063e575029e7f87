// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cycle-day arithmetic.
//!
//! Maps calendar dates onto the 1-based position in the user's repeating
//! cycle. "Today" is always resolved as a timezone-local calendar date, never
//! from the UTC timestamp, so a user in Tokyo gets Tokyo's date even while
//! UTC is still on the previous day.
//!
//! These are the date-derived source of truth for the cycle position. A
//! manually advanced per-profile counter existed in an earlier design; it
//! drifts whenever a user skips a day and is deliberately not reproduced.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::CycleProfile;

/// Resolve today's calendar date in the given timezone.
pub fn local_date_today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Cycle day for a known local date.
///
/// The double modulo wraps a future `cycle_start` backward into `[1, L]`
/// instead of producing zero or negative results. A degenerate cycle length
/// of 0 always yields day 1.
pub fn cycle_day_for_local_date(
    local_date: NaiveDate,
    cycle_start: NaiveDate,
    cycle_length: u32,
) -> u32 {
    if cycle_length == 0 {
        return 1;
    }
    let len = i64::from(cycle_length);
    let days_since_start = local_date.signed_duration_since(cycle_start).num_days();
    (((days_since_start % len) + len) % len + 1) as u32
}

/// Cycle day for "today" in the profile's timezone.
pub fn cycle_day_for_today(cycle_start: NaiveDate, tz: Tz, cycle_length: u32) -> u32 {
    cycle_day_for_local_date(local_date_today(tz), cycle_start, cycle_length)
}

/// Today's cycle day for a profile; `None` when no anchor date is set.
pub fn current_cycle_day(profile: &CycleProfile) -> Option<u32> {
    profile
        .cycle_start_date
        .map(|start| cycle_day_for_today(start, profile.timezone, profile.cycle_length_days))
}

/// Cycle day for an arbitrary calendar date, for projecting grid cells.
///
/// Returns `None` for dates before `cycle_start`: a date before the cycle
/// existed has no defined cycle day, so projection does not wrap backward.
pub fn cycle_day_for_date(
    date: NaiveDate,
    cycle_start: NaiveDate,
    cycle_length: u32,
) -> Option<u32> {
    let days_since_start = date.signed_duration_since(cycle_start).num_days();
    if days_since_start < 0 {
        return None;
    }
    if cycle_length <= 1 {
        return Some(1);
    }
    Some((days_since_start % i64::from(cycle_length) + 1) as u32)
}
