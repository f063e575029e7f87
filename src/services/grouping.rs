// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bucketing session history by local calendar date.

use std::collections::HashMap;

use chrono_tz::Tz;

use crate::models::UnifiedSession;
use crate::time_utils::local_date_key;

/// Group sessions by the `YYYY-MM-DD` their start instant falls on in `tz`,
/// preserving input order within each bucket.
///
/// This exists instead of grouping by the UTC date: two sessions on different
/// UTC calendar days can belong to the same local day (and vice versa)
/// depending on the timezone offset.
pub fn group_by_local_date(
    sessions: &[UnifiedSession],
    tz: Tz,
) -> HashMap<String, Vec<UnifiedSession>> {
    let mut buckets: HashMap<String, Vec<UnifiedSession>> = HashMap::new();
    for session in sessions {
        buckets
            .entry(local_date_key(session.started_at, tz))
            .or_default()
            .push(session.clone());
    }
    buckets
}
