// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar grid cell, computed fresh per render and never persisted.

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::schedule::ScheduleAssignment;
use crate::models::session::UnifiedSession;

/// One cell of the month calendar grid.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarDay {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// `YYYY-MM-DD`, matches the session grouping keys
    pub date_key: String,
    pub is_current_month: bool,
    pub is_today: bool,
    /// Strictly after today at day granularity; time of day is ignored
    pub is_future: bool,
    /// 1-based cycle day, `None` before the cycle start or without a schedule
    pub cycle_day: Option<u32>,
    /// Primary projection: the first assignment of the cycle day
    pub assignment: Option<ScheduleAssignment>,
    /// Total assignments on that cycle day (the cell shows "+n more")
    pub assignment_count: usize,
    pub sessions: Vec<UnifiedSession>,
    pub has_completed_session: bool,
}
