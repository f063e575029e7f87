// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month-grid calendar projection.
//!
//! A month view is a Sunday-start grid of whole weeks (28, 35 or 42 cells)
//! with leading and trailing days from the adjacent months. Each cell carries
//! the cycle-day projection of the user's schedule plus the sessions actually
//! logged on that local date.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Days, Duration, NaiveDate, TimeZone, Utc};

use crate::error::{AppError, Result};
use crate::models::{CalendarDay, CycleProfile, ScheduleAssignment, UnifiedSession};
use crate::services::cycle::{cycle_day_for_date, local_date_today};
use crate::services::grouping::group_by_local_date;
use crate::services::schedule::ScheduleService;
use crate::store::ScheduleStore;

/// Calendar grid builder over the schedule service and session store.
#[derive(Clone)]
pub struct CalendarService {
    store: Arc<dyn ScheduleStore>,
    schedule: ScheduleService,
}

impl CalendarService {
    pub fn new(store: Arc<dyn ScheduleStore>, schedule: ScheduleService) -> Self {
        Self { store, schedule }
    }

    /// Build the grid for one month.
    ///
    /// A profile without an anchor date (or with an empty schedule) disables
    /// the cycle projection; cells still carry sessions and date metadata. A
    /// failed schedule read degrades the same way rather than failing the
    /// whole render, since the session history is independently useful.
    pub async fn month_view(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        profile: CycleProfile,
    ) -> Result<Vec<CalendarDay>> {
        let tz = profile.timezone;
        let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::BadRequest(format!("invalid month: {}-{}", year, month)))?;
        let grid = month_grid_dates(first_of_month);

        let assignments = match self.schedule.assignments_for_user(user_id).await {
            Ok(assignments) => assignments,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Schedule read failed; rendering calendar without projection");
                vec![]
            }
        };
        let mut assignments_by_cycle_day: HashMap<u32, Vec<ScheduleAssignment>> = HashMap::new();
        for assignment in assignments {
            assignments_by_cycle_day
                .entry(assignment.day_number)
                .or_default()
                .push(assignment);
        }

        let sessions = self.fetch_grid_sessions(user_id, &grid).await?;
        let sessions_by_date = group_by_local_date(&sessions, tz);

        let today = local_date_today(tz);
        Ok(build_calendar_days(
            &grid,
            first_of_month,
            today,
            &sessions_by_date,
            &assignments_by_cycle_day,
            profile.cycle_start_date,
            profile.cycle_length_days,
        ))
    }

    /// Sessions overlapping the grid, queried in UTC.
    ///
    /// The range is padded by a day on each side, which covers every timezone
    /// offset without a per-zone conversion; grouping then assigns each
    /// session to its exact local date.
    async fn fetch_grid_sessions(
        &self,
        user_id: &str,
        grid: &[NaiveDate],
    ) -> Result<Vec<UnifiedSession>> {
        let (Some(first), Some(last)) = (grid.first(), grid.last()) else {
            return Ok(vec![]);
        };
        let from = utc_midnight(*first - Duration::days(1));
        let to = utc_midnight(*last + Duration::days(2));

        self.store
            .sessions_for_range(user_id, from, to)
            .await
            .map_err(|e| AppError::Store(format!("failed to load sessions: {}", e)))
    }
}

fn utc_midnight(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// Dates of the Sunday-start grid covering `first_of_month`'s month.
///
/// Always a whole number of weeks: leading days pad back to the previous
/// Sunday and trailing days pad forward to a Saturday.
pub fn month_grid_dates(first_of_month: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month.with_day(1).unwrap_or(first_of_month);
    let lead = first.weekday().num_days_from_sunday() as u64;
    let grid_start = first - Days::new(lead);

    let last = last_day_of_month(first);
    let trail = 6 - last.weekday().num_days_from_sunday() as u64;
    let grid_end = last + Days::new(trail);

    grid_start
        .iter_days()
        .take_while(|d| *d <= grid_end)
        .collect()
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_month
        .map(|d| d - Days::new(1))
        .unwrap_or(first)
}

/// Assemble the cells from pre-fetched data.
#[allow(clippy::too_many_arguments)]
pub fn build_calendar_days(
    grid: &[NaiveDate],
    first_of_month: NaiveDate,
    today: NaiveDate,
    sessions_by_date: &HashMap<String, Vec<UnifiedSession>>,
    assignments_by_cycle_day: &HashMap<u32, Vec<ScheduleAssignment>>,
    cycle_start: Option<NaiveDate>,
    cycle_length: u32,
) -> Vec<CalendarDay> {
    let project = cycle_start.filter(|_| !assignments_by_cycle_day.is_empty());

    grid.iter()
        .map(|&date| {
            let date_key = date.format("%Y-%m-%d").to_string();
            let cycle_day =
                project.and_then(|start| cycle_day_for_date(date, start, cycle_length));
            let day_assignments = cycle_day
                .and_then(|d| assignments_by_cycle_day.get(&d))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let sessions = sessions_by_date
                .get(&date_key)
                .cloned()
                .unwrap_or_default();
            let has_completed_session = sessions.iter().any(|s| s.is_completed());

            CalendarDay {
                date,
                date_key,
                is_current_month: date.month() == first_of_month.month()
                    && date.year() == first_of_month.year(),
                is_today: date == today,
                is_future: date > today,
                cycle_day,
                assignment: day_assignments.first().cloned(),
                assignment_count: day_assignments.len(),
                sessions,
                has_completed_session,
            }
        })
        .collect()
}
