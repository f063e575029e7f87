// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar and cycle-day routes.

use crate::error::{AppError, Result};
use crate::models::{CalendarDay, CycleProfile, DEFAULT_CYCLE_LENGTH};
use crate::services::cycle::current_cycle_day;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/{user_id}/calendar/{year}/{month}",
            get(get_calendar_month),
        )
        .route("/api/users/{user_id}/cycle-day", get(get_cycle_day))
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    /// IANA timezone name; unrecognized values fall back to the server
    /// default.
    pub timezone: Option<String>,
    /// Cycle anchor date, `YYYY-MM-DD`. Absent disables the projection.
    pub cycle_start: Option<String>,
    pub cycle_length: Option<u32>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    /// Today in the requested timezone, `YYYY-MM-DD`.
    pub today: String,
    pub days: Vec<CalendarDay>,
}

/// Build the month grid for a user.
async fn get_calendar_month(
    State(state): State<Arc<AppState>>,
    Path((user_id, year, month)): Path<(String, i32, u32)>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    if !(1..=12).contains(&month) {
        return Err(AppError::BadRequest(format!("invalid month: {}", month)));
    }

    let cycle_start = query
        .cycle_start
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("invalid cycle_start date: {}", raw)))
        })
        .transpose()?;
    let profile = CycleProfile::new(
        cycle_start,
        query.cycle_length.unwrap_or(DEFAULT_CYCLE_LENGTH),
        query
            .timezone
            .as_deref()
            .unwrap_or(&state.config.default_timezone),
    );

    let today = crate::services::cycle::local_date_today(profile.timezone);
    let days = state
        .calendar
        .month_view(&user_id, year, month, profile)
        .await?;

    Ok(Json(CalendarResponse {
        year,
        month,
        today: today.format("%Y-%m-%d").to_string(),
        days,
    }))
}

#[derive(Deserialize)]
pub struct CycleDayQuery {
    pub cycle_start: String,
    pub timezone: Option<String>,
    pub cycle_length: Option<u32>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CycleDayResponse {
    pub cycle_day: u32,
}

/// Today's cycle day, derived from the anchor date in the user's timezone.
async fn get_cycle_day(
    State(state): State<Arc<AppState>>,
    Path(_user_id): Path<String>,
    Query(query): Query<CycleDayQuery>,
) -> Result<Json<CycleDayResponse>> {
    let cycle_start = NaiveDate::parse_from_str(&query.cycle_start, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("invalid cycle_start date: {}", query.cycle_start))
    })?;
    let profile = CycleProfile::new(
        Some(cycle_start),
        query.cycle_length.unwrap_or(DEFAULT_CYCLE_LENGTH),
        query
            .timezone
            .as_deref()
            .unwrap_or(&state.config.default_timezone),
    );

    let cycle_day = current_cycle_day(&profile)
        .ok_or_else(|| AppError::BadRequest("cycle_start is required".to_string()))?;
    Ok(Json(CycleDayResponse { cycle_day }))
}
