// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schedule CRUD routes.

use crate::error::{AppError, Result};
use crate::models::{ScheduleAssignment, ScheduleItem};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{user_id}/schedule", get(get_schedule))
        .route("/api/users/{user_id}/schedule", delete(delete_schedule))
        .route(
            "/api/users/{user_id}/schedule/days/{day_number}",
            put(save_day),
        )
        .route(
            "/api/users/{user_id}/schedule/days/{day_number}",
            delete(delete_day),
        )
        .route(
            "/api/users/{user_id}/schedule/defaults",
            post(init_defaults),
        )
}

// ─── Read ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ScheduleQuery {
    /// Restrict the response to one cycle day.
    pub day: Option<u32>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScheduleResponse {
    pub assignments: Vec<ScheduleAssignment>,
}

/// Get the user's schedule, optionally filtered to one cycle day.
async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>> {
    let assignments = match query.day {
        Some(day) => state.schedule.assignments_for_day(&user_id, day).await?,
        None => state.schedule.assignments_for_user(&user_id).await?,
    };
    Ok(Json(ScheduleResponse { assignments }))
}

// ─── Write ───────────────────────────────────────────────────

fn default_cycle_length() -> u32 {
    crate::models::DEFAULT_CYCLE_LENGTH
}

#[derive(Deserialize)]
pub struct SaveDayRequest {
    /// Ordered assignments for the day. Empty means rest.
    pub items: Vec<ScheduleItem>,
    /// Used to validate `day_number` is inside the cycle.
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SaveDayResponse {
    pub assignments: Vec<ScheduleAssignment>,
}

/// Replace one cycle day's assignments.
async fn save_day(
    State(state): State<Arc<AppState>>,
    Path((user_id, day_number)): Path<(String, u32)>,
    Json(request): Json<SaveDayRequest>,
) -> Result<Json<SaveDayResponse>> {
    if day_number < 1 || day_number > request.cycle_length {
        return Err(AppError::BadRequest(format!(
            "day_number must be between 1 and {}",
            request.cycle_length
        )));
    }
    let assignments = state
        .schedule
        .save_day(&user_id, day_number, &request.items)
        .await?;
    Ok(Json(SaveDayResponse { assignments }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Remove one cycle day's assignments.
async fn delete_day(
    State(state): State<Arc<AppState>>,
    Path((user_id, day_number)): Path<(String, u32)>,
) -> Result<Json<DeleteResponse>> {
    state.schedule.clear_day(&user_id, day_number).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: format!("cleared day {}", day_number),
    }))
}

/// Remove the user's entire schedule.
async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.schedule.clear_all_for_user(&user_id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "schedule cleared".to_string(),
    }))
}

#[derive(Deserialize, Default)]
pub struct InitDefaultsRequest {
    /// Split plan to seed from; falls back to a pattern picked by the number
    /// of workout days the user has defined.
    pub plan_id: Option<String>,
}

/// Seed a default 7-day schedule.
async fn init_defaults(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<InitDefaultsRequest>,
) -> Result<Json<ScheduleResponse>> {
    let assignments = state
        .schedule
        .initialize_default_schedule(&user_id, request.plan_id.as_deref())
        .await?;
    Ok(Json(ScheduleResponse { assignments }))
}
