// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Cycleplan: workout cycle scheduling and calendar projection.
//!
//! This crate provides the backend API for a repeating N-day workout cycle:
//! mapping calendar dates to cycle days, seeding default split schedules,
//! replacing a day's assignments, and building the month calendar grid that
//! merges the projected schedule with completed session history.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::{CalendarService, ScheduleService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub schedule: ScheduleService,
    pub calendar: CalendarService,
}
