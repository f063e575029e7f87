// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - scheduling and calendar logic.

pub mod calendar;
pub mod cycle;
pub mod grouping;
pub mod patterns;
pub mod schedule;

pub use calendar::CalendarService;
pub use schedule::ScheduleService;
