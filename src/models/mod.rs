// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod calendar;
pub mod catalog;
pub mod profile;
pub mod schedule;
pub mod session;

pub use calendar::CalendarDay;
pub use catalog::{TemplateKind, WorkoutDayDefinition, WorkoutTemplate};
pub use profile::{CycleProfile, DEFAULT_CYCLE_LENGTH};
pub use schedule::{
    NewAssignment, ScheduleAssignment, ScheduleItem, ScheduleItemKind, StoredAssignment,
};
pub use session::{SessionKind, UnifiedSession};
