// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only catalog data: weights-day definitions and cardio/mobility
//! templates. Owned by configuration, never mutated by this service.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A named weights day within a split plan (e.g. "Push", "Lower B").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutDayDefinition {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Split plan this day belongs to (e.g. "ppl", "upper_lower")
    pub plan_id: Option<String>,
    /// Position within the plan, used to order definitions for pattern seeding
    pub position: u32,
}

/// Category of a cardio/mobility template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TemplateKind {
    Cardio,
    Mobility,
}

/// A cardio or mobility session template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutTemplate {
    pub id: String,
    pub name: String,
    pub kind: TemplateKind,
    pub duration_minutes: u32,
}
