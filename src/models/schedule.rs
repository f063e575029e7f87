// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schedule assignment models: stored rows, save-request items, and the
//! display shape returned to the frontend.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::catalog::{WorkoutDayDefinition, WorkoutTemplate};

/// Kind of a single save-day item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ScheduleItemKind {
    Rest,
    Weights,
    Cardio,
    Mobility,
}

/// One requested assignment in a save-day call, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScheduleItem {
    pub kind: ScheduleItemKind,
    /// Weights-day definition id for `weights`, template id for
    /// `cardio`/`mobility`, absent for `rest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
}

impl ScheduleItem {
    pub fn rest() -> Self {
        Self {
            kind: ScheduleItemKind::Rest,
            ref_id: None,
        }
    }

    pub fn weights(ref_id: impl Into<String>) -> Self {
        Self {
            kind: ScheduleItemKind::Weights,
            ref_id: Some(ref_id.into()),
        }
    }

    pub fn cardio(ref_id: impl Into<String>) -> Self {
        Self {
            kind: ScheduleItemKind::Cardio,
            ref_id: Some(ref_id.into()),
        }
    }

    pub fn mobility(ref_id: impl Into<String>) -> Self {
        Self {
            kind: ScheduleItemKind::Mobility,
            ref_id: Some(ref_id.into()),
        }
    }
}

/// Assignment row as stored. `sort_order` is `None` for rows written before
/// the ordering-column migration or through the single-insert fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAssignment {
    /// Store document/row id
    pub id: String,
    pub user_id: String,
    /// 1-based position in the user's cycle
    pub day_number: u32,
    pub is_rest_day: bool,
    /// Weights-day definition reference (weights assignments only)
    pub workout_day_ref: Option<String>,
    /// Cardio/mobility template reference
    pub template_ref: Option<String>,
    /// Display order among same-day entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// A row to insert; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewAssignment {
    pub user_id: String,
    pub day_number: u32,
    pub is_rest_day: bool,
    pub workout_day_ref: Option<String>,
    pub template_ref: Option<String>,
    pub sort_order: Option<i32>,
}

impl NewAssignment {
    /// A rest-marker row. Rest is exclusive: the writer only ever stores one
    /// of these per day, replacing everything else.
    pub fn rest(user_id: impl Into<String>, day_number: u32) -> Self {
        Self {
            user_id: user_id.into(),
            day_number,
            is_rest_day: true,
            workout_day_ref: None,
            template_ref: None,
            sort_order: None,
        }
    }

    pub fn from_item(
        user_id: &str,
        day_number: u32,
        item: &ScheduleItem,
        sort_order: i32,
    ) -> Self {
        let (workout_day_ref, template_ref) = match item.kind {
            ScheduleItemKind::Rest => (None, None),
            ScheduleItemKind::Weights => (item.ref_id.clone(), None),
            ScheduleItemKind::Cardio | ScheduleItemKind::Mobility => (None, item.ref_id.clone()),
        };
        Self {
            user_id: user_id.to_string(),
            day_number,
            is_rest_day: item.kind == ScheduleItemKind::Rest,
            workout_day_ref,
            template_ref,
            sort_order: Some(sort_order),
        }
    }

    /// Drop the ordering field for the pre-migration single-insert fallback.
    pub fn without_order(mut self) -> Self {
        self.sort_order = None;
        self
    }
}

/// Assignment joined with its referenced definition/template for display.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScheduleAssignment {
    pub id: String,
    pub user_id: String,
    pub day_number: u32,
    pub is_rest_day: bool,
    pub workout_day_ref: Option<String>,
    pub template_ref: Option<String>,
    /// Normalized to 0 when the stored row has no ordering value.
    pub sort_order: i32,
    pub workout_day: Option<WorkoutDayDefinition>,
    pub template: Option<WorkoutTemplate>,
}

impl ScheduleAssignment {
    /// Build the display shape from a stored row, normalizing a missing
    /// ordering value to 0.
    pub fn from_stored(
        row: StoredAssignment,
        workout_day: Option<WorkoutDayDefinition>,
        template: Option<WorkoutTemplate>,
    ) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            day_number: row.day_number,
            is_rest_day: row.is_rest_day,
            workout_day_ref: row.workout_day_ref,
            template_ref: row.template_ref,
            sort_order: row.sort_order.unwrap_or(0),
            workout_day,
            template,
        }
    }
}
