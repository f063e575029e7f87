// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer.
//!
//! The schedule engine consumes storage through the [`ScheduleStore`] trait:
//! typed select/insert/delete over three logical tables (assignments,
//! weights-day definitions, templates) plus a read-only session-history view.
//! Two implementations exist: Firestore for production and an in-memory store
//! for tests and local development.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreScheduleStore;
pub use memory::{MemoryStore, SchemaCapabilities};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    NewAssignment, StoredAssignment, UnifiedSession, WorkoutDayDefinition, WorkoutTemplate,
};

/// Collection names as constants.
pub mod collections {
    pub const SCHEDULE_ASSIGNMENTS: &str = "schedule_assignments";
    pub const WORKOUT_DAYS: &str = "workout_days";
    pub const WORKOUT_TEMPLATES: &str = "workout_templates";
    /// Unified session history (written by the session services, read-only here)
    pub const UNIFIED_SESSIONS: &str = "unified_sessions";
}

/// Typed store failure.
///
/// The two schema-skew variants exist so the writer's fallback policy (retry a
/// single insert without the ordering field, or demand a migration) can branch
/// on the error kind instead of string-matching inline.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The deployed schema has no ordering column for same-day assignments.
    #[error("ordering column not supported by schema: {0}")]
    MissingOrderColumn(String),

    /// The deployed schema enforces one assignment per (user, day).
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// True for the error kinds that signal a not-yet-migrated schema rather
    /// than a genuine failure.
    pub fn is_schema_skew(&self) -> bool {
        matches!(
            self,
            StoreError::MissingOrderColumn(_) | StoreError::UniqueViolation(_)
        )
    }
}

/// Map a backend error message to a typed [`StoreError`].
///
/// This is the single place where backend wording is interpreted; everything
/// above the store branches on the variant, never on the text.
pub fn classify_backend_error(message: String) -> StoreError {
    let lowered = message.to_lowercase();
    if lowered.contains("sort_order") && (lowered.contains("column") || lowered.contains("field")) {
        StoreError::MissingOrderColumn(message)
    } else if lowered.contains("already exists")
        || lowered.contains("already_exists")
        || lowered.contains("unique")
        || lowered.contains("duplicate")
    {
        StoreError::UniqueViolation(message)
    } else {
        StoreError::Backend(message)
    }
}

/// Store interface for schedule data.
///
/// All reads return `Ok` with an empty `Vec` (or `None`) when nothing matches;
/// "not found" is never an error at this layer.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All assignment rows for a user, unsorted. The service layer sorts
    /// after normalizing missing ordering values.
    async fn assignments_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<StoredAssignment>, StoreError>;

    /// Assignment rows for one cycle day.
    async fn assignments_for_day(
        &self,
        user_id: &str,
        day_number: u32,
    ) -> Result<Vec<StoredAssignment>, StoreError>;

    /// Bulk-insert rows, returning the stored rows with assigned ids.
    ///
    /// Rows carry `sort_order` values; a pre-migration schema rejects these
    /// with [`StoreError::MissingOrderColumn`] or
    /// [`StoreError::UniqueViolation`].
    async fn insert_assignments(
        &self,
        rows: &[NewAssignment],
    ) -> Result<Vec<StoredAssignment>, StoreError>;

    /// Insert a single row without the ordering field. This is the write
    /// shape every deployed schema supports.
    async fn insert_assignment_unordered(
        &self,
        row: &NewAssignment,
    ) -> Result<StoredAssignment, StoreError>;

    async fn delete_assignments_for_day(
        &self,
        user_id: &str,
        day_number: u32,
    ) -> Result<(), StoreError>;

    async fn delete_assignments_for_user(&self, user_id: &str) -> Result<(), StoreError>;

    /// Weights-day definitions for a user, ordered by position, optionally
    /// filtered to one split plan.
    async fn workout_day_definitions(
        &self,
        user_id: &str,
        plan_id: Option<&str>,
    ) -> Result<Vec<WorkoutDayDefinition>, StoreError>;

    async fn template(&self, id: &str) -> Result<Option<WorkoutTemplate>, StoreError>;

    /// Session history for a user within `[from, to)`, ordered by start time.
    async fn sessions_for_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<UnifiedSession>, StoreError>;
}
