// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store backend for tests and local development.
//!
//! Mirrors the production store's behavior, including the pre-migration
//! schema: constructed via [`MemoryStore::unmigrated`], it rejects ordered
//! inserts and enforces one assignment per (user, day), which exercises the
//! writer's fallback paths without a real backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{
    NewAssignment, StoredAssignment, UnifiedSession, WorkoutDayDefinition, WorkoutTemplate,
};
use crate::store::{ScheduleStore, StoreError};

/// What the deployed schema supports.
#[derive(Debug, Clone, Copy)]
pub struct SchemaCapabilities {
    /// Whether the assignments table has the ordering column and allows
    /// several rows per (user, day).
    pub multi_assignments_per_day: bool,
}

impl Default for SchemaCapabilities {
    fn default() -> Self {
        Self {
            multi_assignments_per_day: true,
        }
    }
}

/// In-memory schedule store, keyed per user.
#[derive(Default)]
pub struct MemoryStore {
    capabilities: SchemaCapabilities,
    assignments: DashMap<String, Vec<StoredAssignment>>,
    definitions: DashMap<String, Vec<WorkoutDayDefinition>>,
    templates: DashMap<String, WorkoutTemplate>,
    sessions: DashMap<String, Vec<UnifiedSession>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store behaving like the pre-migration schema.
    pub fn unmigrated() -> Self {
        Self {
            capabilities: SchemaCapabilities {
                multi_assignments_per_day: false,
            },
            ..Self::default()
        }
    }

    fn allocate_id(&self) -> String {
        format!("a{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn store_row(&self, row: &NewAssignment, sort_order: Option<i32>) -> StoredAssignment {
        let stored = StoredAssignment {
            id: self.allocate_id(),
            user_id: row.user_id.clone(),
            day_number: row.day_number,
            is_rest_day: row.is_rest_day,
            workout_day_ref: row.workout_day_ref.clone(),
            template_ref: row.template_ref.clone(),
            sort_order,
        };
        self.assignments
            .entry(row.user_id.clone())
            .or_default()
            .push(stored.clone());
        stored
    }

    fn day_occupied(&self, user_id: &str, day_number: u32) -> bool {
        self.assignments
            .get(user_id)
            .map(|rows| rows.iter().any(|r| r.day_number == day_number))
            .unwrap_or(false)
    }

    // ─── Seeding helpers (tests and local development) ──────────

    pub fn seed_definitions(&self, definitions: Vec<WorkoutDayDefinition>) {
        for definition in definitions {
            self.definitions
                .entry(definition.user_id.clone())
                .or_default()
                .push(definition);
        }
    }

    pub fn seed_template(&self, template: WorkoutTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn seed_sessions(&self, user_id: &str, sessions: Vec<UnifiedSession>) {
        self.sessions
            .entry(user_id.to_string())
            .or_default()
            .extend(sessions);
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn assignments_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        Ok(self
            .assignments
            .get(user_id)
            .map(|rows| rows.clone())
            .unwrap_or_default())
    }

    async fn assignments_for_day(
        &self,
        user_id: &str,
        day_number: u32,
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        Ok(self
            .assignments
            .get(user_id)
            .map(|rows| {
                rows.iter()
                    .filter(|r| r.day_number == day_number)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_assignments(
        &self,
        rows: &[NewAssignment],
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        if !self.capabilities.multi_assignments_per_day {
            // The old schema has no ordering column; that error fires before
            // any row is written, like a rejected SQL statement would.
            if rows.iter().any(|r| r.sort_order.is_some()) {
                return Err(StoreError::MissingOrderColumn(
                    "no such column: sort_order".to_string(),
                ));
            }
            for row in rows {
                if self.day_occupied(&row.user_id, row.day_number) {
                    return Err(StoreError::UniqueViolation(format!(
                        "duplicate assignment for user {} day {}",
                        row.user_id, row.day_number
                    )));
                }
            }
        }

        Ok(rows
            .iter()
            .map(|row| self.store_row(row, row.sort_order))
            .collect())
    }

    async fn insert_assignment_unordered(
        &self,
        row: &NewAssignment,
    ) -> Result<StoredAssignment, StoreError> {
        if !self.capabilities.multi_assignments_per_day
            && self.day_occupied(&row.user_id, row.day_number)
        {
            return Err(StoreError::UniqueViolation(format!(
                "duplicate assignment for user {} day {}",
                row.user_id, row.day_number
            )));
        }
        Ok(self.store_row(row, None))
    }

    async fn delete_assignments_for_day(
        &self,
        user_id: &str,
        day_number: u32,
    ) -> Result<(), StoreError> {
        if let Some(mut rows) = self.assignments.get_mut(user_id) {
            rows.retain(|r| r.day_number != day_number);
        }
        Ok(())
    }

    async fn delete_assignments_for_user(&self, user_id: &str) -> Result<(), StoreError> {
        self.assignments.remove(user_id);
        Ok(())
    }

    async fn workout_day_definitions(
        &self,
        user_id: &str,
        plan_id: Option<&str>,
    ) -> Result<Vec<WorkoutDayDefinition>, StoreError> {
        let mut definitions: Vec<WorkoutDayDefinition> = self
            .definitions
            .get(user_id)
            .map(|defs| {
                defs.iter()
                    .filter(|d| match plan_id {
                        Some(plan) => d.plan_id.as_deref() == Some(plan),
                        None => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        definitions.sort_by_key(|d| d.position);
        Ok(definitions)
    }

    async fn template(&self, id: &str) -> Result<Option<WorkoutTemplate>, StoreError> {
        Ok(self.templates.get(id).map(|t| t.clone()))
    }

    async fn sessions_for_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<UnifiedSession>, StoreError> {
        let mut sessions: Vec<UnifiedSession> = self
            .sessions
            .get(user_id)
            .map(|all| {
                all.iter()
                    .filter(|s| s.started_at >= from && s.started_at < to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        sessions.sort_by_key(|s| s.started_at);
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights_row(user: &str, day: u32, order: Option<i32>) -> NewAssignment {
        NewAssignment {
            user_id: user.to_string(),
            day_number: day,
            is_rest_day: false,
            workout_day_ref: Some("push".to_string()),
            template_ref: None,
            sort_order: order,
        }
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let store = MemoryStore::new();
        let rows = vec![weights_row("u1", 1, Some(0)), weights_row("u1", 1, Some(1))];

        let stored = store.insert_assignments(&rows).await.expect("insert");
        assert_eq!(stored.len(), 2);

        let read = store.assignments_for_day("u1", 1).await.expect("read");
        assert_eq!(read.len(), 2);
        assert!(store.assignments_for_day("u1", 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unmigrated_rejects_ordered_insert() {
        let store = MemoryStore::unmigrated();
        let err = store
            .insert_assignments(&[weights_row("u1", 1, Some(0))])
            .await
            .expect_err("should reject order column");
        assert!(matches!(err, StoreError::MissingOrderColumn(_)));
    }

    #[tokio::test]
    async fn test_unmigrated_enforces_unique_day() {
        let store = MemoryStore::unmigrated();
        store
            .insert_assignment_unordered(&weights_row("u1", 1, None))
            .await
            .expect("first insert");

        let err = store
            .insert_assignment_unordered(&weights_row("u1", 1, None))
            .await
            .expect_err("second insert should conflict");
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_delete_for_day_leaves_other_days() {
        let store = MemoryStore::new();
        store
            .insert_assignments(&[weights_row("u1", 1, Some(0)), weights_row("u1", 2, Some(0))])
            .await
            .expect("insert");

        store
            .delete_assignments_for_day("u1", 1)
            .await
            .expect("delete");

        assert!(store.assignments_for_day("u1", 1).await.unwrap().is_empty());
        assert_eq!(store.assignments_for_day("u1", 2).await.unwrap().len(), 1);
    }
}
