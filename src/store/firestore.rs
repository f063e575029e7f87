// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore store backend with typed operations.
//!
//! Collections:
//! - `schedule_assignments` (one document per assignment row)
//! - `workout_days` (weights-day definitions, read-only)
//! - `workout_templates` (cardio/mobility templates, read-only)
//! - `unified_sessions` (session history, read-only)
//!
//! Post-migration assignment documents are keyed `{user}_{day}_{slot}`; the
//! pre-migration deployment keyed them `{user}_{day}`, which is where the
//! unique-per-day conflicts classified in `store::classify_backend_error`
//! come from.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    NewAssignment, StoredAssignment, UnifiedSession, WorkoutDayDefinition, WorkoutTemplate,
};
use crate::store::{classify_backend_error, collections, ScheduleStore, StoreError};
use crate::time_utils::format_utc_rfc3339;

/// Firestore schedule store.
#[derive(Clone)]
pub struct FirestoreScheduleStore {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreScheduleStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, StoreError> {
        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, StoreError> {
        self.client
            .as_ref()
            .ok_or_else(|| StoreError::Backend("Database not connected (offline mode)".to_string()))
    }

    /// Document id for an assignment row. The id is also stored in the
    /// document fields so reads stay a plain `.obj()` query.
    ///
    /// Pre-migration deployments keyed documents by `{user}_{day}` only, so
    /// a slot-less id collides when a row for that day already exists.
    fn assignment_doc_id(row: &NewAssignment, slot: Option<i32>) -> String {
        match slot {
            Some(slot) => format!("{}_{}_{}", row.user_id, row.day_number, slot),
            None => format!("{}_{}", row.user_id, row.day_number),
        }
    }

    fn stored_row(row: &NewAssignment, id: String, sort_order: Option<i32>) -> StoredAssignment {
        StoredAssignment {
            id,
            user_id: row.user_id.clone(),
            day_number: row.day_number,
            is_rest_day: row.is_rest_day,
            workout_day_ref: row.workout_day_ref.clone(),
            template_ref: row.template_ref.clone(),
            sort_order,
        }
    }

    async fn query_assignments(
        &self,
        user_id: &str,
        day_number: Option<u32>,
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        let user_id = user_id.to_string();
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::SCHEDULE_ASSIGNMENTS);

        let query = if let Some(day) = day_number {
            query.filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("day_number").eq(day),
                ])
            })
        } else {
            query.filter(move |q| q.field("user_id").eq(user_id.clone()))
        };

        // No order_by here: ordering by sort_order would silently drop legacy
        // documents that lack the field. The service layer sorts after
        // normalization.
        query
            .obj()
            .query()
            .await
            .map_err(|e| classify_backend_error(e.to_string()))
    }

    /// Delete documents by id in a single transaction.
    async fn batch_delete(&self, doc_ids: &[String], collection: &str) -> Result<(), StoreError> {
        if doc_ids.is_empty() {
            return Ok(());
        }
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to begin transaction: {}", e)))?;

        for doc_id in doc_ids {
            client
                .fluent()
                .delete()
                .from(collection)
                .document_id(doc_id)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    StoreError::Backend(format!(
                        "Failed to add deletion to transaction for {}: {}",
                        collection, e
                    ))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to commit batch deletion: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl ScheduleStore for FirestoreScheduleStore {
    async fn assignments_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        self.query_assignments(user_id, None).await
    }

    async fn assignments_for_day(
        &self,
        user_id: &str,
        day_number: u32,
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        self.query_assignments(user_id, Some(day_number)).await
    }

    async fn insert_assignments(
        &self,
        rows: &[NewAssignment],
    ) -> Result<Vec<StoredAssignment>, StoreError> {
        let client = self.get_client()?;

        // All rows land in one transaction so a skew rejection leaves nothing
        // half-written.
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to begin transaction: {}", e)))?;

        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let doc_id = Self::assignment_doc_id(row, row.sort_order);
            let doc = Self::stored_row(row, doc_id.clone(), row.sort_order);

            client
                .fluent()
                .update()
                .in_col(collections::SCHEDULE_ASSIGNMENTS)
                .document_id(&doc_id)
                .object(&doc)
                .add_to_transaction(&mut transaction)
                .map_err(|e| classify_backend_error(e.to_string()))?;

            stored.push(doc);
        }

        transaction
            .commit()
            .await
            .map_err(|e| classify_backend_error(e.to_string()))?;

        Ok(stored)
    }

    async fn insert_assignment_unordered(
        &self,
        row: &NewAssignment,
    ) -> Result<StoredAssignment, StoreError> {
        let doc_id = Self::assignment_doc_id(row, None);
        let doc = Self::stored_row(row, doc_id.clone(), None);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::SCHEDULE_ASSIGNMENTS)
            .document_id(&doc_id)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| classify_backend_error(e.to_string()))?;

        Ok(doc)
    }

    async fn delete_assignments_for_day(
        &self,
        user_id: &str,
        day_number: u32,
    ) -> Result<(), StoreError> {
        let doc_ids: Vec<String> = self
            .query_assignments(user_id, Some(day_number))
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect();
        self.batch_delete(&doc_ids, collections::SCHEDULE_ASSIGNMENTS)
            .await
    }

    async fn delete_assignments_for_user(&self, user_id: &str) -> Result<(), StoreError> {
        let doc_ids: Vec<String> = self
            .query_assignments(user_id, None)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect();
        self.batch_delete(&doc_ids, collections::SCHEDULE_ASSIGNMENTS)
            .await
    }

    async fn workout_day_definitions(
        &self,
        user_id: &str,
        plan_id: Option<&str>,
    ) -> Result<Vec<WorkoutDayDefinition>, StoreError> {
        let user_id = user_id.to_string();
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUT_DAYS);

        let query = if let Some(plan) = plan_id {
            let plan = plan.to_string();
            query.filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("plan_id").eq(plan.clone()),
                ])
            })
        } else {
            query.filter(move |q| q.field("user_id").eq(user_id.clone()))
        };

        query
            .order_by([(
                "position",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| classify_backend_error(e.to_string()))
    }

    async fn template(&self, id: &str) -> Result<Option<WorkoutTemplate>, StoreError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUT_TEMPLATES)
            .obj()
            .one(id)
            .await
            .map_err(|e| classify_backend_error(e.to_string()))
    }

    async fn sessions_for_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<UnifiedSession>, StoreError> {
        let user_id = user_id.to_string();
        // started_at is stored RFC3339, which compares lexicographically.
        let from = format_utc_rfc3339(from);
        let to = format_utc_rfc3339(to);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::UNIFIED_SESSIONS)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("started_at").greater_than_or_equal(from.clone()),
                    q.field("started_at").less_than(to.clone()),
                ])
            })
            .order_by([(
                "started_at",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| classify_backend_error(e.to_string()))
    }
}
