// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schedule read/write service.
//!
//! Writes follow a delete-then-insert protocol: a day's assignments are
//! replaced wholesale, never patched. The two store calls are not one
//! transaction, so a concurrent reader can observe a momentarily empty day;
//! that window is accepted rather than papered over.
//!
//! When the deployed storage schema predates the ordering-column migration,
//! saving a single workout falls back to the old single-insert shape; saving
//! several workouts on one day fails with an explicit migration error
//! instead of silently dropping items.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::{stream, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{
    NewAssignment, ScheduleAssignment, ScheduleItem, ScheduleItemKind, StoredAssignment,
    WorkoutTemplate,
};
use crate::services::patterns::{build_default_assignments, resolve_pattern};
use crate::store::ScheduleStore;

/// Assignments per day above which we flag an overtraining risk.
const OVERTRAINING_WARNING_THRESHOLD: usize = 3;

const MAX_CONCURRENT_TEMPLATE_FETCHES: usize = 8;

/// Fallback number of weights days picked up when no plan is given.
const DEFAULT_SEED_DAY_COUNT: usize = 3;

/// Schedule reader/writer over the store.
#[derive(Clone)]
pub struct ScheduleService {
    store: Arc<dyn ScheduleStore>,
}

impl ScheduleService {
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// All assignments for a user, joined with their referenced definition or
    /// template, ordered by (day, sort order). Empty schedule is `Ok(vec![])`.
    pub async fn assignments_for_user(&self, user_id: &str) -> Result<Vec<ScheduleAssignment>> {
        let rows = self
            .store
            .assignments_for_user(user_id)
            .await
            .map_err(|e| AppError::Store(format!("failed to load schedule: {}", e)))?;
        self.with_display_data(user_id, rows).await
    }

    /// Assignments for one cycle day, joined and ordered.
    pub async fn assignments_for_day(
        &self,
        user_id: &str,
        day_number: u32,
    ) -> Result<Vec<ScheduleAssignment>> {
        let rows = self
            .store
            .assignments_for_day(user_id, day_number)
            .await
            .map_err(|e| AppError::Store(format!("failed to load schedule: {}", e)))?;
        self.with_display_data(user_id, rows).await
    }

    // ─── Writes ──────────────────────────────────────────────────

    /// Replace all assignments for one cycle day.
    ///
    /// `items` is ordered; each non-rest item is stored with its index as the
    /// sort order. An empty list and `[rest]` are equivalent: both leave the
    /// day with exactly one rest marker.
    pub async fn save_day(
        &self,
        user_id: &str,
        day_number: u32,
        items: &[ScheduleItem],
    ) -> Result<Vec<ScheduleAssignment>> {
        if day_number < 1 {
            return Err(AppError::BadRequest(
                "day_number must be at least 1".to_string(),
            ));
        }
        validate_items(items)?;

        // Step 1: clear the day. A failure here aborts before any insert, so
        // the day keeps its previous contents.
        self.store
            .delete_assignments_for_day(user_id, day_number)
            .await
            .map_err(|e| {
                AppError::Store(format!("failed to clear existing schedule: {}", e))
            })?;

        // Step 2: rest day (or nothing requested): a single rest marker,
        // written through the schema shape every deployment supports.
        if items.is_empty() || items[0].kind == ScheduleItemKind::Rest {
            let row = NewAssignment::rest(user_id, day_number);
            let stored = self
                .store
                .insert_assignment_unordered(&row)
                .await
                .map_err(|e| AppError::Store(format!("failed to save rest day: {}", e)))?;
            return self.with_display_data(user_id, vec![stored]).await;
        }

        if items.len() > OVERTRAINING_WARNING_THRESHOLD {
            tracing::warn!(
                user_id,
                day_number,
                count = items.len(),
                "More than {} workouts on one cycle day; overtraining risk",
                OVERTRAINING_WARNING_THRESHOLD
            );
        }

        // Step 3: bulk insert, each item tagged with its position.
        let rows: Vec<NewAssignment> = items
            .iter()
            .enumerate()
            .map(|(index, item)| NewAssignment::from_item(user_id, day_number, item, index as i32))
            .collect();

        match self.store.insert_assignments(&rows).await {
            Ok(stored) => self.with_display_data(user_id, stored).await,
            // Step 4: schema skew. The deployed schema cannot hold several
            // ordered rows per day.
            Err(e) if e.is_schema_skew() => {
                if rows.len() > 1 {
                    tracing::warn!(
                        user_id,
                        day_number,
                        count = rows.len(),
                        error = %e,
                        "Multi-assignment save rejected by pre-migration schema"
                    );
                    return Err(AppError::ScheduleMigrationRequired);
                }
                tracing::debug!(
                    user_id,
                    day_number,
                    "Retrying single assignment without ordering field"
                );
                let single = rows[0].clone().without_order();
                let stored = self
                    .store
                    .insert_assignment_unordered(&single)
                    .await
                    .map_err(|e| AppError::Store(format!("failed to save schedule: {}", e)))?;
                self.with_display_data(user_id, vec![stored]).await
            }
            Err(e) => Err(AppError::Store(format!("failed to save schedule: {}", e))),
        }
    }

    /// Remove all assignments for one cycle day.
    pub async fn clear_day(&self, user_id: &str, day_number: u32) -> Result<()> {
        self.store
            .delete_assignments_for_day(user_id, day_number)
            .await
            .map_err(|e| AppError::Store(format!("failed to clear schedule day: {}", e)))
    }

    /// Remove the user's entire schedule.
    pub async fn clear_all_for_user(&self, user_id: &str) -> Result<()> {
        self.store
            .delete_assignments_for_user(user_id)
            .await
            .map_err(|e| AppError::Store(format!("failed to clear schedule: {}", e)))
    }

    /// Seed a new user's 7-day schedule from a split pattern.
    ///
    /// Only used on first run, so no per-day delete is needed.
    pub async fn initialize_default_schedule(
        &self,
        user_id: &str,
        plan_id: Option<&str>,
    ) -> Result<Vec<ScheduleAssignment>> {
        let definitions = self
            .store
            .workout_day_definitions(user_id, plan_id)
            .await
            .map_err(|e| {
                AppError::Store(format!("failed to load workout day definitions: {}", e))
            })?;

        let definitions = if plan_id.is_some() {
            definitions
        } else {
            definitions
                .into_iter()
                .take(DEFAULT_SEED_DAY_COUNT)
                .collect()
        };

        let pattern = resolve_pattern(plan_id, definitions.len());
        let rows = build_default_assignments(user_id, pattern, &definitions);

        tracing::info!(
            user_id,
            plan = plan_id.unwrap_or("(by day count)"),
            definitions = definitions.len(),
            "Seeding default schedule"
        );

        let stored = self
            .store
            .insert_assignments(&rows)
            .await
            .map_err(|e| {
                AppError::Store(format!("failed to initialize default schedule: {}", e))
            })?;
        self.with_display_data(user_id, stored).await
    }

    // ─── Display expansion ───────────────────────────────────────

    /// Join stored rows with their referenced definition/template, normalize
    /// missing sort orders to 0, and order by (day, sort order).
    async fn with_display_data(
        &self,
        user_id: &str,
        rows: Vec<StoredAssignment>,
    ) -> Result<Vec<ScheduleAssignment>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let definitions = self
            .store
            .workout_day_definitions(user_id, None)
            .await
            .map_err(|e| {
                AppError::Store(format!("failed to load workout day definitions: {}", e))
            })?;
        let definitions_by_id: HashMap<&str, _> = definitions
            .iter()
            .map(|d| (d.id.as_str(), d.clone()))
            .collect();

        let mut template_ids: Vec<String> = rows
            .iter()
            .filter_map(|r| r.template_ref.clone())
            .collect();
        template_ids.sort_unstable();
        template_ids.dedup();

        let fetched: Vec<_> = stream::iter(template_ids)
            .map(|template_id| async move { self.store.template(&template_id).await })
            .buffer_unordered(MAX_CONCURRENT_TEMPLATE_FETCHES)
            .collect()
            .await;

        let mut templates_by_id: HashMap<String, WorkoutTemplate> = HashMap::new();
        for result in fetched {
            let template =
                result.map_err(|e| AppError::Store(format!("failed to load template: {}", e)))?;
            if let Some(template) = template {
                templates_by_id.insert(template.id.clone(), template);
            }
        }

        let mut assignments: Vec<ScheduleAssignment> = rows
            .into_iter()
            .map(|row| {
                let workout_day = row
                    .workout_day_ref
                    .as_deref()
                    .and_then(|id| definitions_by_id.get(id).cloned());
                let template = row
                    .template_ref
                    .as_deref()
                    .and_then(|id| templates_by_id.get(id).cloned());
                ScheduleAssignment::from_stored(row, workout_day, template)
            })
            .collect();

        assignments.sort_by_key(|a| (a.day_number, a.sort_order));
        Ok(assignments)
    }
}

/// Reject shapes the data model cannot represent: a ref-less workout item, or
/// a rest marker mixed in after other items (rest is exclusive; as the first
/// item it means "the whole day is rest").
fn validate_items(items: &[ScheduleItem]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        match item.kind {
            ScheduleItemKind::Rest => {
                if index > 0 {
                    return Err(AppError::BadRequest(
                        "rest cannot be combined with other assignments".to_string(),
                    ));
                }
            }
            ScheduleItemKind::Weights | ScheduleItemKind::Cardio | ScheduleItemKind::Mobility => {
                if item.ref_id.as_deref().unwrap_or("").is_empty() {
                    return Err(AppError::BadRequest(format!(
                        "item {} is missing its workout reference",
                        index
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_refless_workout() {
        let items = [ScheduleItem {
            kind: ScheduleItemKind::Weights,
            ref_id: None,
        }];
        assert!(matches!(
            validate_items(&items),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_rejects_rest_after_workouts() {
        let items = [ScheduleItem::weights("push"), ScheduleItem::rest()];
        assert!(matches!(
            validate_items(&items),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_accepts_leading_rest_and_plain_items() {
        assert!(validate_items(&[ScheduleItem::rest()]).is_ok());
        assert!(validate_items(&[
            ScheduleItem::weights("push"),
            ScheduleItem::cardio("run"),
            ScheduleItem::mobility("yoga"),
        ])
        .is_ok());
        assert!(validate_items(&[]).is_ok());
    }
}
