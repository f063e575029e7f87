// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use cycleplan::config::Config;
use cycleplan::models::{
    SessionKind, TemplateKind, UnifiedSession, WorkoutDayDefinition, WorkoutTemplate,
};
use cycleplan::routes::create_router;
use cycleplan::services::{CalendarService, ScheduleService};
use cycleplan::store::MemoryStore;
use cycleplan::AppState;
use std::sync::Arc;

/// Create a test app over an in-memory store.
/// Returns the router and the store for seeding and direct inspection.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<MemoryStore>) {
    create_test_app_with_store(Arc::new(MemoryStore::new()))
}

/// Create a test app over a store behaving like the pre-migration schema.
#[allow(dead_code)]
pub fn create_test_app_unmigrated() -> (axum::Router, Arc<MemoryStore>) {
    create_test_app_with_store(Arc::new(MemoryStore::unmigrated()))
}

#[allow(dead_code)]
pub fn create_test_app_with_store(store: Arc<MemoryStore>) -> (axum::Router, Arc<MemoryStore>) {
    let config = Config::default();
    let store_dyn: Arc<dyn cycleplan::store::ScheduleStore> = store.clone();
    let schedule = ScheduleService::new(store_dyn.clone());
    let calendar = CalendarService::new(store_dyn, schedule.clone());
    let state = Arc::new(AppState {
        config,
        schedule,
        calendar,
    });
    (create_router(state), store)
}

/// Seed a three-day push/pull/legs catalog for `user`.
#[allow(dead_code)]
pub fn seed_ppl_definitions(store: &MemoryStore, user: &str) {
    store.seed_definitions(vec![
        definition("push", user, "Push", Some("ppl"), 0),
        definition("pull", user, "Pull", Some("ppl"), 1),
        definition("legs", user, "Legs", Some("ppl"), 2),
    ]);
}

#[allow(dead_code)]
pub fn definition(
    id: &str,
    user: &str,
    name: &str,
    plan_id: Option<&str>,
    position: u32,
) -> WorkoutDayDefinition {
    WorkoutDayDefinition {
        id: id.to_string(),
        user_id: user.to_string(),
        name: name.to_string(),
        plan_id: plan_id.map(str::to_string),
        position,
    }
}

#[allow(dead_code)]
pub fn cardio_template(id: &str, name: &str) -> WorkoutTemplate {
    WorkoutTemplate {
        id: id.to_string(),
        name: name.to_string(),
        kind: TemplateKind::Cardio,
        duration_minutes: 30,
    }
}

#[allow(dead_code)]
pub fn session(id: &str, user: &str, started_at: &str, completed: bool) -> UnifiedSession {
    let started_at = started_at
        .parse::<chrono::DateTime<chrono::Utc>>()
        .expect("valid RFC 3339 instant");
    UnifiedSession {
        id: id.to_string(),
        user_id: user.to_string(),
        kind: SessionKind::Weights,
        started_at,
        completed_at: completed.then(|| started_at + chrono::Duration::hours(1)),
    }
}
