// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cycleplan API Server
//!
//! Serves the workout cycle schedule and calendar projection API: cycle-day
//! arithmetic, default split seeding, per-day schedule edits, and the month
//! grid that merges the projected schedule with logged sessions.

use cycleplan::{
    config::Config,
    services::{CalendarService, ScheduleService},
    store::{FirestoreScheduleStore, MemoryStore, ScheduleStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, backend = %config.store_backend, "Starting Cycleplan API");

    let store: Arc<dyn ScheduleStore> = match config.store_backend.as_str() {
        "firestore" => {
            let store = FirestoreScheduleStore::new(&config.gcp_project_id)
                .await
                .expect("Failed to connect to Firestore");
            tracing::info!(project = %config.gcp_project_id, "Firestore store initialized");
            Arc::new(store)
        }
        _ => {
            tracing::info!("In-memory store initialized");
            Arc::new(MemoryStore::new())
        }
    };

    let schedule = ScheduleService::new(Arc::clone(&store));
    let calendar = CalendarService::new(Arc::clone(&store), schedule.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        schedule,
        calendar,
    });

    // Build router
    let app = cycleplan::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cycleplan=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
