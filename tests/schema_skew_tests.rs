// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tests for saving against a store still on the pre-migration schema.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use cycleplan::store::ScheduleStore;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn put_day(app: &axum::Router, user: &str, day: u32, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(&format!("/api/users/{}/schedule/days/{}", user, day))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_multi_item_save_reports_migration_required() {
    let (app, store) = common::create_test_app_unmigrated();
    common::seed_ppl_definitions(&store, "u1");

    let (status, body) = put_day(
        &app,
        "u1",
        1,
        json!({"items": [
            {"kind": "weights", "ref_id": "push"},
            {"kind": "weights", "ref_id": "pull"},
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "migration_required");

    // The failed bulk insert must not leave partial rows behind.
    let rows = store.assignments_for_day("u1", 1).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_single_item_save_falls_back_to_legacy_shape() {
    let (app, store) = common::create_test_app_unmigrated();
    common::seed_ppl_definitions(&store, "u1");

    let (status, body) = put_day(
        &app,
        "u1",
        2,
        json!({"items": [{"kind": "weights", "ref_id": "push"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    // sort_order is absent in storage but normalized for display.
    assert_eq!(assignments[0]["sort_order"], 0);

    let rows = store.assignments_for_day("u1", 2).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].sort_order, None);
}

#[tokio::test]
async fn test_rest_day_saves_without_fallback() {
    let (app, store) = common::create_test_app_unmigrated();

    let (status, body) = put_day(&app, "u1", 3, json!({"items": [{"kind": "rest"}]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assignments"].as_array().unwrap().len(), 1);
    assert_eq!(body["assignments"][0]["is_rest_day"], true);

    let rows = store.assignments_for_day("u1", 3).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_fallback_save_still_replaces_previous_entry() {
    let (app, store) = common::create_test_app_unmigrated();
    common::seed_ppl_definitions(&store, "u1");

    let (status, _) = put_day(
        &app,
        "u1",
        4,
        json!({"items": [{"kind": "weights", "ref_id": "push"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The delete step clears the unique (user, day) slot, so the retry does
    // not trip the constraint.
    let (status, body) = put_day(
        &app,
        "u1",
        4,
        json!({"items": [{"kind": "weights", "ref_id": "legs"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assignments"][0]["workout_day_ref"], "legs");

    let rows = store.assignments_for_day("u1", 4).await.unwrap();
    assert_eq!(rows.len(), 1);
}
