// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tests for the replace-a-day write protocol.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
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

async fn get_schedule(app: &axum::Router, user: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!("/api/users/{}/schedule", user))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_save_day_preserves_submission_order() {
    let (app, store) = common::create_test_app();
    common::seed_ppl_definitions(&store, "u1");
    store.seed_template(common::cardio_template("run", "Easy Run"));

    let (status, body) = put_day(
        &app,
        "u1",
        2,
        json!({
            "items": [
                {"kind": "weights", "ref_id": "push"},
                {"kind": "cardio", "ref_id": "run"},
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0]["sort_order"], 0);
    assert_eq!(assignments[0]["workout_day_ref"], "push");
    assert_eq!(assignments[0]["workout_day"]["name"], "Push");
    assert_eq!(assignments[1]["sort_order"], 1);
    assert_eq!(assignments[1]["template_ref"], "run");
    assert_eq!(assignments[1]["template"]["name"], "Easy Run");
}

#[tokio::test]
async fn test_save_day_replaces_previous_contents() {
    let (app, store) = common::create_test_app();
    common::seed_ppl_definitions(&store, "u1");

    let (status, _) = put_day(
        &app,
        "u1",
        3,
        json!({"items": [{"kind": "weights", "ref_id": "push"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = put_day(
        &app,
        "u1",
        3,
        json!({"items": [{"kind": "weights", "ref_id": "legs"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["workout_day_ref"], "legs");
}

#[tokio::test]
async fn test_empty_items_and_rest_are_equivalent() {
    let (app, _) = common::create_test_app();

    let (status, body) = put_day(&app, "u1", 1, json!({"items": []})).await;
    assert_eq!(status, StatusCode::OK);
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["is_rest_day"], true);

    // Saving rest again keeps exactly one marker.
    let (status, body) = put_day(&app, "u1", 1, json!({"items": [{"kind": "rest"}]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assignments"].as_array().unwrap().len(), 1);

    let schedule = get_schedule(&app, "u1").await;
    assert_eq!(schedule["assignments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rest_replaces_workouts() {
    let (app, store) = common::create_test_app();
    common::seed_ppl_definitions(&store, "u1");

    put_day(
        &app,
        "u1",
        5,
        json!({"items": [
            {"kind": "weights", "ref_id": "push"},
            {"kind": "weights", "ref_id": "pull"},
        ]}),
    )
    .await;

    let (status, body) = put_day(&app, "u1", 5, json!({"items": [{"kind": "rest"}]})).await;
    assert_eq!(status, StatusCode::OK);
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["is_rest_day"], true);
}

#[tokio::test]
async fn test_day_number_outside_cycle_rejected() {
    let (app, _) = common::create_test_app();

    let (status, _) = put_day(&app, "u1", 0, json!({"items": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put_day(&app, "u1", 8, json!({"items": [], "cycle_length": 7})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Longer cycles admit higher day numbers.
    let (status, _) = put_day(&app, "u1", 8, json!({"items": [], "cycle_length": 10})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_rest_mixed_with_workouts_rejected() {
    let (app, store) = common::create_test_app();
    common::seed_ppl_definitions(&store, "u1");

    let (status, body) = put_day(
        &app,
        "u1",
        1,
        json!({"items": [
            {"kind": "weights", "ref_id": "push"},
            {"kind": "rest"},
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_workout_without_reference_rejected() {
    let (app, _) = common::create_test_app();

    let (status, _) = put_day(&app, "u1", 1, json!({"items": [{"kind": "weights"}]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_schedule_day_filter() {
    let (app, store) = common::create_test_app();
    common::seed_ppl_definitions(&store, "u1");

    put_day(&app, "u1", 1, json!({"items": [{"kind": "weights", "ref_id": "push"}]})).await;
    put_day(&app, "u1", 2, json!({"items": [{"kind": "weights", "ref_id": "pull"}]})).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users/u1/schedule?day=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["day_number"], 2);
}

#[tokio::test]
async fn test_delete_day_and_whole_schedule() {
    let (app, store) = common::create_test_app();
    common::seed_ppl_definitions(&store, "u1");

    put_day(&app, "u1", 1, json!({"items": [{"kind": "weights", "ref_id": "push"}]})).await;
    put_day(&app, "u1", 2, json!({"items": [{"kind": "weights", "ref_id": "pull"}]})).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/users/u1/schedule/days/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let schedule = get_schedule(&app, "u1").await;
    assert_eq!(schedule["assignments"].as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/users/u1/schedule")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let schedule = get_schedule(&app, "u1").await;
    assert!(schedule["assignments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_init_defaults_seeds_ppl_week() {
    let (app, store) = common::create_test_app();
    common::seed_ppl_definitions(&store, "u1");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users/u1/schedule/defaults")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"plan_id": "ppl"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 7);

    // Push/Pull/Legs, rest, then the three again.
    assert_eq!(assignments[0]["workout_day_ref"], "push");
    assert_eq!(assignments[1]["workout_day_ref"], "pull");
    assert_eq!(assignments[2]["workout_day_ref"], "legs");
    assert_eq!(assignments[3]["is_rest_day"], true);
    assert_eq!(assignments[4]["workout_day_ref"], "push");
    assert_eq!(assignments[6]["workout_day_ref"], "legs");
}
