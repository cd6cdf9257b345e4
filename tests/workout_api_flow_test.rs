// ABOUTME: End-to-end integration tests for the exercise and workout CRUD API
// ABOUTME: Covers owner scoping, filters, pagination, and dangling soft references
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::{register_and_login, send, test_app};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_full_workout_lifecycle_with_dangling_reference() {
    let app = test_app();
    let token = register_and_login(&app, "athlete@example.com").await;

    let (status, exercise) = send(
        &app,
        Method::POST,
        "/api/exercises",
        Some(&token),
        Some(json!({
            "name": "Bench Press",
            "category": "chest",
            "type": "strength",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let exercise_id = exercise["id"].as_str().unwrap().to_owned();

    let (status, workout) = send(
        &app,
        Method::POST,
        "/api/workouts",
        Some(&token),
        Some(json!({
            "name": "Push day",
            "exercises": [{
                "exercise_id": exercise_id,
                "sets": [{"reps": 10, "weight_kg": 80.0}],
                "notes": null,
            }],
            "duration_minutes": 60,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let workout_id = workout["id"].as_str().unwrap().to_owned();
    assert_eq!(workout["total_volume_kg"], 800.0);

    // duration_min=0 is a present bound and must not be dropped
    let (status, listing) = send(
        &app,
        Method::GET,
        "/api/workouts?duration_min=0",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["id"], workout_id.as_str());

    // Deleting the exercise leaves the workout's reference dangling
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/exercises/{exercise_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, fetched) = send(
        &app,
        Method::GET,
        &format!("/api/workouts/{workout_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched["exercises"][0]["exercise_id"],
        exercise_id.as_str()
    );
}

#[tokio::test]
async fn test_other_users_resources_look_absent() {
    let app = test_app();
    let owner_token = register_and_login(&app, "owner@example.com").await;
    let intruder_token = register_and_login(&app, "intruder@example.com").await;

    let (_, exercise) = send(
        &app,
        Method::POST,
        "/api/exercises",
        Some(&owner_token),
        Some(json!({"name": "Squat", "category": "legs", "type": "strength"})),
    )
    .await;
    let exercise_id = exercise["id"].as_str().unwrap();

    let uri = format!("/api/exercises/{exercise_id}");
    let (status, body) = send(&app, Method::GET, &uri, Some(&intruder_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Exercise not found");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&intruder_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, listing) = send(
        &app,
        Method::GET,
        "/api/exercises",
        Some(&intruder_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 0);
}

#[tokio::test]
async fn test_exercise_listing_filters_and_pagination() {
    let app = test_app();
    let token = register_and_login(&app, "athlete@example.com").await;

    for (name, category) in [
        ("Bench Press", "chest"),
        ("Incline Press", "chest"),
        ("Squat", "legs"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/exercises",
            Some(&token),
            Some(json!({"name": name, "category": category, "type": "strength"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(
        &app,
        Method::GET,
        "/api/exercises?search=press&page=1&size=1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_next"], true);
    assert_eq!(page["has_prev"], false);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);

    let (status, filtered) = send(
        &app,
        Method::GET,
        "/api/exercises?category=legs",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered["total"], 1);
    assert_eq!(filtered["items"][0]["name"], "Squat");
}

#[tokio::test]
async fn test_out_of_range_pagination_rejected() {
    let app = test_app();
    let token = register_and_login(&app, "athlete@example.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/exercises?size=0",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "size");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/exercises?size=101",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_partial_update_and_empty_update() {
    let app = test_app();
    let token = register_and_login(&app, "athlete@example.com").await;

    let (_, exercise) = send(
        &app,
        Method::POST,
        "/api/exercises",
        Some(&token),
        Some(json!({"name": "Deadlift", "category": "back", "type": "strength"})),
    )
    .await;
    let uri = format!("/api/exercises/{}", exercise["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({"description": "Conventional stance"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Deadlift");
    assert_eq!(updated["description"], "Conventional stance");

    // No recognized fields to apply reports not found
    let (status, _) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_workout_validation_rejects_bad_sets() {
    let app = test_app();
    let token = register_and_login(&app, "athlete@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/workouts",
        Some(&token),
        Some(json!({
            "name": "Bad session",
            "exercises": [{
                "exercise_id": "anything",
                "sets": [],
                "notes": null,
            }],
            "duration_minutes": 45,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "exercises[0].sets");
}

#[tokio::test]
async fn test_workout_listing_sorts_by_date_descending() {
    let app = test_app();
    let token = register_and_login(&app, "athlete@example.com").await;

    for (name, date) in [
        ("Oldest", "2026-08-01T10:00:00Z"),
        ("Newest", "2026-08-20T10:00:00Z"),
        ("Middle", "2026-08-10T10:00:00Z"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/workouts",
            Some(&token),
            Some(json!({
                "name": name,
                "date": date,
                "exercises": [{
                    "exercise_id": "ex",
                    "sets": [{"reps": 5, "weight_kg": 60.0}],
                }],
                "duration_minutes": 30,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(&app, Method::GET, "/api/workouts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Newest", "Middle", "Oldest"]);

    // Date range filter trims both ends
    let query = serde_urlencoded::to_string([
        ("date_from", "2026-08-05T00:00:00Z"),
        ("date_to", "2026-08-15T00:00:00Z"),
    ])
    .unwrap();
    let (status, filtered) = send(
        &app,
        Method::GET,
        &format!("/api/workouts?{query}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered["total"], 1);
    assert_eq!(filtered["items"][0]["name"], "Middle");
}
