//! Exercise API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::fixtures;
use common::TestContext;
use exercise_backend::services::catalog::Catalog;
use exercise_core::{Exercise, ExerciseData, Lesson, Screen, Side};

/// Test health endpoint.
#[tokio::test]
async fn test_health() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

/// Test fetching the match-the-pairs exercise in its wire format.
#[tokio::test]
async fn test_get_match_the_pairs() {
    let server = TestContext::new().server();

    let response = server.get("/exercise/ex2").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(
        body,
        json!({
            "id": "ex2",
            "data": {
                "type": "matchThePairs",
                "matchThePairs": {
                    "prompt": "Match these Serbian words to their English translations:",
                    "pairs": { "mačka": "cat", "pas": "dog", "kuća": "house" }
                }
            }
        })
    );
}

/// Test fetching the multiple-choice exercise decodes into the shared type.
#[tokio::test]
async fn test_get_multiple_choice() {
    let server = TestContext::new().server();

    let response = server.get("/exercise/ex1").await;

    response.assert_status_ok();
    let exercise: Exercise = response.json();
    let ExerciseData::MultipleChoice(data) = exercise.data else {
        panic!("expected multiple choice, got {:?}", exercise.data);
    };
    assert_eq!(data.correct_answer, "dog");
    assert_eq!(data.options, vec!["dog", "cat", "bird"]);
}

/// Test unknown exercise returns 404 with an error body.
#[tokio::test]
async fn test_get_unknown_exercise() {
    let server = TestContext::new().server();

    let response = server.get("/exercise/ex404").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Not found: Exercise not found.");
}

/// Test listing keeps catalog order.
#[tokio::test]
async fn test_list_exercises() {
    let server = TestContext::new().server();

    let response = server.get("/exercises").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let ids: Vec<&str> = body["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ex1", "ex2"]);
}

/// Test listing filtered by kind.
#[tokio::test]
async fn test_list_exercises_by_kind() {
    let catalog = Catalog::from_exercises(vec![
        fixtures::pairs_exercise("m1", &[("sto", "table"), ("stolica", "chair")]),
        fixtures::pronunciation_exercise("p1", "pas"),
        fixtures::pairs_exercise("m2", &[("voda", "water")]),
    ])
    .unwrap();
    let server = TestContext::with_catalog(catalog).server();

    let response = server
        .get("/exercises")
        .add_query_param("kind", "matchThePairs")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let ids: Vec<&str> = body["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["m1", "m2"]);
}

/// Test unknown kind filter is a bad request.
#[tokio::test]
async fn test_list_exercises_unknown_kind() {
    let server = TestContext::new().server();

    let response = server
        .get("/exercises")
        .add_query_param("kind", "essay")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test a client can play a lesson built from served exercises.
#[tokio::test]
async fn test_served_exercises_drive_a_lesson() {
    let server = TestContext::new().server();

    let response = server.get("/exercises").await;
    let body: serde_json::Value = response.json();
    let exercises: Vec<Exercise> = serde_json::from_value(body["exercises"].clone()).unwrap();

    let mut lesson = Lesson::new(&exercises).unwrap();
    lesson.start();

    lesson.tap_option("dog");
    let _ = lesson.advance(exercise_core::TRANSITION_DURATION);

    for (left, right) in [("mačka", "cat"), ("pas", "dog"), ("kuća", "house")] {
        lesson.tap_pair(Side::Left, left);
        lesson.tap_pair(Side::Right, right);
        let _ = lesson.advance(exercise_core::TRANSITION_DURATION);
    }
    let _ = lesson.advance(exercise_core::TRANSITION_DURATION);

    assert_eq!(lesson.screen(), Screen::Completed);
}
