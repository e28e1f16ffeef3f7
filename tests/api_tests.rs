// tests/api_tests.rs

mod common;

use common::{create_assessment, register_and_login, spawn_app, two_multiple_questions};

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let unique_name = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    let response = client
        .post(format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({
            "username": unique_name,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn register_fails_validation() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: Send a username that is too short
    let response = client
        .post(format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({
            "username": "yo",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn assessment_routes_require_auth() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/assessments", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn create_rejects_empty_assessment() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _) = register_and_login(&client, &app.address).await;

    let response = client
        .post(format!("{}/api/assessments", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "title": "Empty",
            "questions": []
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "empty_assessment");
}

#[tokio::test]
async fn create_rejects_past_close_at() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _) = register_and_login(&client, &app.address).await;

    let response = client
        .post(format!("{}/api/assessments", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "title": "Already over",
            "close_at": "2020-01-01T00:00:00Z",
            "questions": two_multiple_questions()
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn create_rejects_inconsistent_answer_key() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _) = register_and_login(&client, &app.address).await;

    // Single-choice key referencing an option that does not exist.
    let response = client
        .post(format!("{}/api/assessments", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "title": "Broken key",
            "questions": [{
                "prompt": "Pick one",
                "kind": "single",
                "options": [{"id": "a", "text": "A"}],
                "answer_key": ["z"],
                "points": 10
            }]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn students_never_see_answer_keys() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let (author_token, _) = register_and_login(&client, &app.address).await;
    let (student_token, _) = register_and_login(&client, &app.address).await;

    let id = create_assessment(
        &client,
        &app.address,
        &author_token,
        serde_json::json!({
            "title": "Midterm",
            "description": "Chapters 1-3",
            "questions": two_multiple_questions()
        }),
    )
    .await;

    // The author sees the full definition, keys included.
    let author_view: serde_json::Value = client
        .get(format!("{}/api/assessments/{}", app.address, id))
        .header("Authorization", format!("Bearer {}", author_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(author_view["questions"][0]["answer_key"], serde_json::json!(["a", "b"]));

    // The student view strips every answer key.
    let student_view: serde_json::Value = client
        .get(format!("{}/api/assessments/{}", app.address, id))
        .header("Authorization", format!("Bearer {}", student_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(student_view["gate"], "open");
    let questions = student_view["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    for q in questions {
        assert!(
            q.get("answer_key").is_none() || q["answer_key"].is_null(),
            "answer key leaked to a student: {}",
            q
        );
    }
}

#[tokio::test]
async fn only_the_author_can_reschedule() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let (author_token, _) = register_and_login(&client, &app.address).await;
    let (other_token, _) = register_and_login(&client, &app.address).await;

    let id = create_assessment(
        &client,
        &app.address,
        &author_token,
        serde_json::json!({
            "title": "Quiz",
            "questions": two_multiple_questions()
        }),
    )
    .await;

    let response = client
        .patch(format!("{}/api/assessments/{}/close-at", app.address, id))
        .header("Authorization", format!("Bearer {}", other_token))
        .json(&serde_json::json!({ "close_at": "2099-01-01T00:00:00Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    // The author must still provide a future close time.
    let response = client
        .patch(format!("{}/api/assessments/{}/close-at", app.address, id))
        .header("Authorization", format!("Bearer {}", author_token))
        .json(&serde_json::json!({ "close_at": "2020-01-01T00:00:00Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .patch(format!("{}/api/assessments/{}/close-at", app.address, id))
        .header("Authorization", format!("Bearer {}", author_token))
        .json(&serde_json::json!({ "close_at": "2099-01-01T00:00:00Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}
