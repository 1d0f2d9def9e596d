mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;

use common::factory::TEST_PASSWORD;
use common::{Factory, TestApp};

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let app = TestApp::new(pool);
    let factory = Factory::new(&app.state);
    let auth = factory.create_staff().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": auth.email,
            "password": TEST_PASSWORD
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"].as_str().unwrap(), auth.email);
    assert_eq!(body["user"]["is_staff"], json!(true));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = TestApp::new(pool);
    let factory = Factory::new(&app.state);
    let auth = factory.create_staff().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": auth.email,
            "password": "not-the-password"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": TEST_PASSWORD
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me(pool: PgPool) {
    let app = TestApp::new(pool);
    let factory = Factory::new(&app.state);
    let auth = factory.create_customer().await;

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["id"].as_str().unwrap(), auth.user_id.to_string());
    assert_eq!(body["is_staff"], json!(false));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_invalid_token(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", "Bearer not-a-jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
