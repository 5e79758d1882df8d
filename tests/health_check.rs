//! Integration tests for the chirpy server: liveness and admin reset

mod common;

use common::{spawn_app, spawn_app_on_platform};

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app();

    let response = app
        .client
        .get(app.url("/api/healthz"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn reset_clears_users_on_dev() {
    let app = spawn_app();
    assert_eq!(201, app.create_user("dup@example.com", "pw").await.status().as_u16());

    let response = app
        .client
        .post(app.url("/admin/reset"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(200, response.status().as_u16());

    // Same email can be registered again after a reset
    assert_eq!(201, app.create_user("dup@example.com", "pw").await.status().as_u16());
}

#[tokio::test]
async fn reset_is_forbidden_outside_dev() {
    let app = spawn_app_on_platform("prod");

    let response = app
        .client
        .post(app.url("/admin/reset"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(403, response.status().as_u16());
}
