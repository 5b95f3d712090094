//! HTTP-level tests: auth bootstrap, envelope shape and role gating.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use lodge_server::auth::{JwtConfig, JwtService};
use lodge_server::core::{Config, Server, ServerState};
use lodge_server::db::DbService;

async fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().unwrap()).await.expect("open db");

    let config = Config {
        database_path: path.to_str().unwrap().to_string(),
        ..Config::default()
    };
    let jwt_service = Arc::new(JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-0123456789abcdef".to_string(),
        expiration_minutes: 5,
        issuer: "lodge-server".to_string(),
        audience: "lodge-clients".to_string(),
    }));
    let state = ServerState {
        config,
        pool: db.pool,
        jwt_service,
    };
    (dir, Server::build_router(state))
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_and_login(app: &Router, name: &str, role: &str, admin_token: Option<&str>) -> String {
    let email = format!("{}@example.com", name.to_lowercase());
    let (status, _) = send(
        app,
        "POST",
        "/api/auth/register",
        admin_token,
        Some(json!({
            "name": name,
            "email": email,
            "password": "password123",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(&app, "GET", "/api/items", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn first_account_becomes_admin_then_registration_is_gated() {
    let (_dir, app) = test_app().await;

    // Bootstrap: requested role is ignored, first account is admin
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Root",
            "email": "root@example.com",
            "password": "password123",
            "role": "guest",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], json!("admin"));
    assert!(body["data"]["password_hash"].is_null());

    // Unauthenticated registration is now rejected
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Mallory",
            "email": "mallory@example.com",
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (_dir, app) = test_app().await;
    register_and_login(&app, "Root", "admin", None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "root@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn item_creation_is_admin_only() {
    let (_dir, app) = test_app().await;
    let admin = register_and_login(&app, "Root", "admin", None).await;
    let staff = register_and_login(&app, "Ana", "staff", Some(&admin)).await;

    let payload = json!({ "name": "Cola", "price": 50.0, "total_quantity": 10 });

    let (status, _) = send(&app, "POST", "/api/items", Some(&staff), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "POST", "/api/items", Some(&admin), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_quantity"], json!(10));

    // Duplicate name conflicts
    let (status, _) = send(&app, "POST", "/api/items", Some(&admin), Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn sell_flow_over_http_maps_rule_violations_to_400() {
    let (_dir, app) = test_app().await;
    let admin = register_and_login(&app, "Root", "admin", None).await;
    let staff_token = register_and_login(&app, "Ana", "staff", Some(&admin)).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/items",
        Some(&admin),
        Some(json!({ "name": "Cola", "price": 50.0, "total_quantity": 10 })),
    )
    .await;
    let item_id = body["data"]["id"].as_i64().unwrap();

    // Selling before starting a shift is a rule violation
    let (status, body) = send(
        &app,
        "POST",
        "/api/sales/sell",
        Some(&staff_token),
        Some(json!({ "item_id": item_id, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    // Need the staff id for the assignment; look it up via login data
    let (_, login) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ana@example.com", "password": "password123" })),
    )
    .await;
    let staff_id = login["data"]["staff"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/assignments/assign",
        Some(&admin),
        Some(json!({ "staff_id": staff_id, "item_id": item_id, "quantity": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/shifts/start-shift",
        Some(&staff_token),
        Some(json!({ "confirmed_stock": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/sales/sell",
        Some(&staff_token),
        Some(json!({ "item_id": item_id, "quantity": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_amount"], json!(200.0));

    // Admins have no assignments and may not sell
    let (status, _) = send(
        &app,
        "POST",
        "/api/sales/sell",
        Some(&admin),
        Some(json!({ "item_id": item_id, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
