//! Integration tests for the auth and session surface.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use folio::config::Config;
use http_body_util::BodyExt;
use sea_orm::EntityTrait;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<folio::api::AppState>, Router) {
    let db_path = std::env::temp_dir().join(format!("folio-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    let state = folio::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let router = folio::api::router(state.clone())
        .await
        .expect("failed to build router");
    (state, router)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("expected a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            serde_json::json!({
                "username": username,
                "password": password,
                "email": format!("{username}@example.com"),
            }),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn register_establishes_session_and_logout_invalidates_it() {
    let (_state, app) = spawn_app().await;

    let response = register(&app, "alice", "secret123").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["is_admin"], true);
    assert!(
        body["data"].get("password").is_none() && body["data"].get("password_hash").is_none(),
        "user payload must not carry password material"
    );

    // The cookie resolves to the registered user.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/user")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "alice");

    // Logout destroys the server-side record.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The stale cookie no longer resolves.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/user")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registering_an_existing_username_fails_without_a_session() {
    let (state, app) = spawn_app().await;

    let response = register(&app, "alice", "secret123").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = register(&app, "alice", "different456").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        response.headers().get(header::SET_COOKIE).is_none(),
        "a failed registration must not establish a session"
    );
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    // Only one row exists and the original credentials still work.
    let user = state
        .store()
        .get_user_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "alice@example.com");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"username": "alice", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_failures_are_generic_401s() {
    let (_state, app) = spawn_app().await;

    register(&app, "alice", "secret123").await;

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"username": "alice", "password": "secret124"}),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = body_json(wrong_password).await;

    let unknown_user = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"username": "mallory", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body = body_json(unknown_user).await;

    // The error must not reveal which of the two fields was wrong.
    assert_eq!(wrong_password_body["error"], unknown_user_body["error"]);
}

#[tokio::test]
async fn admin_routes_require_an_admin_session() {
    let (state, app) = spawn_app().await;

    // Unauthenticated: 401.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/messages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Authenticated but not admin: 403.
    let security = state.config().read().await.security.clone();
    state
        .store()
        .create_user("viewer", "password123", "viewer@example.com", false, &security)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"username": "viewer", "password": "password123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let viewer_cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/messages")
                .header(header::COOKIE, &viewer_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin: 200.
    let response = register(&app, "alice", "secret123").await;
    let admin_cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/messages")
                .header(header::COOKIE, &admin_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Even unknown admin paths are gated: 401 without a session, 404 with.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/does-not-exist")
                .header(header::COOKIE, &admin_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_of_a_deleted_user_stops_resolving() {
    let (state, app) = spawn_app().await;

    let response = register(&app, "alice", "secret123").await;
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    let user_id = i32::try_from(body["data"]["id"].as_i64().unwrap()).unwrap();

    folio::entities::users::Entity::delete_by_id(user_id)
        .exec(&state.store().conn)
        .await
        .unwrap();

    // Unexpired session, but the backing user row is gone.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/user")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/case-studies")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_validation_reports_field_detail() {
    let (_state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            serde_json::json!({
                "username": "alice",
                "password": "short",
                "email": "not-an-email",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    let details = body["details"].as_array().unwrap();
    let fields: Vec<&str> = details
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"password"));
    assert!(fields.contains(&"email"));
}
