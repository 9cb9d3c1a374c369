//! Catalog integration tests
//!
//! Only paths that finish before touching the database: status, input
//! validation and the admin guard.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{get, get_with_bearer, json_request, parse_body, TestApp};

#[tokio::test]
async fn test_home_status() {
    let app = TestApp::new().unwrap();

    let response = app.send(get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["status"], "active");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().unwrap();
    let response = app.send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_numeric_movie_id_is_bad_request() {
    let app = TestApp::new().unwrap();

    let response = app.send(get("/movies/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        parse_body(response).await["error"]["code"],
        "VALIDATION_ERROR"
    );
}

#[tokio::test]
async fn test_display_movie_requires_positive_id() {
    let app = TestApp::new().unwrap();

    let response = app
        .send(json_request(Method::POST, "/movie", &json!({ "id": 0 })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send(json_request(Method::POST, "/movie", &json!({ "id": "one" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

mod test_admin_guard {
    use super::*;
    use crate::common::{TEST_EMAIL, TEST_PASSWORD};

    #[tokio::test]
    async fn test_missing_token() {
        let app = TestApp::new().unwrap();

        let response = app.send(get("/admin/movies")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            parse_body(response).await["error"]["code"],
            "MISSING_AUTHORIZATION"
        );
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let app = TestApp::new().unwrap();

        let response = app
            .send(get_with_bearer("/admin/movies/1", "invalid.jwt.token"))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(parse_body(response).await["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let app = TestApp::new().unwrap();
        let body = parse_body(app.login(TEST_EMAIL, TEST_PASSWORD).await).await;
        let refresh = body["refresh_token"].as_str().unwrap();

        let response = app.send(get_with_bearer("/admin/movies", refresh)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let app = TestApp::new().unwrap();
        let body = parse_body(app.login(TEST_EMAIL, TEST_PASSWORD).await).await;
        let access = body["access_token"].as_str().unwrap();

        // Past the guard, the path is parsed before any query runs
        let response = app
            .send(get_with_bearer("/admin/movies/abc", access))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
