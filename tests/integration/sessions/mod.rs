//! Session endpoint integration tests: login, refresh, logout

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use crate::common::{
    cookie_pair, get, get_with_cookie, json_request, parse_body, refresh_set_cookie, TestApp,
    TEST_EMAIL, TEST_PASSWORD,
};

mod test_login {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_login_then_refresh_keeps_subject() {
        let app = TestApp::new().unwrap();

        let response = app.login(TEST_EMAIL, TEST_PASSWORD).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let set_cookie = refresh_set_cookie(&response).expect("login sets the refresh cookie");
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Secure"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Domain=localhost"));
        assert!(set_cookie.contains("SameSite=Strict"));
        assert!(set_cookie.contains("Max-Age=86400"));

        let body = parse_body(response).await;
        let access = body["access_token"].as_str().unwrap();
        let refresh = body["refresh_token"].as_str().unwrap();
        assert_eq!(app.decode(access).sub, "7");
        assert_eq!(app.decode(access).name, "A B");
        assert_eq!(cookie_pair(&set_cookie), format!("cinedex_refresh_token={refresh}"));

        let response = app
            .send(get_with_cookie("/refresh", &cookie_pair(&set_cookie)))
            .await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let rotated = refresh_set_cookie(&response).expect("refresh sets a new cookie");

        let body = parse_body(response).await;
        let new_access = body["access_token"].as_str().unwrap();
        let new_refresh = body["refresh_token"].as_str().unwrap();
        assert_eq!(app.decode(new_access).sub, "7");
        assert_ne!(new_refresh, refresh);
        assert_eq!(
            cookie_pair(&rotated),
            format!("cinedex_refresh_token={new_refresh}")
        );
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let app = TestApp::new().unwrap();
        let response = app.login("A@X.COM", TEST_PASSWORD).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::new().unwrap();

        let wrong_password = app.login(TEST_EMAIL, "not-the-password").await;
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert!(refresh_set_cookie(&wrong_password).is_none());
        let wrong_password = parse_body(wrong_password).await;

        let unknown_email = app.login("nobody@x.com", TEST_PASSWORD).await;
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        let unknown_email = parse_body(unknown_email).await;

        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password["error"]["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = TestApp::new().unwrap();

        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/authenticate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_body(response).await["error"]["code"], "BAD_REQUEST");

        let response = app
            .send(json_request(
                Method::POST,
                "/authenticate",
                &json!({ "email": TEST_EMAIL }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_password_is_bad_request() {
        let app = TestApp::new().unwrap();
        let response = app.login(TEST_EMAIL, "").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod test_refresh {
    use super::*;

    #[tokio::test]
    async fn test_refresh_without_cookie() {
        let app = TestApp::new().unwrap();

        let response = app.send(get("/refresh")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(refresh_set_cookie(&response).is_none());
        assert_eq!(
            parse_body(response).await["error"]["code"],
            "MISSING_REFRESH_COOKIE"
        );
    }

    #[tokio::test]
    async fn test_refresh_with_invalid_cookie_sets_nothing() {
        let app = TestApp::new().unwrap();

        let response = app
            .send(get_with_cookie("/refresh", "cinedex_refresh_token=not.a.token"))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(refresh_set_cookie(&response).is_none());
        assert_eq!(parse_body(response).await["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_refresh_with_access_token_in_cookie() {
        let app = TestApp::new().unwrap();
        let body = parse_body(app.login(TEST_EMAIL, TEST_PASSWORD).await).await;
        let access = body["access_token"].as_str().unwrap();

        let response = app
            .send(get_with_cookie(
                "/refresh",
                &format!("cinedex_refresh_token={access}"),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_after_user_deleted() {
        let app = TestApp::new().unwrap();
        let login = app.login(TEST_EMAIL, TEST_PASSWORD).await;
        let cookie = cookie_pair(&refresh_set_cookie(&login).unwrap());

        app.store.remove(7);

        let response = app.send(get_with_cookie("/refresh", &cookie)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            parse_body(response).await["error"]["code"],
            "IDENTITY_NOT_FOUND"
        );
    }
}

mod test_store_failure {
    use super::*;
    use crate::common::{router_with_store, test_config, FailingIdentityStore, STORE_FAILURE};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn assert_generic_server_error(response: axum::http::Response<axum::body::Body>) {
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(refresh_set_cookie(&response).is_none());

        let body = parse_body(response).await;
        assert_eq!(body["error"]["code"], "IDENTITY_STORE_ERROR");
        assert_eq!(body["error"]["message"], "Authentication failed");
        assert!(!body.to_string().contains(STORE_FAILURE));
    }

    #[test_log::test(tokio::test)]
    async fn test_login_store_failure_is_generic_500() {
        let router = router_with_store(&test_config(), Arc::new(FailingIdentityStore)).unwrap();
        let body = json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD });

        let response = router
            .oneshot(json_request(Method::POST, "/authenticate", &body))
            .await
            .unwrap();
        assert_generic_server_error(response).await;
    }

    #[tokio::test]
    async fn test_refresh_store_failure_is_generic_500() {
        let app = TestApp::new().unwrap();
        let refresh = app.issue_tokens().refresh_token;
        let router = router_with_store(&app.config, Arc::new(FailingIdentityStore)).unwrap();

        let response = router
            .oneshot(get_with_cookie(
                "/refresh",
                &format!("cinedex_refresh_token={refresh}"),
            ))
            .await
            .unwrap();
        assert_generic_server_error(response).await;
    }
}

mod test_logout {
    use super::*;

    #[tokio::test]
    async fn test_logout_expires_cookie_without_session() {
        let app = TestApp::new().unwrap();

        let response = app.send(get("/logout")).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let set_cookie = refresh_set_cookie(&response).expect("logout expires the cookie");
        assert!(set_cookie.starts_with("cinedex_refresh_token=;"));
        assert!(set_cookie.contains("Max-Age=0"));
        assert!(set_cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[tokio::test]
    async fn test_access_token_outlives_logout() {
        let app = TestApp::new().unwrap();
        let body = parse_body(app.login(TEST_EMAIL, TEST_PASSWORD).await).await;
        let access = body["access_token"].as_str().unwrap().to_string();

        let response = app.send(get("/logout")).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        // No revocation: the access token still verifies until it expires
        assert_eq!(app.decode(&access).sub, "7");
    }
}

mod test_cors {
    use super::*;

    #[tokio::test]
    async fn test_preflight_allows_frontend_origin_with_credentials() {
        let app = TestApp::new().unwrap();

        let request = axum::http::Request::builder()
            .method(Method::OPTIONS)
            .uri("/authenticate")
            .header(header::ORIGIN, crate::common::ALLOWED_ORIGIN)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.send(request).await;

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            crate::common::ALLOWED_ORIGIN
        );
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }
}
