#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the auth API surface that need no database:
//! input validation, method routing, and cookie handling.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

mod common;
use common::{body_json, get, get_with_token, post_json, send, set_cookie, test_app};

// =============================================================================
// Signup validation
// =============================================================================

#[tokio::test]
async fn signup_with_missing_fields_is_rejected() {
    let bodies = [
        json!({}),
        json!({ "name": "A", "email": "a@example.com" }),
        json!({ "email": "a@example.com", "password": "secret1" }),
        json!({ "name": "", "email": "a@example.com", "password": "secret1" }),
    ];

    for body in bodies {
        let response = send(test_app(), post_json("/api/auth/signup", &body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted {body}");
    }
}

#[tokio::test]
async fn signup_with_short_password_is_rejected() {
    let body = json!({ "name": "A", "email": "a@example.com", "password": "12345" });

    let response = send(test_app(), post_json("/api/auth/signup", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Password must be at least 6 characters long"
    );
}

#[tokio::test]
async fn signup_password_length_counts_characters_not_bytes() {
    // Three characters but six bytes of UTF-8: still too short.
    let body = json!({ "name": "A", "email": "a@example.com", "password": "ñññ" });

    let response = send(test_app(), post_json("/api/auth/signup", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Password must be at least 6 characters long"
    );
}

// =============================================================================
// Login validation
// =============================================================================

#[tokio::test]
async fn login_with_missing_fields_is_rejected() {
    let bodies = [
        json!({}),
        json!({ "email": "a@example.com" }),
        json!({ "password": "secret1" }),
        json!({ "email": "", "password": "secret1" }),
    ];

    for body in bodies {
        let response = send(test_app(), post_json("/api/auth/login", &body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted {body}");
    }
}

// =============================================================================
// Session check and logout
// =============================================================================

#[tokio::test]
async fn me_without_token_returns_401_and_clears_cookie() {
    let response = send(test_app(), get("/api/auth/me")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let cookie = set_cookie(&response).to_string();
    assert!(cookie.starts_with("authToken=;"), "cookie not cleared: {cookie}");
    assert!(cookie.contains("Max-Age=0"));

    let json = body_json(response).await;
    assert_eq!(json["message"], "Not authenticated: No token");
}

#[tokio::test]
async fn me_with_invalid_token_returns_401_and_clears_cookie() {
    let response = send(test_app(), get_with_token("/api/auth/me", "not.a.jwt")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).starts_with("authToken=;"));

    let json = body_json(response).await;
    assert_eq!(json["message"], "Not authenticated: Invalid or expired token");
}

#[tokio::test]
async fn logout_clears_cookie() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).to_string();
    assert!(cookie.starts_with("authToken=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert_eq!(json["message"], "Logout successful");
}

// =============================================================================
// Method routing
// =============================================================================

#[tokio::test]
async fn wrong_methods_are_rejected() {
    // GET on POST-only endpoints
    for uri in ["/api/auth/signup", "/api/auth/login", "/api/auth/logout"] {
        let response = send(test_app(), get(uri)).await;
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "unexpected status for GET {uri}"
        );
    }

    // POST on the GET-only session check
    let response = send(test_app(), post_json("/api/auth/me", &json!({}))).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Development seed endpoint
// =============================================================================

#[tokio::test]
async fn seed_endpoint_absent_outside_dev_mode() {
    let response = send(test_app(), post_json("/api/seed", &json!({}))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
