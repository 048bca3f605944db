//! Integration tests for the error taxonomy and auth guard responses.
//!
//! A rejected backend session must always land on the login page, never
//! on an error page; other failures map to distinct, stable statuses.

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use bazaar_admin::backend::BackendError;
use bazaar_admin::error::AppError;
use bazaar_admin::middleware::{AdminAuthRejection, SuperAdminRejection};

fn location(response: &axum::response::Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

// =============================================================================
// Backend error taxonomy
// =============================================================================

#[test]
fn test_backend_unauthorized_becomes_login_redirect() {
    let response = AppError::Backend(BackendError::Unauthorized).into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
}

#[test]
fn test_backend_unreachable_is_bad_gateway_with_generic_body() {
    let err = BackendError::Unreachable("connection refused".to_string());
    assert!(err.user_message().contains("Could not connect"));

    let response = AppError::Backend(err).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn test_api_error_detail_preserved_for_views() {
    let err = BackendError::Api {
        status: StatusCode::CONFLICT,
        detail: "email already registered".to_string(),
    };
    // Views surface the backend's own message verbatim.
    assert_eq!(err.user_message(), "email already registered");
    assert!(!err.is_unauthorized());
}

#[test]
fn test_internal_errors_hide_detail() {
    let response = AppError::Internal("db pointer was null".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Auth guard rejections
// =============================================================================

#[test]
fn test_html_auth_rejection_redirects_to_login() {
    let response = AdminAuthRejection::RedirectToLogin.into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
}

#[test]
fn test_api_auth_rejection_is_401() {
    let response = AdminAuthRejection::Unauthorized.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_non_superadmin_gets_403() {
    let response = SuperAdminRejection::Forbidden.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[test]
fn test_superadmin_rejection_redirects_when_logged_out() {
    let response = SuperAdminRejection::RedirectToLogin.into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
}
