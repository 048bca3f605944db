//! Typed client for the Bazaar REST backend.
//!
//! The backend owns every entity the panel shows. This module wraps its
//! REST API in a typed client: list/get/create/update/delete per
//! collection, plus the auth endpoints that issue and revoke the session
//! JWT. Responses are normalized on deserialization so views never see a
//! missing optional field.
//!
//! # Endpoints
//!
//! - Admin (JWT cookie required): `/api/admin/{collection}` and
//!   `/api/admin/{collection}/{id}`
//! - Public: `/api/v1/{collection}`
//! - Auth: `/auth/admin/login`, `/auth/admin/logout`, and
//!   `/api/admin/dashboard` as the session check

mod admins;
mod auth;
mod carousels;
mod client;
mod products;
pub mod types;

pub use auth::LoginSession;
pub use client::BackendClient;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the Bazaar backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend rejected the session (HTTP 401). Handlers translate
    /// this into a redirect to the login page; it is never rendered as an
    /// in-page error.
    #[error("backend rejected the session")]
    Unauthorized,

    /// The backend could not be reached at all (connection refused, DNS
    /// failure, timeout).
    #[error("could not connect to the backend - is it running?")]
    Unreachable(String),

    /// Any other non-success response. `detail` carries the JSON error
    /// message from the body when one was present, else the raw body.
    #[error("backend returned {status}: {detail}")]
    Api { status: StatusCode, detail: String },

    /// Transport-level failure that is not a connectivity problem.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("unexpected response from backend: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError {
    /// Whether this error must trigger a login redirect.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Message suitable for a view's error slot.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreachable(_) => {
                "Could not connect to the server. Please check if the backend is running."
                    .to_string()
            }
            Self::Api { detail, .. } if !detail.is_empty() => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Unreachable(e.to_string())
        } else {
            Self::Http(e)
        }
    }
}
