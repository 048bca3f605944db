//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Dashboard
//! GET  /                        - Overview: entity counts, backend status
//! GET  /profile                 - Logged-in admin's own identity
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Verify credentials against the backend
//! POST /auth/logout             - Logout
//!
//! # Products
//! GET  /products                - Product listing
//! GET  /products/new            - Create form
//! POST /products                - Create (multipart)
//! GET  /products/{id}/edit      - Edit form
//! POST /products/{id}           - Update (multipart)
//! GET  /products/{id}/delete    - Delete confirmation
//! POST /products/{id}/delete    - Delete
//!
//! # Carousel
//! GET  /carousel                - Banner listing (sorted by order key)
//! GET  /carousel/new            - Create form
//! POST /carousel                - Create (multipart)
//! GET  /carousel/{id}/edit      - Edit form
//! POST /carousel/{id}           - Update (multipart)
//! GET  /carousel/{id}/delete    - Delete confirmation
//! POST /carousel/{id}/delete    - Delete
//!
//! # Admin accounts (superadmin only)
//! GET  /admins                  - Account listing with inline create form
//! POST /admins                  - Create account
//! GET  /admins/{id}/delete      - Delete confirmation
//! POST /admins/{id}/delete      - Delete account
//! ```

use askama::Template;
use axum::{Router, routing::get};

use crate::filters;
use crate::state::AppState;

pub mod admins;
pub mod auth;
pub mod carousel;
pub mod dashboard;
pub mod products;
pub mod profile;

/// Shared delete-confirmation page.
#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub admin_user: dashboard::AdminUserView,
    pub current_path: String,
    /// What is about to be deleted, e.g. `product "Mug"`.
    pub subject: String,
    /// POST target that performs the deletion.
    pub action: String,
    /// Where "Cancel" navigates back to.
    pub cancel: String,
}

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", get(dashboard::index))
        .route("/profile", get(profile::show))
        .merge(auth::router())
        .merge(products::router())
        .merge(carousel::router())
        .merge(admins::router())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}
