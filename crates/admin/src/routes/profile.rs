//! Profile route handler.
//!
//! Renders the logged-in admin's own identity from the session snapshot;
//! no backend call is involved.

use askama::Template;
use axum::response::Html;
use tracing::instrument;

use crate::{filters, middleware::RequireAdminAuth};

use super::dashboard::AdminUserView;

/// Profile page template.
#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub role: String,
}

/// Profile page handler.
///
/// GET /profile
#[instrument(skip(auth))]
pub async fn show(auth: RequireAdminAuth) -> Html<String> {
    let RequireAdminAuth(admin) = auth;
    let template = ProfileTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/profile".to_string(),
        role: admin.role.to_string(),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}
