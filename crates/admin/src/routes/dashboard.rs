//! Dashboard route handler.

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::{filters, middleware::RequireBackendSession, models::CurrentAdmin, state::AppState};

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
    pub is_superadmin: bool,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.to_string(),
            is_superadmin: admin.role.is_superadmin(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub product_count: String,
    pub carousel_count: String,
    pub active_banner_count: String,
    pub backend_error: Option<String>,
}

/// Dashboard page handler.
///
/// GET /
#[instrument(skip(auth, state))]
pub async fn index(auth: RequireBackendSession, State(state): State<AppState>) -> Response {
    let RequireBackendSession { admin, token } = auth;

    let (products_result, carousels_result) = tokio::join!(
        state.backend().list_products(&token),
        state.backend().list_carousels(&token),
    );

    let mut backend_error = None;

    let product_count = match products_result {
        Ok(products) => products.len().to_string(),
        Err(e) if e.is_unauthorized() => return Redirect::to("/auth/login").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            backend_error = Some(e.user_message());
            "-".to_string()
        }
    };

    let (carousel_count, active_banner_count) = match carousels_result {
        Ok(items) => {
            let active = items.iter().filter(|item| item.is_active).count();
            (items.len().to_string(), active.to_string())
        }
        Err(e) if e.is_unauthorized() => return Redirect::to("/auth/login").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch carousels: {e}");
            if backend_error.is_none() {
                backend_error = Some(e.user_message());
            }
            ("-".to_string(), "-".to_string())
        }
    };

    let template = DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/".to_string(),
        product_count,
        carousel_count,
        active_banner_count,
        backend_error,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
    .into_response()
}
