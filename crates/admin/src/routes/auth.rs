//! Authentication route handlers.
//!
//! Login verifies credentials against the backend and stores the issued
//! JWT in the server-side session; the browser only ever sees the session
//! cookie.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    RedirectIfAuthenticated, backend_token, clear_admin_session, store_admin_session,
};
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    error: Option<String>,
    email: String,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

fn render_login(error: Option<String>, email: String) -> Html<String> {
    let template = LoginPageTemplate { error, email };
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(_guard: RedirectIfAuthenticated) -> impl IntoResponse {
    render_login(None, String::new())
}

/// Verify credentials and establish the session.
///
/// POST /auth/login
#[instrument(skip(state, session, form))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.trim().to_string();
    if email.is_empty() || form.password.is_empty() {
        return render_login(
            Some("Email and password are required".to_string()),
            email,
        )
        .into_response();
    }

    match state.backend().login(&email, &form.password).await {
        Ok(login) => {
            if let Err(e) = store_admin_session(&session, &login).await {
                tracing::error!("Failed to persist login session: {e}");
                return render_login(
                    Some("Could not establish a session, please try again".to_string()),
                    email,
                )
                .into_response();
            }
            set_sentry_user(login.account.id.as_i32(), Some(login.account.email.as_str()));
            tracing::info!(admin_id = %login.account.id, "Admin logged in");
            Redirect::to("/").into_response()
        }
        Err(e) if e.is_unauthorized() => {
            render_login(Some("Invalid email or password".to_string()), email).into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            render_login(Some(e.user_message()), email).into_response()
        }
    }
}

/// Revoke the backend session (best-effort) and clear the local one.
///
/// POST /auth/logout
#[instrument(skip(state, session))]
async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    if let Ok(Some(token)) = backend_token(&session).await {
        if let Err(e) = state.backend().logout(&token).await {
            tracing::warn!("Backend logout failed: {e}");
        }
    }

    if let Err(e) = clear_admin_session(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    clear_sentry_user();

    Redirect::to("/auth/login")
}
