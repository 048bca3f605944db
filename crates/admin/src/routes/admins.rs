//! Admin account management route handlers. Superadmin only.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::{AdminRole, AdminUserId, Email};

use crate::{
    backend::types::{AdminAccount, NewAdminAccount},
    error::AppError,
    filters,
    middleware::{AdminAuthRejection, RequireSuperAdmin, backend_token},
    state::AppState,
};

use super::ConfirmDeleteTemplate;
use super::dashboard::AdminUserView;

/// Account row for the list view.
#[derive(Debug, Clone)]
pub struct AdminRowView {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&AdminAccount> for AdminRowView {
    fn from(account: &AdminAccount) -> Self {
        Self {
            id: account.id.as_i32(),
            email: account.email.to_string(),
            name: account.display_name(),
            role: account.role.to_string(),
            is_active: account.is_active,
            last_login: account.last_login,
        }
    }
}

/// Create-form values, re-rendered verbatim on failure. The password is
/// never echoed back.
#[derive(Debug, Clone, Default)]
pub struct AdminFormView {
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Account list page with the inline create form.
#[derive(Template)]
#[template(path = "admins/index.html")]
pub struct AdminsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub admins: Vec<AdminRowView>,
    pub error: Option<String>,
    pub form: AdminFormView,
    pub form_error: Option<String>,
}

/// Create form fields.
#[derive(Debug, Deserialize)]
pub struct CreateAdminForm {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub password: String,
}

/// Build the admin accounts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admins", get(index).post(create))
        .route("/admins/{id}/delete", get(confirm_delete).post(delete))
}

fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

async fn session_token(session: &Session) -> Result<String, AdminAuthRejection> {
    backend_token(session)
        .await
        .ok()
        .flatten()
        .ok_or(AdminAuthRejection::RedirectToLogin)
}

async fn render_index(
    state: &AppState,
    admin: AdminUserView,
    token: &str,
    form: AdminFormView,
    form_error: Option<String>,
) -> Response {
    let (admins, error) = match state.backend().list_admins(token).await {
        Ok(accounts) => (accounts.iter().map(AdminRowView::from).collect(), None),
        Err(e) if e.is_unauthorized() => return Redirect::to("/auth/login").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch admin accounts: {e}");
            (vec![], Some(e.user_message()))
        }
    };

    let template = AdminsIndexTemplate {
        admin_user: admin,
        current_path: "/admins".to_string(),
        admins,
        error,
        form,
        form_error,
    };
    render(&template).into_response()
}

/// Account list page.
///
/// GET /admins
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AdminAuthRejection> {
    let token = session_token(&session).await?;
    Ok(render_index(
        &state,
        AdminUserView::from(&admin),
        &token,
        AdminFormView::default(),
        None,
    )
    .await)
}

/// Create an account from the inline form.
///
/// POST /admins
#[instrument(skip(admin, state, session, form))]
pub async fn create(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CreateAdminForm>,
) -> Result<Response, AdminAuthRejection> {
    let token = session_token(&session).await?;
    let admin_view = AdminUserView::from(&admin);
    let form_view = AdminFormView {
        email: form.email.trim().to_string(),
        name: form.name.trim().to_string(),
        role: form.role.trim().to_string(),
    };

    let email = match Email::parse(&form_view.email) {
        Ok(email) => email,
        Err(e) => {
            return Ok(render_index(
                &state,
                admin_view,
                &token,
                form_view,
                Some(e.to_string()),
            )
            .await);
        }
    };

    if form.password.len() < 8 {
        return Ok(render_index(
            &state,
            admin_view,
            &token,
            form_view,
            Some("Password must be at least 8 characters".to_string()),
        )
        .await);
    }

    let role = match parse_role(&form_view.role) {
        Some(role) => role,
        None => {
            let message = format!("Unknown role: {}", form_view.role);
            return Ok(render_index(&state, admin_view, &token, form_view, Some(message)).await);
        }
    };

    let account = NewAdminAccount {
        email,
        name: form_view.name.clone(),
        role,
        password: form.password,
    };

    match state.backend().create_admin(&token, &account).await {
        Ok(created) => {
            tracing::info!(admin_id = %created.id, "Admin account created");
            Ok(Redirect::to("/admins").into_response())
        }
        Err(e) if e.is_unauthorized() => Ok(Redirect::to("/auth/login").into_response()),
        Err(e) => Ok(render_index(
            &state,
            admin_view,
            &token,
            form_view,
            Some(e.user_message()),
        )
        .await),
    }
}

/// Delete confirmation page.
///
/// GET /admins/{id}/delete
#[instrument(skip(admin, state, session))]
pub async fn confirm_delete(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    if AdminUserId::new(id) == admin.id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    let token = session_token(&session)
        .await
        .map_err(|_| AppError::Unauthorized("session expired".to_string()))?;

    let subject = state
        .backend()
        .list_admins(&token)
        .await?
        .into_iter()
        .find(|account| account.id.as_i32() == id)
        .map_or_else(
            || format!("admin account {id}"),
            |account| format!("admin account \"{}\"", account.email),
        );

    let template = ConfirmDeleteTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admins".to_string(),
        subject,
        action: format!("/admins/{id}/delete"),
        cancel: "/admins".to_string(),
    };
    Ok(render(&template).into_response())
}

/// Perform the deletion.
///
/// POST /admins/{id}/delete
#[instrument(skip(admin, state, session))]
pub async fn delete(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    if AdminUserId::new(id) == admin.id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    let token = session_token(&session)
        .await
        .map_err(|_| AppError::Unauthorized("session expired".to_string()))?;

    state
        .backend()
        .delete_admin(&token, AdminUserId::new(id))
        .await?;
    Ok(Redirect::to("/admins").into_response())
}

fn parse_role(value: &str) -> Option<AdminRole> {
    match value.to_ascii_lowercase().as_str() {
        "superadmin" => Some(AdminRole::Superadmin),
        "manager" => Some(AdminRole::Manager),
        "admin" | "" => Some(AdminRole::Admin),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("superadmin"), Some(AdminRole::Superadmin));
        assert_eq!(parse_role("Manager"), Some(AdminRole::Manager));
        assert_eq!(parse_role(""), Some(AdminRole::Admin));
        assert_eq!(parse_role("root"), None);
    }

    #[test]
    fn test_row_view_uses_display_name() {
        let account: AdminAccount = serde_json::from_str(
            r#"{"id": 2, "email": "ops@bazaar.dev"}"#,
        )
        .expect("valid account");
        let row = AdminRowView::from(&account);
        assert_eq!(row.name, "ops");
        assert_eq!(row.role, "admin");
        assert!(row.is_active);
    }
}
