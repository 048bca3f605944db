//! Backend auth endpoints: login, logout, session check.
//!
//! The backend issues its JWT as a `token` cookie on login. The panel
//! never hands that token to the browser; it lives inside the server-side
//! session and is replayed on every admin call.

use reqwest::Method;
use reqwest::header::SET_COOKIE;
use serde::Deserialize;
use tracing::instrument;

use bazaar_core::{AdminRole, AdminUserId, Email};

use super::client::TOKEN_COOKIE;
use super::types::AdminAccount;
use super::{BackendClient, BackendError};

/// Result of a successful login: the account plus the backend JWT.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub account: AdminAccount,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    user: Option<AdminAccount>,
}

/// The session-check endpoint has returned several shapes over time;
/// every field is optional and resolved with fallbacks.
#[derive(Debug, Deserialize)]
struct SessionCheckBody {
    #[serde(default)]
    id: Option<i32>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<AdminRole>,
    /// Legacy shape: `{"message": "...", "admin": "email@host"}`.
    #[serde(default)]
    admin: Option<String>,
}

impl SessionCheckBody {
    fn into_account(self) -> Option<AdminAccount> {
        let email_raw = self.email.or(self.admin)?;
        let email = Email::parse(&email_raw).ok()?;
        let name = self
            .name
            .unwrap_or_else(|| email.local_part().to_string());

        Some(AdminAccount {
            id: AdminUserId::new(self.id.unwrap_or(0)),
            email,
            name,
            role: self.role.unwrap_or_default(),
            is_active: true,
            last_login: None,
            created_at: None,
        })
    }
}

impl BackendClient {
    /// Verify credentials against the backend and capture the issued JWT.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unauthorized`] for bad credentials,
    /// [`BackendError::Unreachable`] when the backend is down, and
    /// [`BackendError::Api`] for validation failures. A success response
    /// without a `token` cookie is treated as an API error.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, BackendError> {
        let response = self
            .http()
            .post(self.url("/auth/admin/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let response = Self::check(response).await?;

        let token = extract_token(&response).ok_or_else(|| BackendError::Api {
            status: axum::http::StatusCode::BAD_GATEWAY,
            detail: "login succeeded but no session token was issued".to_string(),
        })?;

        let body: LoginBody = serde_json::from_str(&response.text().await?)?;

        // Older backend versions omit the user from the login response;
        // fall back to the session-check endpoint.
        let account = match body.user {
            Some(account) => account,
            None => self
                .check_session(&token)
                .await?
                .ok_or(BackendError::Unauthorized)?,
        };

        Ok(LoginSession { account, token })
    }

    /// Ask the backend whether a stored JWT is still valid.
    ///
    /// Returns `Ok(None)` when the token is expired or revoked.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or parse failures; a rejected
    /// token is not an error.
    #[instrument(skip(self, token))]
    pub async fn check_session(&self, token: &str) -> Result<Option<AdminAccount>, BackendError> {
        let request = self.authed(Method::GET, "/api/admin/dashboard", token);
        match Self::send_json::<SessionCheckBody>(request).await {
            Ok(body) => Ok(body.into_account()),
            Err(BackendError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Revoke the backend session. Best-effort: callers proceed with local
    /// cleanup regardless of the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; callers log and ignore it.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> Result<(), BackendError> {
        Self::send_ok(self.authed(Method::POST, "/auth/admin/logout", token)).await
    }
}

/// Pull the JWT out of the login response's Set-Cookie headers.
fn extract_token(response: &reqwest::Response) -> Option<String> {
    let prefix = format!("{TOKEN_COOKIE}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let rest = cookie.strip_prefix(&prefix)?;
            let token = rest.split(';').next().unwrap_or(rest);
            (!token.is_empty()).then(|| token.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_check_legacy_shape() {
        let body: SessionCheckBody =
            serde_json::from_str(r#"{"message": "Welcome", "admin": "root@bazaar.dev"}"#)
                .expect("valid body");
        let account = body.into_account().expect("account resolved");
        assert_eq!(account.email.as_str(), "root@bazaar.dev");
        assert_eq!(account.name, "root");
        assert_eq!(account.role, AdminRole::Admin);
        assert_eq!(account.id, AdminUserId::new(0));
    }

    #[test]
    fn test_session_check_full_shape() {
        let body: SessionCheckBody = serde_json::from_str(
            r#"{"id": 4, "email": "ops@bazaar.dev", "name": "Ops", "role": "superadmin"}"#,
        )
        .expect("valid body");
        let account = body.into_account().expect("account resolved");
        assert_eq!(account.id, AdminUserId::new(4));
        assert_eq!(account.name, "Ops");
        assert!(account.role.is_superadmin());
    }

    #[test]
    fn test_session_check_without_identity() {
        let body: SessionCheckBody =
            serde_json::from_str(r#"{"message": "ok"}"#).expect("valid body");
        assert!(body.into_account().is_none());
    }
}
