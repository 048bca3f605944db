//! Admin account collection operations.

use reqwest::Method;
use tracing::instrument;

use bazaar_core::AdminUserId;

use super::types::{AdminAccount, NewAdminAccount};
use super::{BackendClient, BackendError};

impl BackendClient {
    /// List all admin accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, token))]
    pub async fn list_admins(&self, token: &str) -> Result<Vec<AdminAccount>, BackendError> {
        Self::send_list(self.authed(Method::GET, "/api/admin/admins", token)).await
    }

    /// Create an admin account. Returns the created account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the session is rejected, or
    /// the backend rejects the payload (e.g. duplicate email).
    #[instrument(skip(self, token, account), fields(email = %account.email))]
    pub async fn create_admin(
        &self,
        token: &str,
        account: &NewAdminAccount,
    ) -> Result<AdminAccount, BackendError> {
        let request = self
            .authed(Method::POST, "/api/admin/admins", token)
            .json(account);
        Self::send_json(request).await
    }

    /// Delete an admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, token), fields(admin_id = %id))]
    pub async fn delete_admin(&self, token: &str, id: AdminUserId) -> Result<(), BackendError> {
        Self::send_ok(self.authed(Method::DELETE, &format!("/api/admin/admins/{id}"), token)).await
    }
}
