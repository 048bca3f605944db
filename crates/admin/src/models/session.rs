//! Session-related types for admin authentication.
//!
//! Types stored in the cookie session for authentication state.

use serde::{Deserialize, Serialize};

use bazaar_core::{AdminRole, AdminUserId, Email};

use crate::backend::types::AdminAccount;

/// Session-stored admin identity.
///
/// Minimal snapshot stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's backend ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
    /// Admin's role/permission level.
    pub role: AdminRole,
}

impl From<&AdminAccount> for CurrentAdmin {
    fn from(account: &AdminAccount) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            name: account.display_name(),
            role: account.role,
        }
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin snapshot.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the backend-issued JWT replayed on admin API calls.
    pub const BACKEND_TOKEN: &str = "backend_token";
}
