//! Admin role enum.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Admin role with different permission levels.
///
/// Serialized in the lowercase form the backend uses (`superadmin`,
/// `manager`, `admin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// Full access to all admin features including account management.
    Superadmin,
    /// Store management access (products, carousel) but no account management.
    Manager,
    /// Baseline admin access.
    #[default]
    Admin,
}

impl AdminRole {
    /// Whether this role may manage admin accounts.
    #[must_use]
    pub const fn is_superadmin(self) -> bool {
        matches!(self, Self::Superadmin)
    }

    /// Lowercase wire/display name for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&AdminRole::Superadmin).expect("serializable"),
            "\"superadmin\""
        );
        let role: AdminRole = serde_json::from_str("\"manager\"").expect("valid role");
        assert_eq!(role, AdminRole::Manager);
    }

    #[test]
    fn test_default_is_admin() {
        assert_eq!(AdminRole::default(), AdminRole::Admin);
        assert!(!AdminRole::default().is_superadmin());
    }

    #[test]
    fn test_superadmin_check() {
        assert!(AdminRole::Superadmin.is_superadmin());
        assert!(!AdminRole::Manager.is_superadmin());
    }
}
