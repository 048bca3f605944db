//! Middleware for the admin panel.

pub mod auth;
pub mod session;

pub use auth::{
    AdminAuthRejection, RedirectIfAuthenticated, RequireAdminAuth, RequireBackendSession,
    RequireSuperAdmin,
    SuperAdminRejection, backend_token, clear_admin_session, store_admin_session,
};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
