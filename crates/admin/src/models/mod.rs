//! Domain types for the admin panel.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
