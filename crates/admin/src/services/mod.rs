//! Business logic services for the admin panel.
//!
//! # Services
//!
//! - `images` - Upload preprocessing: AVIF re-encoding before backend submit

pub mod images;

pub use images::{ImageError, prepare_upload};
