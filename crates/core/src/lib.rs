//! Bazaar Core - Shared types library.
//!
//! This crate provides the common types used across the Bazaar admin panel:
//! type-safe entity IDs, validated email addresses, admin roles, and the
//! canonical image-reference resolution rules.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and emails, the admin role enum,
//!   and image reference helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
