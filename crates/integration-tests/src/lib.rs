//! Integration tests for Bazaar Admin.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `image_resolution` - Image reference canonicalization rules
//! - `normalization` - Backend response normalization defaults
//! - `error_mapping` - Error taxonomy to HTTP response mapping
//! - `admin_flows` - Full-router flows against a stub backend server
