//! Bazaar Admin library.
//!
//! Server-rendered administration panel for the Bazaar e-commerce
//! backend: product catalog, homepage carousel, and admin account
//! management behind a cookie session.
//!
//! The panel holds no data of its own. Every entity lives in the REST
//! backend; this crate authenticates against it, replays the issued JWT
//! on each call, and renders the responses.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
