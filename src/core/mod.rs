//! Core domain logic: configuration, the authenticated HTTP client, the
//! session machine and the typed resource services.

pub mod auth;
pub mod claims;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod resources;
pub mod session;
pub mod token_store;
