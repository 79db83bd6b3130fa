//! Shared types for the storefront catalog
//!
//! API-facing data models exchanged between store-server and the web
//! storefront. Database record types live in store-server's db layer;
//! everything here carries plain string identifiers and serializes to
//! camelCase JSON.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
