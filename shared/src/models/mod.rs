//! Data models
//!
//! Shared between store-server and the storefront frontend (via API).
//! Identifiers are strings in the "table:id" form produced by the server.

pub mod category;
pub mod product;
pub mod search;

// Re-exports
pub use category::*;
pub use product::*;
pub use search::*;
