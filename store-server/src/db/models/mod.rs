//! Database models
//!
//! Record types as stored in SurrealDB. References between records are
//! `Thing` links; the API-facing string-id mirrors live in the `shared`
//! crate and are produced by `api::convert`.

pub mod category;
pub mod product;
pub mod serde_thing;

// Re-exports
pub use category::*;
pub use product::*;
