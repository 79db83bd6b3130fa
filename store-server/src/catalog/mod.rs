//! Catalog Core
//!
//! The storefront's computational core: category tree construction,
//! product/category search aggregation, and price range resolution.
//! Everything here is a request-scoped pure function over the current
//! snapshot: no caches and no state shared across calls.

pub mod price;
pub mod search;
pub mod tree;

// Re-exports
pub use price::{effective_price, price_range};
pub use search::{CategoryLookup, SearchLimits, search_catalog, search_products};
pub use tree::build_category_tree;

/// Normalize a category reference to its bare id form.
///
/// References leave the store as "category:xyz" but may also arrive as
/// bare ids from query parameters or imported data; every membership and
/// equality check runs on the bare form.
pub fn normalize_category_id(reference: &str) -> &str {
    reference.strip_prefix("category:").unwrap_or(reference)
}
