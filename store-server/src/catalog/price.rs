//! Price Range Resolver
//!
//! Effective price and min/max resolution across product variants.
//! Monetary comparison goes through rust_decimal, f64 at the edges.

use rust_decimal::prelude::*;
use shared::models::{PriceRange, Product};

/// Convert f64 to Decimal for comparison
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Discount price applies only when present and strictly below the base
pub fn effective_price(price: f64, discount_price: Option<f64>) -> f64 {
    match discount_price {
        Some(discount) if to_decimal(discount) < to_decimal(price) => discount,
        _ => price,
    }
}

/// Resolve the `{min, max}` effective price for a product.
///
/// Products without variants resolve to their own effective price; this
/// includes variable-type products whose variant list is empty. Once
/// variants exist, min/max range over the variants' effective prices and
/// the parent's own price is ignored.
pub fn price_range(product: &Product) -> PriceRange {
    if product.variants.is_empty() {
        let price = effective_price(product.price, product.discount_price);
        return PriceRange {
            min: price,
            max: price,
        };
    }

    let prices: Vec<f64> = product
        .variants
        .iter()
        .map(|v| effective_price(v.price, v.discount_price))
        .collect();

    let mut min = prices[0];
    let mut max = prices[0];
    for &price in &prices[1..] {
        if to_decimal(price) < to_decimal(min) {
            min = price;
        }
        if to_decimal(price) > to_decimal(max) {
            max = price;
        }
    }

    PriceRange { min, max }
}
