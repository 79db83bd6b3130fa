//! Product/Category Search Aggregator
//!
//! Free-text and category-filter search over the catalog. The category
//! name lookup is built fresh from the current snapshot and passed in
//! per request; 没有模块级缓存，写入后不会出现脏读。

use std::collections::{HashMap, HashSet};

use shared::models::{Category, CategoryHit, Product, ProductHit, SearchHit};

use super::normalize_category_id;
use super::price::price_range;

/// Sentinel label for references that resolve to no known category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Per-endpoint result caps
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub products: usize,
    pub categories: usize,
}

/// Combined search endpoint caps
pub const COMBINED_LIMITS: SearchLimits = SearchLimits {
    products: 20,
    categories: 5,
};

/// Simple product search cap (suggestion box)
pub const SIMPLE_LIMITS: SearchLimits = SearchLimits {
    products: 10,
    categories: 0,
};

/// Identifier -> display name lookup, built per request from the full
/// category collection
#[derive(Debug, Default)]
pub struct CategoryLookup {
    names: HashMap<String, String>,
}

impl CategoryLookup {
    pub fn new(categories: &[Category]) -> Self {
        let mut names = HashMap::new();
        for category in categories {
            if let Some(id) = category.id.as_deref() {
                names.insert(
                    normalize_category_id(id).to_string(),
                    category.name.clone(),
                );
            }
        }
        Self { names }
    }

    /// Resolve a reference to a display name. Unresolvable references
    /// degrade to the sentinel instead of failing the request.
    pub fn name_for(&self, reference: &str) -> String {
        self.names
            .get(normalize_category_id(reference))
            .cloned()
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    }
}

/// Parse the comma-separated category filter into normalized ids.
/// Malformed entries stay as opaque strings and simply match nothing.
pub fn parse_category_filter(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| normalize_category_id(part).to_string())
            .collect()
    })
    .unwrap_or_default()
}

fn matches_query(product: &Product, query_lower: &str) -> bool {
    product.name.to_lowercase().contains(query_lower)
        || product.description.to_lowercase().contains(query_lower)
}

fn in_filter(product: &Product, filter: &HashSet<&str>) -> bool {
    product
        .categories
        .iter()
        .any(|reference| filter.contains(normalize_category_id(reference)))
}

/// Match products: case-insensitive substring on name/description,
/// intersected with the category filter when one is given
pub fn filter_products<'a>(
    products: &'a [Product],
    query: &str,
    category_filter: &[String],
) -> Vec<&'a Product> {
    let query_lower = query.trim().to_lowercase();
    let filter: HashSet<&str> = category_filter.iter().map(String::as_str).collect();

    products
        .iter()
        .filter(|p| query_lower.is_empty() || matches_query(p, &query_lower))
        .filter(|p| filter.is_empty() || in_filter(p, &filter))
        .collect()
}

/// Match categories on name substring (free-text queries only)
pub fn filter_categories<'a>(categories: &'a [Category], query: &str) -> Vec<&'a Category> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }
    categories
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&query_lower))
        .collect()
}

fn product_hit(product: &Product, lookup: &CategoryLookup) -> ProductHit {
    ProductHit {
        id: product.id.clone(),
        name: product.name.clone(),
        slug: product.slug.clone(),
        description: product.description.clone(),
        price_range: price_range(product),
        category_names: product
            .categories
            .iter()
            .map(|reference| lookup.name_for(reference))
            .collect(),
        image: product.images.first().cloned(),
        in_stock: product.in_stock,
    }
}

fn category_hit(category: &Category) -> CategoryHit {
    CategoryHit {
        id: category.id.clone(),
        name: category.name.clone(),
        slug: category.slug.clone(),
        image: category.image.clone(),
    }
}

/// Aggregate the combined, tagged search result list.
///
/// Empty query + empty filter means an empty result set, never a browse-all
/// fallback. Natural match order is preserved; products and categories
/// are capped separately. Category hits only join in when a free-text
/// query is present.
pub fn search_catalog(
    products: &[Product],
    categories: &[Category],
    lookup: &CategoryLookup,
    query: &str,
    category_filter: &[String],
    limits: SearchLimits,
) -> Vec<SearchHit> {
    let query = query.trim();
    if query.is_empty() && category_filter.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchHit> = filter_products(products, query, category_filter)
        .into_iter()
        .take(limits.products)
        .map(|p| SearchHit::Product(product_hit(p, lookup)))
        .collect();

    if !query.is_empty() {
        results.extend(
            filter_categories(categories, query)
                .into_iter()
                .take(limits.categories)
                .map(|c| SearchHit::Category(category_hit(c))),
        );
    }

    results
}

/// Simple product-only search (suggestion endpoint)
pub fn search_products(
    products: &[Product],
    lookup: &CategoryLookup,
    query: &str,
) -> Vec<ProductHit> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    filter_products(products, query, &[])
        .into_iter()
        .take(SIMPLE_LIMITS.products)
        .map(|p| product_hit(p, lookup))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProductType;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: Some(format!("category:{id}")),
            name: name.to_string(),
            slug: id.to_string(),
            description: None,
            parent: None,
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn product(slug: &str, name: &str, description: &str, categories: &[&str]) -> Product {
        Product {
            id: Some(format!("product:{slug}")),
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
            price: 25.0,
            discount_price: None,
            product_type: ProductType::Simple,
            categories: categories.iter().map(|c| format!("category:{c}")).collect(),
            in_stock: true,
            stock: None,
            variants: vec![],
            images: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn empty_query_and_filter_returns_nothing() {
        let products = vec![product("shirt", "Shirt", "", &[])];
        let categories = vec![category("a", "Apparel")];
        let lookup = CategoryLookup::new(&categories);

        let hits = search_catalog(&products, &categories, &lookup, "  ", &[], COMBINED_LIMITS);
        assert!(hits.is_empty());
    }

    #[test]
    fn matches_name_and_description_case_insensitively() {
        let products = vec![
            product("linen-shirt", "Linen SHIRT", "", &[]),
            product("mug", "Mug", "a shirt-printed mug", &[]),
            product("socks", "Socks", "warm", &[]),
        ];
        let lookup = CategoryLookup::default();

        let hits = search_catalog(&products, &[], &lookup, "shirt", &[], COMBINED_LIMITS);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn category_filter_intersects_query_matches() {
        let products = vec![
            product("shirt-a", "Shirt A", "", &["apparel"]),
            product("shirt-b", "Shirt B", "", &["clearance"]),
        ];
        let filter = vec!["apparel".to_string()];
        let lookup = CategoryLookup::default();

        let hits = search_catalog(&products, &[], &lookup, "shirt", &filter, COMBINED_LIMITS);
        assert_eq!(hits.len(), 1);
        match &hits[0] {
            SearchHit::Product(p) => assert_eq!(p.slug, "shirt-a"),
            other => panic!("expected product hit, got {other:?}"),
        }
    }

    #[test]
    fn filter_only_request_returns_products_but_no_categories() {
        let products = vec![product("shirt", "Shirt", "", &["apparel"])];
        let categories = vec![category("apparel", "Apparel")];
        let filter = vec!["apparel".to_string()];
        let lookup = CategoryLookup::new(&categories);

        let hits = search_catalog(&products, &categories, &lookup, "", &filter, COMBINED_LIMITS);
        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0], SearchHit::Product(_)));
    }

    #[test]
    fn category_hits_join_in_for_free_text_queries() {
        let categories = vec![
            category("shirts", "Shirts"),
            category("shoes", "Shoes"),
        ];
        let lookup = CategoryLookup::new(&categories);

        let hits = search_catalog(&[], &categories, &lookup, "shirt", &[], COMBINED_LIMITS);
        assert_eq!(hits.len(), 1);
        match &hits[0] {
            SearchHit::Category(c) => assert_eq!(c.slug, "shirts"),
            other => panic!("expected category hit, got {other:?}"),
        }
    }

    #[test]
    fn product_and_category_caps_apply_separately() {
        let products: Vec<Product> = (0..30)
            .map(|i| product(&format!("tee-{i}"), &format!("Tee {i}"), "", &[]))
            .collect();
        let categories: Vec<Category> = (0..8)
            .map(|i| category(&format!("c{i}"), &format!("Tee Rack {i}")))
            .collect();
        let lookup = CategoryLookup::new(&categories);

        let hits = search_catalog(&products, &categories, &lookup, "tee", &[], COMBINED_LIMITS);
        let product_hits = hits
            .iter()
            .filter(|h| matches!(h, SearchHit::Product(_)))
            .count();
        let category_hits = hits
            .iter()
            .filter(|h| matches!(h, SearchHit::Category(_)))
            .count();
        assert_eq!(product_hits, COMBINED_LIMITS.products);
        assert_eq!(category_hits, COMBINED_LIMITS.categories);
    }

    #[test]
    fn simple_search_caps_at_ten() {
        let products: Vec<Product> = (0..15)
            .map(|i| product(&format!("tee-{i}"), &format!("Tee {i}"), "", &[]))
            .collect();
        let lookup = CategoryLookup::default();

        let hits = search_products(&products, &lookup, "tee");
        assert_eq!(hits.len(), SIMPLE_LIMITS.products);
    }

    #[test]
    fn unresolvable_reference_degrades_to_sentinel() {
        let products = vec![product("shirt", "Shirt", "", &["apparel", "ghost"])];
        let categories = vec![category("apparel", "Apparel")];
        let lookup = CategoryLookup::new(&categories);

        let hits = search_products(&products, &lookup, "shirt");
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0].category_names,
            vec!["Apparel".to_string(), UNCATEGORIZED.to_string()]
        );
    }

    #[test]
    fn filter_parsing_trims_and_normalizes() {
        let filter = parse_category_filter(Some(" category:a , b,, "));
        assert_eq!(filter, vec!["a".to_string(), "b".to_string()]);
        assert!(parse_category_filter(None).is_empty());
        assert!(parse_category_filter(Some("  ")).is_empty());
    }

    #[test]
    fn malformed_filter_entries_match_nothing() {
        let products = vec![product("shirt", "Shirt", "", &["apparel"])];
        let filter = vec!["%%garbage%%".to_string()];
        let lookup = CategoryLookup::default();

        let hits = search_catalog(&products, &[], &lookup, "", &filter, COMBINED_LIMITS);
        assert!(hits.is_empty());
    }
}
