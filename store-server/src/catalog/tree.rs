//! Category Tree Builder
//!
//! Builds the nested category tree from flat parent-pointer records and
//! annotates every node with its product membership count.

use std::collections::{HashMap, HashSet};

use shared::models::{Category, CategoryNode, Product};

use super::normalize_category_id;

/// Build the category tree.
///
/// Two passes over small in-memory collections:
/// 1. count product memberships per category id (a product listed in N
///    categories increments N counters)
/// 2. link children to parents in input order
///
/// A node becomes a root when its parent reference is absent, points to
/// an id outside the input set (dangling), or sits on a parent-reference
/// cycle. Every input category appears exactly once in the output;
/// sibling order follows input iteration order, no sorting is applied.
/// Records are passed through unvalidated.
pub fn build_category_tree(categories: Vec<Category>, products: &[Product]) -> Vec<CategoryNode> {
    let counts = product_counts(products);

    // Declared (normalized) parent of every identified category
    let mut parent_of: HashMap<String, Option<String>> = HashMap::new();
    for category in &categories {
        if let Some(id) = category.id.as_deref() {
            let parent = category
                .parent
                .as_deref()
                .map(|p| normalize_category_id(p).to_string());
            parent_of.insert(normalize_category_id(id).to_string(), parent);
        }
    }

    let mut nodes: HashMap<String, CategoryNode> = HashMap::new();
    let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
    let mut roots: Vec<String> = Vec::new();
    let mut anonymous: Vec<CategoryNode> = Vec::new();

    for category in categories {
        let Some(raw_id) = category.id.clone() else {
            // Record without an identifier: cannot be referenced, passes
            // through as a root leaf
            anonymous.push(make_node(category, 0));
            continue;
        };
        let id = normalize_category_id(&raw_id).to_string();
        let count = counts.get(&id).copied().unwrap_or(0);

        match effective_parent(&id, &parent_of) {
            Some(parent_id) => children_of.entry(parent_id).or_default().push(id.clone()),
            None => roots.push(id.clone()),
        }
        nodes.insert(id, make_node(category, count));
    }

    let mut tree: Vec<CategoryNode> = roots
        .iter()
        .filter_map(|id| assemble(id, &mut nodes, &children_of))
        .collect();
    tree.extend(anonymous);
    tree
}

/// Product memberships per normalized category id
fn product_counts(products: &[Product]) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for product in products {
        for reference in &product.categories {
            let id = normalize_category_id(reference).to_string();
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
}

/// Resolve the parent a node actually attaches under.
///
/// None means root: no declared parent, a dangling one, or a parent
/// chain that loops back to the node itself (the cycle is broken at
/// every node on it, so construction always terminates).
fn effective_parent(id: &str, parent_of: &HashMap<String, Option<String>>) -> Option<String> {
    let declared = parent_of.get(id).cloned().flatten()?;
    if !parent_of.contains_key(&declared) {
        // Dangling parent: promote to root rather than drop
        return None;
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = declared.as_str();
    while visited.insert(current) {
        match parent_of.get(current).and_then(|p| p.as_deref()) {
            Some(next) if next == id => return None,
            Some(next) if parent_of.contains_key(next) => current = next,
            _ => break,
        }
    }

    Some(declared)
}

fn make_node(category: Category, product_count: u32) -> CategoryNode {
    CategoryNode {
        category,
        product_count,
        children: Vec::new(),
    }
}

/// Move a node out of the map and recursively attach its children
fn assemble(
    id: &str,
    nodes: &mut HashMap<String, CategoryNode>,
    children_of: &HashMap<String, Vec<String>>,
) -> Option<CategoryNode> {
    let mut node = nodes.remove(id)?;
    if let Some(child_ids) = children_of.get(id) {
        for child_id in child_ids {
            if let Some(child) = assemble(child_id, nodes, children_of) {
                node.children.push(child);
            }
        }
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, parent: Option<&str>) -> Category {
        Category {
            id: Some(format!("category:{id}")),
            name: id.to_uppercase(),
            slug: id.to_string(),
            description: None,
            parent: parent.map(|p| format!("category:{p}")),
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn product(slug: &str, categories: &[&str]) -> Product {
        Product {
            id: Some(format!("product:{slug}")),
            name: slug.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            price: 10.0,
            discount_price: None,
            product_type: Default::default(),
            categories: categories.iter().map(|c| format!("category:{c}")).collect(),
            in_stock: true,
            stock: None,
            variants: vec![],
            images: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    fn node_count(nodes: &[CategoryNode]) -> usize {
        nodes
            .iter()
            .map(|n| 1 + node_count(&n.children))
            .sum()
    }

    fn count_sum(nodes: &[CategoryNode]) -> u32 {
        nodes
            .iter()
            .map(|n| n.product_count + count_sum(&n.children))
            .sum()
    }

    #[test]
    fn nests_children_under_parents() {
        let cats = vec![
            category("apparel", None),
            category("shirts", Some("apparel")),
            category("shoes", Some("apparel")),
        ];
        let tree = build_category_tree(cats, &[]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].category.slug, "apparel");
        let children: Vec<&str> = tree[0]
            .children
            .iter()
            .map(|c| c.category.slug.as_str())
            .collect();
        assert_eq!(children, vec!["shirts", "shoes"]);
    }

    #[test]
    fn every_category_appears_exactly_once() {
        let cats = vec![
            category("a", None),
            category("b", Some("a")),
            category("c", Some("b")),
            category("d", Some("missing")),
            category("e", None),
        ];
        let tree = build_category_tree(cats, &[]);
        assert_eq!(node_count(&tree), 5);
    }

    #[test]
    fn dangling_parent_promotes_to_root() {
        let cats = vec![
            category("a", None),
            category("orphan", Some("missing")),
        ];
        let tree = build_category_tree(cats, &[]);

        let roots: Vec<&str> = tree.iter().map(|n| n.category.slug.as_str()).collect();
        assert_eq!(roots, vec!["a", "orphan"]);
    }

    #[test]
    fn product_counts_cover_every_membership() {
        let cats = vec![
            category("a", None),
            category("b", Some("a")),
            category("c", None),
        ];
        let prods = vec![
            product("p1", &["a", "b"]),
            product("p2", &["b"]),
            product("p3", &["c", "a"]),
        ];
        let tree = build_category_tree(cats, &prods);

        let membership_total: u32 = prods.iter().map(|p| p.categories.len() as u32).sum();
        assert_eq!(count_sum(&tree), membership_total);
    }

    #[test]
    fn membership_in_unknown_category_does_not_count() {
        let cats = vec![category("a", None)];
        let prods = vec![product("p1", &["a", "ghost"])];
        let tree = build_category_tree(cats, &prods);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].product_count, 1);
    }

    #[test]
    fn bare_and_prefixed_references_count_the_same() {
        let cats = vec![category("a", None)];
        let mut bare = product("p1", &[]);
        bare.categories = vec!["a".to_string()];
        let prods = vec![bare, product("p2", &["a"])];
        let tree = build_category_tree(cats, &prods);

        assert_eq!(tree[0].product_count, 2);
    }

    #[test]
    fn cycle_members_promote_to_root_and_build_terminates() {
        let cats = vec![
            category("a", Some("b")),
            category("b", Some("a")),
            category("under", Some("a")),
        ];
        let tree = build_category_tree(cats, &[]);

        // a and b both break out to root; "under" still hangs off a
        assert_eq!(node_count(&tree), 3);
        let roots: Vec<&str> = tree.iter().map(|n| n.category.slug.as_str()).collect();
        assert_eq!(roots, vec!["a", "b"]);
        let a = &tree[0];
        assert_eq!(a.children.len(), 1);
        assert_eq!(a.children[0].category.slug, "under");
    }

    #[test]
    fn self_parent_promotes_to_root() {
        let cats = vec![category("loop", Some("loop"))];
        let tree = build_category_tree(cats, &[]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn root_order_follows_input_order() {
        let cats = vec![
            category("z", None),
            category("m", None),
            category("a", None),
        ];
        let tree = build_category_tree(cats, &[]);
        let roots: Vec<&str> = tree.iter().map(|n| n.category.slug.as_str()).collect();
        assert_eq!(roots, vec!["z", "m", "a"]);
    }

    #[test]
    fn id_less_record_passes_through_as_root() {
        let mut broken = category("x", None);
        broken.id = None;
        let cats = vec![category("a", None), broken];
        let tree = build_category_tree(cats, &[]);
        assert_eq!(tree.len(), 2);
    }
}
