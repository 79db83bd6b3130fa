//! End-to-end catalog flow against an embedded database instance
//! Run: cargo test -p store-server --test catalog_flow

use shared::models as api;
use store_server::catalog::{self, CategoryLookup, search::COMBINED_LIMITS};
use store_server::db::DbService;
use store_server::db::models::{CategoryCreate, ProductCreate, VariantCreate};
use store_server::db::repository::{CategoryRepository, ProductRepository, RepoError};

async fn open_db(dir: &tempfile::TempDir) -> DbService {
    let path = dir.path().join("store.db");
    DbService::new(&path.to_string_lossy()).await.unwrap()
}

fn category_create(name: &str, parent: Option<String>) -> CategoryCreate {
    CategoryCreate {
        name: name.to_string(),
        slug: None,
        description: None,
        parent,
        image: None,
    }
}

#[tokio::test]
async fn category_tree_and_search_flow() {
    let tmp = tempfile::tempdir().unwrap();
    let service = open_db(&tmp).await;
    let categories = CategoryRepository::new(service.db.clone());
    let products = ProductRepository::new(service.db.clone());

    // Categories: apparel > shirts, plus one with a dangling parent
    let apparel = categories
        .create(category_create("Apparel", None))
        .await
        .unwrap();
    let apparel_id = apparel.id.as_ref().unwrap().to_string();
    let shirts = categories
        .create(category_create("Shirts", Some(apparel_id.clone())))
        .await
        .unwrap();
    let shirts_id = shirts.id.as_ref().unwrap().to_string();
    categories
        .create(category_create("Clearance", Some("category:missing".to_string())))
        .await
        .unwrap();

    // Simple discounted product in two categories
    products
        .create(ProductCreate {
            name: "Linen Shirt".to_string(),
            slug: None,
            description: Some("Breathable linen shirt".to_string()),
            price: 100.0,
            discount_price: Some(80.0),
            product_type: None,
            categories: vec![apparel_id.clone(), shirts_id.clone()],
            in_stock: None,
            stock: Some(12),
            variants: vec![],
            images: vec![],
        })
        .await
        .unwrap();

    // Variable product whose parent price must be ignored
    let variant = |name: &str, price: f64| VariantCreate {
        name: name.to_string(),
        price,
        discount_price: None,
        in_stock: None,
        stock: None,
        attributes: vec![],
        image: None,
    };
    products
        .create(ProductCreate {
            name: "Oxford Shirt".to_string(),
            slug: None,
            description: None,
            price: 9.99,
            discount_price: None,
            product_type: Some(store_server::db::models::ProductType::Variable),
            categories: vec![shirts_id.clone()],
            in_stock: None,
            stock: None,
            variants: vec![
                variant("S", 80.0),
                variant("M", 120.0),
                variant("L", 95.0),
            ],
            images: vec![],
        })
        .await
        .unwrap();

    let cats: Vec<api::Category> = categories
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    let prods: Vec<api::Product> = products
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    assert_eq!(cats.len(), 3);
    assert_eq!(prods.len(), 2);

    // Tree: Apparel root with Shirts nested, Clearance promoted to root
    let tree = catalog::build_category_tree(cats.clone(), &prods);
    assert_eq!(tree.len(), 2);
    let apparel_node = tree
        .iter()
        .find(|n| n.category.name == "Apparel")
        .unwrap();
    assert_eq!(apparel_node.product_count, 1);
    assert_eq!(apparel_node.children.len(), 1);
    let shirts_node = &apparel_node.children[0];
    assert_eq!(shirts_node.category.name, "Shirts");
    assert_eq!(shirts_node.product_count, 2);
    assert!(tree.iter().any(|n| n.category.name == "Clearance"));

    // Every membership counted once across the tree
    fn count_sum(nodes: &[api::CategoryNode]) -> u32 {
        nodes
            .iter()
            .map(|n| n.product_count + count_sum(&n.children))
            .sum()
    }
    let memberships: u32 = prods.iter().map(|p| p.categories.len() as u32).sum();
    assert_eq!(count_sum(&tree), memberships);

    // Combined search: both shirts match, plus the Shirts category
    let lookup = CategoryLookup::new(&cats);
    let hits = catalog::search_catalog(&prods, &cats, &lookup, "shirt", &[], COMBINED_LIMITS);
    let product_hits: Vec<_> = hits
        .iter()
        .filter_map(|h| match h {
            api::SearchHit::Product(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(product_hits.len(), 2);
    assert!(hits.iter().any(|h| matches!(h, api::SearchHit::Category(c) if c.name == "Shirts")));

    // Category names resolved through the request-scoped lookup
    let linen = product_hits
        .iter()
        .find(|p| p.name == "Linen Shirt")
        .unwrap();
    assert_eq!(
        linen.category_names,
        vec!["Apparel".to_string(), "Shirts".to_string()]
    );
    assert_eq!(linen.price_range.min, 80.0);
    assert_eq!(linen.price_range.max, 80.0);

    let oxford = product_hits
        .iter()
        .find(|p| p.name == "Oxford Shirt")
        .unwrap();
    assert_eq!(oxford.price_range.min, 80.0);
    assert_eq!(oxford.price_range.max, 120.0);
}

#[tokio::test]
async fn duplicate_slug_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let service = open_db(&tmp).await;
    let categories = CategoryRepository::new(service.db.clone());

    categories
        .create(category_create("Apparel", None))
        .await
        .unwrap();
    let duplicate = categories.create(category_create("Apparel", None)).await;
    assert!(matches!(duplicate, Err(RepoError::Duplicate(_))));
}

#[tokio::test]
async fn category_delete_guard_and_orphan_promotion() {
    let tmp = tempfile::tempdir().unwrap();
    let service = open_db(&tmp).await;
    let categories = CategoryRepository::new(service.db.clone());
    let products = ProductRepository::new(service.db.clone());

    let parent = categories
        .create(category_create("Outdoor", None))
        .await
        .unwrap();
    let parent_id = parent.id.as_ref().unwrap().to_string();
    let child = categories
        .create(category_create("Tents", Some(parent_id.clone())))
        .await
        .unwrap();
    let child_id = child.id.as_ref().unwrap().to_string();

    products
        .create(ProductCreate {
            name: "Dome Tent".to_string(),
            slug: None,
            description: None,
            price: 200.0,
            discount_price: None,
            product_type: None,
            categories: vec![child_id.clone()],
            in_stock: None,
            stock: None,
            variants: vec![],
            images: vec![],
        })
        .await
        .unwrap();

    // Referenced category cannot be deleted
    let blocked = categories.delete(&child_id).await;
    assert!(matches!(blocked, Err(RepoError::Validation(_))));

    // Deleting the parent orphans the child, which the next tree build
    // promotes to root
    categories.delete(&parent_id).await.unwrap();

    let cats: Vec<shared::models::Category> = categories
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    let prods: Vec<shared::models::Product> = products
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();

    let tree = catalog::build_category_tree(cats, &prods);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].category.name, "Tents");
    assert_eq!(tree[0].product_count, 1);
}
