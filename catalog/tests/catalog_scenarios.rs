//! End-to-end catalog scenarios through the store, with an in-memory backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)] // Test code can use unwrap/expect/panic

use catalog_testing::{init_test_tracing, test_clock, FixedClock};
use futures::StreamExt;
use product_catalog::mocks::MockCatalogApi;
use product_catalog::{
    Catalog, CatalogError, Category, CategoryId, Product, ProductId, Supplier, SupplierId,
};
use catalog_runtime::{StoreConfig, StoreError};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn books_api() -> MockCatalogApi {
    MockCatalogApi::new()
        .with_products(vec![
            Product::new(ProductId::new(1), "Dune")
                .with_price(10.0)
                .with_category(CategoryId::new(1)),
        ])
        .with_categories(vec![Category::new(CategoryId::new(1), "Books")])
}

fn toolbox_api() -> MockCatalogApi {
    MockCatalogApi::new()
        .with_products(vec![
            Product::new(ProductId::new(5), "Hammer")
                .with_price(8.9)
                .with_category(CategoryId::new(3))
                .with_suppliers([SupplierId::new(3), SupplierId::new(7)]),
            Product::new(ProductId::new(8), "Saw")
                .with_price(11.55)
                .with_category(CategoryId::new(3))
                .with_suppliers([]),
            Product::new(ProductId::new(10), "Video Game Controller")
                .with_price(35.95)
                .with_category(CategoryId::new(5))
                .with_suppliers([SupplierId::new(3)]),
        ])
        .with_categories(vec![
            Category::new(CategoryId::new(3), "Toolbox"),
            Category::new(CategoryId::new(5), "Gaming"),
        ])
        .with_supplier(Supplier::new(SupplierId::new(3)).with_attribute("name", "Acme Gizmo"))
        .with_supplier(Supplier::new(SupplierId::new(7)).with_attribute("name", "Acme Tools"))
}

async fn loaded(api: MockCatalogApi) -> Catalog<MockCatalogApi, FixedClock> {
    let catalog = Catalog::new(api, test_clock());
    catalog
        .load()
        .await
        .unwrap()
        .wait_with_timeout(TIMEOUT)
        .await
        .unwrap();
    catalog
}

async fn select(catalog: &Catalog<MockCatalogApi, FixedClock>, id: u32) {
    catalog
        .select_product(id)
        .await
        .unwrap()
        .wait_with_timeout(TIMEOUT)
        .await
        .unwrap();
}

#[tokio::test]
async fn books_scenario() {
    let catalog = loaded(books_api()).await;

    let products = catalog.filtered_products().await;
    assert_eq!(products[0].price, Some(15.0));
    assert_eq!(products[0].category.as_deref(), Some("Books"));

    catalog.select_category(1u32).await.unwrap();
    assert_eq!(catalog.filtered_products().await.len(), 1);

    catalog.select_category(9u32).await.unwrap();
    assert_eq!(catalog.filtered_products().await.len(), 0);

    catalog.select_category(0u32).await.unwrap();
    assert_eq!(catalog.filtered_products().await.len(), 1);
}

#[tokio::test]
async fn selected_product_is_stable_across_reads() {
    let catalog = loaded(books_api()).await;
    select(&catalog, 1).await;

    let first = catalog.selected_product().await;
    let second = catalog.selected_product().await;
    assert_eq!(first, second);
    assert_eq!(first.map(|p| p.product_name), Some("Dune".to_string()));
    assert_eq!(
        catalog.page_title().await.as_deref(),
        Some("Product detail for: Dune")
    );

    select(&catalog, 2).await;
    assert!(catalog.selected_product().await.is_none());
    assert!(catalog.page_title().await.is_none());
}

#[tokio::test]
async fn suppliers_for_selected_product() {
    let api = toolbox_api();
    let catalog = loaded(api.clone()).await;

    select(&catalog, 5).await;

    let suppliers = catalog.selected_product_suppliers().await.unwrap();
    let names: Vec<_> = suppliers
        .iter()
        .map(|s| s.attributes["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Acme Gizmo", "Acme Tools"]);
    assert_eq!(api.supplier_fetches(), 2);
    assert!(catalog.error_message().await.is_none());
}

#[tokio::test]
async fn failing_supplier_blanks_the_view() {
    init_test_tracing();
    let api = toolbox_api().failing_supplier(
        SupplierId::new(7),
        CatalogError::Backend {
            status: 404,
            message: "Http failure response for api/suppliers/7: 404 Not Found".into(),
        },
    );
    let catalog = loaded(api).await;

    select(&catalog, 5).await;

    assert!(catalog.selected_product_suppliers().await.is_none());
    assert_eq!(
        catalog.error_message().await.as_deref(),
        Some("Backend returned code 404: Http failure response for api/suppliers/7: 404 Not Found")
    );
}

#[tokio::test]
async fn product_without_suppliers_has_empty_list() {
    let api = toolbox_api();
    let catalog = loaded(api.clone()).await;

    select(&catalog, 8).await;

    assert_eq!(catalog.selected_product_suppliers().await, Some(vec![]));
    assert!(catalog.error_message().await.is_none());
    assert_eq!(api.supplier_fetches(), 0);
}

#[tokio::test]
async fn latest_selection_wins() {
    init_test_tracing();
    let api = toolbox_api().with_supplier_delay(SupplierId::new(7), Duration::from_millis(100));
    let catalog = loaded(api).await;

    // Slow lookup for product 5, then a fast one for product 10
    let mut slow = catalog.select_product(5u32).await.unwrap();
    select(&catalog, 10).await;
    slow.wait_with_timeout(TIMEOUT).await.unwrap();

    let suppliers = catalog.selected_product_suppliers().await.unwrap();
    assert_eq!(suppliers.len(), 1);
    assert_eq!(suppliers[0].id, SupplierId::new(3));
    assert_eq!(
        catalog.page_title().await.as_deref(),
        Some("Product detail for: Video Game Controller")
    );
}

#[tokio::test]
async fn add_product_then_reload() {
    let catalog = loaded(books_api()).await;
    assert_eq!(catalog.products_with_add().await.len(), 1);

    catalog.add_product(None).await.unwrap();
    catalog
        .add_product(Some(Product::new(ProductId::new(50), "Ladder")))
        .await
        .unwrap();

    let items = catalog.products_with_add().await;
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].id, ProductId::new(42));
    assert_eq!(items[1].product_name, "Another One");
    assert_eq!(items[1].price, Some(8.9));
    assert_eq!(items[2].product_name, "Ladder");

    // Added products never reach the enriched catalog itself
    assert_eq!(catalog.filtered_products().await.len(), 1);

    catalog
        .load()
        .await
        .unwrap()
        .wait_with_timeout(TIMEOUT)
        .await
        .unwrap();
    assert_eq!(catalog.products_with_add().await.len(), 1);
}

#[tokio::test]
async fn category_fetched_once_for_many_callers() {
    let api = books_api().with_fetch_delay(Duration::from_millis(20));
    let catalog = Catalog::new(api.clone(), test_clock());

    let (a, b) = tokio::join!(catalog.load(), catalog.load());
    a.unwrap().wait_with_timeout(TIMEOUT).await.unwrap();
    b.unwrap().wait_with_timeout(TIMEOUT).await.unwrap();

    assert_eq!(catalog.categories().await.map(|c| c.len()), Some(1));
    assert_eq!(api.category_fetches(), 1);
    assert_eq!(api.product_fetches(), 1);
}

#[tokio::test]
async fn category_failure_is_reported() {
    let api = books_api().failing_categories(CatalogError::Network("connection refused".into()));
    let catalog = loaded(api.clone()).await;

    assert!(catalog.categories().await.is_none());
    assert!(catalog.filtered_products().await.is_empty());
    assert_eq!(
        catalog.error_message().await.as_deref(),
        Some("An error occurred: connection refused")
    );

    // Not cached: a reload asks again
    api.set_categories(vec![Category::new(CategoryId::new(1), "Books")]);
    catalog
        .load()
        .await
        .unwrap()
        .wait_with_timeout(TIMEOUT)
        .await
        .unwrap();

    assert_eq!(catalog.filtered_products().await.len(), 1);
    assert_eq!(api.category_fetches(), 2);
}

#[tokio::test]
async fn transformed_products_skip_categories() {
    let api = books_api();
    let catalog = Catalog::new(api.clone(), test_clock());

    let products = catalog.products_transformed().await.unwrap();

    assert_eq!(products[0].price, Some(15.0));
    assert_eq!(products[0].search_key, Some(vec!["Dune".to_string()]));
    assert!(products[0].category.is_none());
    assert_eq!(api.category_fetches(), 0);
}

#[tokio::test]
async fn watched_views_follow_changes() {
    let catalog = Catalog::new(toolbox_api(), test_clock());
    let mut filtered = Box::pin(catalog.watch_filtered_products());
    let mut titles = Box::pin(catalog.watch_page_title());

    assert_eq!(filtered.next().await, Some(vec![]));
    assert_eq!(titles.next().await, Some(None));

    catalog
        .load()
        .await
        .unwrap()
        .wait_with_timeout(TIMEOUT)
        .await
        .unwrap();
    let all = filtered.next().await.unwrap();
    assert_eq!(all.len(), 3);

    catalog.select_category(5u32).await.unwrap();
    let gaming = filtered.next().await.unwrap();
    assert_eq!(gaming.len(), 1);

    select(&catalog, 10).await;
    assert_eq!(
        titles.next().await,
        Some(Some("Product detail for: Video Game Controller".to_string()))
    );
}

#[tokio::test]
async fn watched_errors_follow_failures() {
    let api = toolbox_api().failing_supplier(
        SupplierId::new(3),
        CatalogError::Network("connection reset".into()),
    );
    let catalog = loaded(api).await;
    let mut errors = Box::pin(catalog.watch_error_message());
    let mut suppliers = Box::pin(catalog.watch_selected_product_suppliers());

    assert_eq!(errors.next().await, Some(None));
    assert_eq!(suppliers.next().await, Some(None));

    select(&catalog, 8).await;
    assert_eq!(suppliers.next().await, Some(Some(vec![])));

    select(&catalog, 5).await;
    assert_eq!(suppliers.next().await, Some(None));
    assert_eq!(
        errors.next().await,
        Some(Some("An error occurred: connection reset".to_string()))
    );
}

#[tokio::test]
async fn shutdown_rejects_further_commands() {
    let catalog = loaded(books_api()).await;
    catalog.shutdown(TIMEOUT).await.unwrap();

    assert!(catalog.select_category(1u32).await.is_err());
    assert!(catalog.add_product(None).await.is_err());
}

#[tokio::test]
async fn shutdown_default_times_out_on_running_lookups() {
    let api = toolbox_api().with_supplier_delay(SupplierId::new(3), Duration::from_millis(200));
    let catalog = Catalog::with_store_config(
        api,
        test_clock(),
        StoreConfig::default().with_shutdown_timeout(Duration::from_millis(20)),
    );
    catalog
        .load()
        .await
        .unwrap()
        .wait_with_timeout(TIMEOUT)
        .await
        .unwrap();
    let _lookup = catalog.select_product(10u32).await.unwrap();

    let result = catalog.shutdown_default().await;
    assert!(matches!(result, Err(StoreError::ShutdownTimeout(_))));
}

#[tokio::test]
async fn reselecting_with_equal_suppliers_does_not_yield_again() {
    let api = toolbox_api();
    let catalog = loaded(api.clone()).await;
    let mut suppliers = Box::pin(catalog.watch_selected_product_suppliers());
    assert_eq!(suppliers.next().await, Some(None));

    select(&catalog, 10).await;
    assert_eq!(suppliers.next().await.flatten().map(|s| s.len()), Some(1));

    select(&catalog, 10).await;
    assert_eq!(api.supplier_fetches(), 2);
    let repeat = tokio::time::timeout(Duration::from_millis(50), suppliers.next()).await;
    assert!(repeat.is_err());
}
