use std::sync::Arc;

use mockito::Server;
use url::Url;

use basket_cli::catalog::{CatalogError, CatalogSource, HttpCatalogSource};
use basket_cli::models::product::ProductId;
use basket_cli::services::{CatalogFetch, CatalogService};

const PRODUCTS_BODY: &str = r#"[
    {
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    },
    {
        "id": 2,
        "title": "Mens Casual Premium Slim Fit T-Shirts",
        "price": 22.3,
        "description": "Slim-fitting style, contrast raglan long sleeve.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
        "rating": { "rate": 4.1, "count": 259 }
    }
]"#;

fn source_for(server: &Server) -> HttpCatalogSource {
    let endpoint = Url::parse(&format!("{}/products", server.url())).unwrap();
    HttpCatalogSource::new(endpoint).unwrap()
}

#[tokio::test]
async fn test_fetch_records_decodes_listing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PRODUCTS_BODY)
        .create_async()
        .await;

    let source = source_for(&server);
    let records = source.fetch_records().await.unwrap();

    mock.assert_async().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].category, "men's clothing");
    assert_eq!(records[1].rating.as_ref().unwrap().count, 259);
}

#[tokio::test]
async fn test_server_error_is_fetch_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/products")
        .with_status(500)
        .create_async()
        .await;

    let result = source_for(&server).fetch_records().await;
    assert!(matches!(result, Err(CatalogError::UnexpectedStatus(status)) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_malformed_body_is_fetch_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/products")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let result = source_for(&server).fetch_records().await;
    assert!(matches!(result, Err(CatalogError::DecodeError(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_fetch_failure() {
    let endpoint = Url::parse("http://127.0.0.1:1/products").unwrap();
    let source = HttpCatalogSource::new(endpoint).unwrap();

    let result = source.fetch_records().await;
    assert!(matches!(result, Err(CatalogError::RequestError(_))));
}

#[tokio::test]
async fn test_service_projects_products() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/products")
        .with_status(200)
        .with_body(PRODUCTS_BODY)
        .create_async()
        .await;

    let service = CatalogService::new(Arc::new(source_for(&server)));
    match service.fetch_products().await {
        CatalogFetch::Loaded(products) => {
            assert_eq!(products[0].id, ProductId(1));
            assert_eq!(products[1].price.to_string(), "22.3");
            assert!(products[0].image.starts_with("https://fakestoreapi.com/img/"));
        }
        CatalogFetch::Failed => panic!("expected products"),
    }
}

#[tokio::test]
async fn test_service_reports_sentinel_on_bad_json() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/products")
        .with_status(200)
        .with_body(r#"{"message":"not a list"}"#)
        .create_async()
        .await;

    let service = CatalogService::new(Arc::new(source_for(&server)));
    assert!(service.fetch_products().await.is_failed());
}
