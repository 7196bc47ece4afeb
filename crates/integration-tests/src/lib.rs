//! Integration tests for Cartlane.
//!
//! Every test runs against an in-process mock of the product API
//! ([`wiremock`]), so no external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartlane-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Catalog adapter against the product API
//! - `cart_operations` - Cart scenarios over each persistence backend
//! - `admin_products` - Product CRUD and the edit-image rule

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use cartlane_storefront::{
    Catalog, CartService, CartStore, KeyValueStore, MemoryStore, ProductApiClient,
};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A product record as the product API serves it.
#[must_use]
pub fn product_json(id: i64, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "brand": "Acme",
        "price": price,
        "category": "General",
        "releaseDate": "2024-05-01",
        "productAvailable": true,
        "stockQuantity": 25,
        "imageName": format!("{id}.png"),
        "imageType": "image/png",
        "imageData": null
    })
}

/// Mock product API preloaded with products.
pub struct TestApi {
    pub server: MockServer,
}

impl TestApi {
    /// Start a server serving `products` on the list and by-id endpoints.
    ///
    /// Ids not in `products` answer 404.
    pub async fn with_products(products: &[Value]) -> Self {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products))
            .mount(&server)
            .await;

        for product in products {
            let id = product["id"].as_i64().unwrap();
            Mock::given(method("GET"))
                .and(path(format!("/api/products/{id}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(product))
                .mount(&server)
                .await;
        }

        // Lowest priority: anything else under /api/products/{id} is missing
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Product not found"))
            .with_priority(u8::MAX)
            .mount(&server)
            .await;

        Self { server }
    }

    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&self.server.uri()).unwrap()
    }

    #[must_use]
    pub fn client(&self) -> ProductApiClient {
        ProductApiClient::new(&self.url()).unwrap()
    }

    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.client())
    }

    /// Cart service persisting into `backend`.
    #[must_use]
    pub fn carts(&self, backend: Arc<dyn KeyValueStore>) -> CartService {
        CartService::new(self.client(), CartStore::new(backend))
    }

    /// Cart service persisting into a fresh memory store.
    #[must_use]
    pub fn memory_carts(&self) -> (CartService, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        (self.carts(backend.clone()), backend)
    }
}
