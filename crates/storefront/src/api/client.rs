//! HTTP client for the product API.
//!
//! Uses `reqwest` 0.13 with JSON bodies. No caching and no retries: every call
//! goes to the API.

use std::sync::Arc;

use cartlane_core::{ProductId, RemoteProduct};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, ERROR_BODY_LIMIT, LOG_BODY_LIMIT, truncate_body};

// =============================================================================
// ProductApiClient
// =============================================================================

/// Read-only client for the product API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ProductApiClient {
    inner: Arc<ProductApiClientInner>,
}

struct ProductApiClientInner {
    client: reqwest::Client,
    /// Base URL, always ending in `/` so relative joins keep any path prefix.
    base_url: Url,
}

impl std::fmt::Debug for ProductApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ProductApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cartlane/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ProductApiClientInner {
                client,
                base_url: normalize_base(base_url),
            }),
        })
    }

    /// Base URL the client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Public URL of a product's image.
    #[must_use]
    pub fn image_url(&self, id: ProductId) -> String {
        image_url(&self.inner.base_url, id)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-success status, or a body
    /// that is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<RemoteProduct>, ApiError> {
        let url = self.endpoint("api/products")?;
        let products: Vec<RemoteProduct> = self.get_json(url).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Fetch one product by id.
    ///
    /// Returns `Ok(None)` when the API answers 404.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, any other non-success status, or
    /// an unparseable body.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Option<RemoteProduct>, ApiError> {
        let url = self.endpoint(&format!("api/products/{id}"))?;
        match self.get_json(url).await {
            Ok(product) => Ok(Some(product)),
            Err(ApiError::NotFound(_)) => {
                debug!("Product not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Search products by keyword.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-success status, or an
    /// unparseable body.
    #[instrument(skip(self))]
    pub async fn search_products(&self, keyword: &str) -> Result<Vec<RemoteProduct>, ApiError> {
        let mut url = self.endpoint("api/products/search")?;
        url.query_pairs_mut().append_pair("keyword", keyword);
        let products: Vec<RemoteProduct> = self.get_json(url).await?;
        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// GET a JSON document, mapping 404 to [`ApiError::NotFound`].
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let path = url.path().to_string();
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path,
                body = %truncate_body(&response_text, LOG_BODY_LIMIT),
                "Product API returned non-success status"
            );
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate_body(&response_text, ERROR_BODY_LIMIT),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                body = %truncate_body(&response_text, LOG_BODY_LIMIT),
                "Failed to parse product API response"
            );
            ApiError::Parse(e)
        })
    }
}

/// Image URL for a product under a given API base.
#[must_use]
pub fn image_url(base_url: &Url, id: ProductId) -> String {
    format!(
        "{}/api/product/{id}/image",
        base_url.as_str().trim_end_matches('/')
    )
}

fn normalize_base(base_url: &Url) -> Url {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ProductApiClient {
        ProductApiClient::new(&Url::parse(&server.uri()).unwrap()).unwrap()
    }

    fn product_json(id: i64, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "description": "desc",
            "brand": "Acme",
            "price": 19.99,
            "category": "Mugs",
            "releaseDate": "2024-01-01",
            "productAvailable": true,
            "stockQuantity": 4,
            "imageName": "mug.png",
            "imageType": "image/png"
        })
    }

    #[test]
    fn test_image_url_trims_trailing_slash() {
        let base = Url::parse("http://localhost:8080/").unwrap();
        assert_eq!(
            image_url(&base, ProductId::new(7)),
            "http://localhost:8080/api/product/7/image"
        );
    }

    #[test]
    fn test_normalize_base_keeps_path_prefix() {
        let base = normalize_base(&Url::parse("http://host/shop").unwrap());
        assert_eq!(
            base.join("api/products").unwrap().as_str(),
            "http://host/shop/api/products"
        );
    }

    #[tokio::test]
    async fn test_list_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(vec![product_json(1, "Mug"), product_json(2, "Cup")]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let products = client_for(&server).list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "Cup");
    }

    #[tokio::test]
    async fn test_get_product_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let product = client_for(&server)
            .get_product(ProductId::new(999))
            .await
            .unwrap();
        assert!(product.is_none());
    }

    #[tokio::test]
    async fn test_search_sends_keyword() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/search"))
            .and(query_param("keyword", "blue mug"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![product_json(3, "Blue Mug")]))
            .expect(1)
            .mount(&server)
            .await;

        let products = client_for(&server).search_products("blue mug").await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_products().await.unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unexpected_status_body_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(502).set_body_string("e".repeat(LOG_BODY_LIMIT)))
            .mount(&server)
            .await;

        let err = client_for(&server).list_products().await.unwrap_err();
        match err {
            ApiError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), ERROR_BODY_LIMIT);
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_products().await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
