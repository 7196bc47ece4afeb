//! Product API client for back-office operations.
//!
//! Reads mirror the storefront's; writes send multipart bodies with a
//! `product` JSON part and an `imageFile` part.

use std::sync::Arc;

use cartlane_core::{ProductId, RemoteProduct};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::AdminError;
use crate::form::ProductDraft;
use crate::upload::ImageUpload;

/// Maximum characters of a response body copied into logs.
const LOG_BODY_LIMIT: usize = 500;

/// Maximum characters of a response body carried in an [`AdminError`].
const ERROR_BODY_LIMIT: usize = 200;

// =============================================================================
// ProductAdminClient
// =============================================================================

/// Read/write client for the product API.
#[derive(Clone)]
pub struct ProductAdminClient {
    inner: Arc<ProductAdminClientInner>,
}

struct ProductAdminClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for ProductAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductAdminClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ProductAdminClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url) -> Result<Self, AdminError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cartlane-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(ProductAdminClientInner { client, base_url }),
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<RemoteProduct>, AdminError> {
        let url = self.endpoint("api/products")?;
        let body = self.send(self.inner.client.get(url)).await?;
        parse_json(&body)
    }

    /// Fetch one product; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Option<RemoteProduct>, AdminError> {
        let url = self.endpoint(&format!("api/products/{id}"))?;
        match self.send(self.inner.client.get(url)).await {
            Ok(body) => parse_json(&body).map(Some),
            Err(AdminError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Search products by keyword.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn search_products(&self, keyword: &str) -> Result<Vec<RemoteProduct>, AdminError> {
        let mut url = self.endpoint("api/products/search")?;
        url.query_pairs_mut().append_pair("keyword", keyword);
        let body = self.send(self.inner.client.get(url)).await?;
        parse_json(&body)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects the product.
    #[instrument(skip(self, draft, image), fields(name = %draft.name, image = %image.file_name))]
    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        image: &ImageUpload,
    ) -> Result<RemoteProduct, AdminError> {
        let url = self.endpoint("api/product")?;
        let form = product_form(draft, image)?;
        let body = self.send(self.inner.client.post(url).multipart(form)).await?;
        let product: RemoteProduct = parse_json(&body)?;
        info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    /// Replace a product's fields and image.
    ///
    /// The product API overwrites the stored image on every update, so an
    /// image is mandatory; without one nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::ImageRequired` when `image` is `None`,
    /// `AdminError::NotFound` for an unknown id, or any transport error.
    #[instrument(skip(self, draft, image), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
        image: Option<&ImageUpload>,
    ) -> Result<String, AdminError> {
        let image = image.ok_or(AdminError::ImageRequired)?;
        let url = self.endpoint(&format!("api/product/{id}"))?;
        let form = product_form(draft, image)?;
        let body = self.send(self.inner.client.put(url).multipart(form)).await?;
        info!("Updated product");
        Ok(body)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` for an unknown id, or any transport
    /// error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<String, AdminError> {
        let url = self.endpoint(&format!("api/product/{id}"))?;
        let body = self.send(self.inner.client.delete(url)).await?;
        info!("Deleted product");
        Ok(body)
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, AdminError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and return the body of a success response.
    async fn send(&self, request: RequestBuilder) -> Result<String, AdminError> {
        let response = request.send().await?;
        let status = response.status();
        let path = response.url().path().to_string();

        if status == StatusCode::NOT_FOUND {
            debug!(path = %path, "Product API returned 404");
            return Err(AdminError::NotFound(path));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path,
                body = %truncate_body(&body, LOG_BODY_LIMIT),
                "Product API returned non-success status"
            );
            return Err(AdminError::UnexpectedStatus {
                status: status.as_u16(),
                message: truncate_body(&body, ERROR_BODY_LIMIT),
            });
        }

        Ok(body)
    }
}

/// Multipart body for create and update.
fn product_form(draft: &ProductDraft, image: &ImageUpload) -> Result<Form, AdminError> {
    let product = Part::text(serde_json::to_string(draft)?).mime_str("application/json")?;
    Ok(Form::new()
        .part("product", product)
        .part("imageFile", image.to_part()?))
}

fn truncate_body(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, AdminError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %truncate_body(body, LOG_BODY_LIMIT),
            "Failed to parse product API response"
        );
        AdminError::Parse(e)
    })
}
