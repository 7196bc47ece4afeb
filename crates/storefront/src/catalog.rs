//! Catalog adapter.
//!
//! Reshapes product API records into [`CatalogItem`]s and exposes a fail-soft
//! [`Catalog`] service: transport failures are logged and surface as empty or
//! absent results, never as errors.

use cartlane_core::{
    CatalogItem, Collection, DEFAULT_VARIANT_TITLE, Image, Money, PLACEHOLDER_IMAGE_URL,
    PriceRange, ProductId, ProductVariant, RemoteProduct,
};
use tracing::{instrument, warn};
use url::Url;

use crate::api::{ProductApiClient, image_url};

/// Number of related items shown when the caller has no preference.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Handle of the synthesized collection holding every product.
pub const ALL_PRODUCTS_HANDLE: &str = "all";

// =============================================================================
// Conversions
// =============================================================================

/// Build a catalog item from a product API record.
///
/// Total: every record maps. The item always carries one image (the
/// placeholder when the API has none) and exactly one variant.
#[must_use]
pub fn map_to_catalog_item(remote: &RemoteProduct, api_base: &Url) -> CatalogItem {
    let id = remote.id.to_string();
    let price = Money::usd(remote.price);
    let price_range = PriceRange::single(price);

    let featured_url = if remote.has_image() {
        image_url(api_base, remote.id)
    } else {
        PLACEHOLDER_IMAGE_URL.to_string()
    };

    CatalogItem {
        id: id.clone(),
        title: remote.name.clone(),
        description: remote.description.clone(),
        handle: id.clone(),
        vendor: remote.brand.clone(),
        product_type: remote.category.clone(),
        available_for_sale: remote.product_available,
        total_inventory: remote.stock_quantity,
        images: vec![Image {
            url: featured_url,
            alt_text: remote.name.clone(),
        }],
        price_range,
        compare_at_price_range: price_range,
        variants: vec![ProductVariant {
            id,
            title: DEFAULT_VARIANT_TITLE.to_string(),
            price,
            available_for_sale: remote.product_available,
        }],
    }
}

/// Parse a storefront handle back into a product id.
///
/// Handles are stringified ids; anything else is not a product.
#[must_use]
pub fn parse_handle(handle: &str) -> Option<ProductId> {
    handle.parse().ok()
}

/// Keep the items whose title or description contains `term`, ignoring case.
///
/// An empty or blank term keeps everything.
#[must_use]
pub fn filter_items(items: Vec<CatalogItem>, term: &str) -> Vec<CatalogItem> {
    let term = term.trim();
    if term.is_empty() {
        return items;
    }
    items.into_iter().filter(|item| item.matches(term)).collect()
}

/// The single collection the storefront offers.
#[must_use]
pub fn all_products_collection() -> Collection {
    Collection {
        id: ALL_PRODUCTS_HANDLE.to_string(),
        title: "All Products".to_string(),
        handle: ALL_PRODUCTS_HANDLE.to_string(),
        description: "Every product in the catalog".to_string(),
        image: Some(Image {
            url: PLACEHOLDER_IMAGE_URL.to_string(),
            alt_text: "All Products".to_string(),
        }),
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Fail-soft read access to the catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    client: ProductApiClient,
}

impl Catalog {
    /// Create a catalog backed by the given API client.
    #[must_use]
    pub const fn new(client: ProductApiClient) -> Self {
        Self { client }
    }

    /// Underlying API client.
    #[must_use]
    pub const fn client(&self) -> &ProductApiClient {
        &self.client
    }

    /// Every catalog item; empty if the API cannot be reached.
    #[instrument(skip(self))]
    pub async fn get_catalog_list(&self) -> Vec<CatalogItem> {
        match self.client.list_products().await {
            Ok(products) => self.map_all(&products),
            Err(e) => {
                warn!(error = %e, "Failed to fetch product list");
                Vec::new()
            }
        }
    }

    /// One catalog item by handle.
    ///
    /// `None` when the handle is not a product id, the product does not
    /// exist, or the API cannot be reached.
    #[instrument(skip(self))]
    pub async fn get_catalog_item(&self, handle: &str) -> Option<CatalogItem> {
        let Some(id) = parse_handle(handle) else {
            warn!(handle, "Handle is not a product id");
            return None;
        };

        match self.client.get_product(id).await {
            Ok(product) => product.map(|p| map_to_catalog_item(&p, self.client.base_url())),
            Err(e) => {
                warn!(error = %e, product_id = %id, "Failed to fetch product");
                None
            }
        }
    }

    /// Catalog items matching a keyword; empty if the API cannot be reached.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str) -> Vec<CatalogItem> {
        match self.client.search_products(keyword).await {
            Ok(products) => self.map_all(&products),
            Err(e) => {
                warn!(error = %e, "Product search failed");
                Vec::new()
            }
        }
    }

    /// Collections available in the storefront.
    #[allow(clippy::unused_async)]
    pub async fn get_collections(&self) -> Vec<Collection> {
        vec![all_products_collection()]
    }

    /// Up to `limit` other items to show alongside `item`.
    #[instrument(skip(self, item), fields(handle = %item.handle))]
    pub async fn related_items(&self, item: &CatalogItem, limit: usize) -> Vec<CatalogItem> {
        self.get_catalog_list()
            .await
            .into_iter()
            .filter(|other| other.id != item.id)
            .take(limit)
            .collect()
    }

    fn map_all(&self, products: &[RemoteProduct]) -> Vec<CatalogItem> {
        products
            .iter()
            .map(|p| map_to_catalog_item(p, self.client.base_url()))
            .collect()
    }
}
