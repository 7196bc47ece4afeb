//! Catalog browsing commands.
//!
//! # Environment Variables
//!
//! - `PRODUCT_API_URL` - Product API base URL

use cartlane_storefront::{Catalog, ProductApiClient, StorefrontConfig, filter_items};

use super::{CommandError, print_json};

/// Build the catalog service from configuration.
pub fn catalog(config: &StorefrontConfig) -> Result<Catalog, Box<dyn std::error::Error>> {
    Ok(Catalog::new(ProductApiClient::new(&config.api_url)?))
}

/// Print every catalog item, optionally filtered.
pub async fn list(catalog: &Catalog, filter: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let items = catalog.get_catalog_list().await;
    let items = match filter {
        Some(term) => filter_items(items, term),
        None => items,
    };
    tracing::info!(count = items.len(), "Listed catalog items");
    print_json(&items)?;
    Ok(())
}

/// Print one catalog item.
pub async fn show(catalog: &Catalog, handle: &str) -> Result<(), Box<dyn std::error::Error>> {
    let item = catalog
        .get_catalog_item(handle)
        .await
        .ok_or_else(|| CommandError::NotFound(format!("product '{handle}'")))?;
    print_json(&item)?;
    Ok(())
}

/// Print search results.
pub async fn search(catalog: &Catalog, keyword: &str) -> Result<(), Box<dyn std::error::Error>> {
    let items = catalog.search(keyword).await;
    tracing::info!(count = items.len(), keyword, "Search complete");
    print_json(&items)?;
    Ok(())
}

/// Print items related to a product.
pub async fn related(
    catalog: &Catalog,
    handle: &str,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let item = catalog
        .get_catalog_item(handle)
        .await
        .ok_or_else(|| CommandError::NotFound(format!("product '{handle}'")))?;
    let related = catalog.related_items(&item, limit).await;
    print_json(&related)?;
    Ok(())
}

/// Print the collections.
pub async fn collections(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&catalog.get_collections().await)?;
    Ok(())
}
