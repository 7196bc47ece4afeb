//! Local cart commands.
//!
//! # Environment Variables
//!
//! - `PRODUCT_API_URL` - Product API base URL
//! - `CART_STORAGE` - `file`, `memory` or `none`
//! - `CART_DIR` - Directory for the file backend

use std::sync::Arc;

use cartlane_core::Cart;
use cartlane_storefront::{
    AddLineRequest, CartService, CartStorageKind, CartStore, FileStore, MemoryStore,
    ProductApiClient, StorefrontConfig, UpdateLineRequest,
};

use super::print_json;

/// Build the cart service from configuration.
pub fn service(config: &StorefrontConfig) -> Result<CartService, Box<dyn std::error::Error>> {
    let client = ProductApiClient::new(&config.api_url)?;
    let store = match config.cart_storage {
        CartStorageKind::File => CartStore::new(Arc::new(FileStore::new(&config.cart_dir))),
        CartStorageKind::Memory => CartStore::new(Arc::new(MemoryStore::new())),
        CartStorageKind::None => {
            tracing::warn!("Cart persistence disabled, changes will not be kept");
            CartStore::ephemeral()
        }
    };
    Ok(CartService::new(client, store))
}

/// Print the cart.
pub async fn show(carts: &CartService) -> Result<(), Box<dyn std::error::Error>> {
    let cart = carts.create_cart().await;
    report(&cart)
}

/// Add units of a product.
pub async fn add(
    carts: &CartService,
    merchandise_id: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let before = carts.create_cart().await;
    let cart = carts
        .add_lines(&before.id, &[AddLineRequest::new(merchandise_id, quantity)])
        .await;

    if nothing_added(&before, &cart) {
        tracing::warn!(merchandise_id, "Nothing added to cart");
    }
    report(&cart)
}

/// Set the quantity of a line.
pub async fn update(
    carts: &CartService,
    line_id: &str,
    quantity: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = carts.create_cart().await;
    if current.line(line_id).is_none() {
        tracing::warn!(line_id, "No such cart line");
    }
    let cart = carts
        .update_lines(&current.id, &[UpdateLineRequest::new(line_id, quantity)])
        .await;
    report(&cart)
}

/// Remove lines.
pub async fn remove(carts: &CartService, line_ids: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let current = carts.create_cart().await;
    let cart = carts.remove_lines(&current.id, line_ids).await;
    report(&cart)
}

/// Whether an add left every line as it was.
fn nothing_added(before: &Cart, after: &Cart) -> bool {
    before.lines == after.lines
}

fn report(cart: &Cart) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        cart_id = %cart.id,
        items = cart.total_quantity(),
        total = %cart.cost.total_amount.display(),
        "Cart"
    );
    print_json(cart)?;
    Ok(())
}
