//! Cart operations.
//!
//! Every operation loads the cart, mutates it, recomputes totals, saves it and
//! returns the result. The cart id parameters exist for interface symmetry:
//! there is exactly one local cart.

use std::collections::HashSet;

use cartlane_core::{Cart, CartLine, CartMerchandise, CartMerchandiseProduct, CatalogItem};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{AddLineRequest, CartStore, UpdateLineRequest};
use crate::api::ProductApiClient;
use crate::catalog::{map_to_catalog_item, parse_handle};

/// Cart operations over the local cart store.
#[derive(Debug, Clone)]
pub struct CartService {
    client: ProductApiClient,
    store: CartStore,
}

impl CartService {
    #[must_use]
    pub const fn new(client: ProductApiClient, store: CartStore) -> Self {
        Self { client, store }
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// Return the local cart, creating it if needed.
    #[allow(clippy::unused_async)]
    pub async fn create_cart(&self) -> Cart {
        self.store.load_cart()
    }

    /// Return the local cart. `cart_id` is ignored.
    #[allow(clippy::unused_async)]
    pub async fn get_cart(&self, _cart_id: &str) -> Cart {
        self.store.load_cart()
    }

    /// Add lines, merging into existing lines with the same merchandise.
    ///
    /// Requests whose merchandise cannot be resolved, whose quantity is zero,
    /// or that would push the cart total past what a `Decimal` holds are
    /// skipped.
    #[instrument(skip(self, lines), fields(requests = lines.len()))]
    pub async fn add_lines(&self, _cart_id: &str, lines: &[AddLineRequest]) -> Cart {
        let mut cart = self.store.load_cart();

        for request in lines {
            if request.quantity == 0 {
                debug!(merchandise_id = %request.merchandise_id, "Skipping zero quantity");
                continue;
            }

            let Some(item) = self.resolve(&request.merchandise_id).await else {
                continue;
            };
            let Some(merchandise) = merchandise_for(&item) else {
                continue;
            };

            let existing = cart
                .lines
                .iter()
                .enumerate()
                .find(|(_, line)| line.merchandise.id == merchandise.id)
                .map(|(index, line)| (index, line.quantity));

            let applied = match existing {
                Some((index, current)) => set_quantity_within_bounds(
                    &mut cart,
                    index,
                    current.saturating_add(request.quantity),
                ),
                None => {
                    cart.lines.push(CartLine {
                        id: new_line_id(),
                        quantity: request.quantity,
                        merchandise,
                    });
                    let fits = cart.checked_subtotal().is_some();
                    if !fits {
                        cart.lines.pop();
                    }
                    fits
                }
            };

            if !applied {
                warn!(
                    merchandise_id = %request.merchandise_id,
                    quantity = request.quantity,
                    "Cart total would overflow, request skipped"
                );
            }
        }

        self.commit(cart)
    }

    /// Set line quantities by line id; lines left at zero or below are removed.
    ///
    /// Updates naming unknown lines are ignored, as are updates that would
    /// push the cart total past what a `Decimal` holds.
    #[instrument(skip(self, updates), fields(updates = updates.len()))]
    #[allow(clippy::unused_async)]
    pub async fn update_lines(&self, _cart_id: &str, updates: &[UpdateLineRequest]) -> Cart {
        let mut cart = self.store.load_cart();

        for update in updates {
            let Some(index) = cart.lines.iter().position(|l| l.id == update.line_id) else {
                continue;
            };
            let quantity = u32::try_from(update.quantity.max(0)).unwrap_or(u32::MAX);
            if !set_quantity_within_bounds(&mut cart, index, quantity) {
                warn!(
                    line_id = %update.line_id,
                    quantity = update.quantity,
                    "Cart total would overflow, update skipped"
                );
            }
        }
        cart.lines.retain(|line| line.quantity > 0);

        self.commit(cart)
    }

    /// Remove lines by id. Unknown ids are ignored.
    #[instrument(skip(self, line_ids), fields(line_ids = line_ids.len()))]
    #[allow(clippy::unused_async)]
    pub async fn remove_lines(&self, _cart_id: &str, line_ids: &[String]) -> Cart {
        let mut cart = self.store.load_cart();

        let remove: HashSet<&str> = line_ids.iter().map(String::as_str).collect();
        cart.lines.retain(|line| !remove.contains(line.id.as_str()));

        self.commit(cart)
    }

    async fn resolve(&self, merchandise_id: &str) -> Option<CatalogItem> {
        let Some(id) = parse_handle(merchandise_id) else {
            debug!(merchandise_id, "Merchandise id is not a product id");
            return None;
        };

        match self.client.get_product(id).await {
            Ok(Some(product)) => Some(map_to_catalog_item(&product, self.client.base_url())),
            Ok(None) => {
                debug!(product_id = %id, "Merchandise not found");
                None
            }
            Err(e) => {
                warn!(error = %e, product_id = %id, "Failed to resolve merchandise");
                None
            }
        }
    }

    fn commit(&self, mut cart: Cart) -> Cart {
        CartStore::recompute_totals(&mut cart);
        self.store.save_cart(&cart);
        cart
    }
}

/// Snapshot of an item's first variant for a cart line.
fn merchandise_for(item: &CatalogItem) -> Option<CartMerchandise> {
    let variant = item.first_variant()?;
    Some(CartMerchandise {
        id: variant.id.clone(),
        title: variant.title.clone(),
        price: variant.price,
        product: CartMerchandiseProduct {
            title: item.title.clone(),
            handle: item.handle.clone(),
            images: item.featured_image().cloned().into_iter().collect(),
        },
    })
}

/// Set a line's quantity, keeping the old one if the cart total would overflow.
fn set_quantity_within_bounds(cart: &mut Cart, index: usize, quantity: u32) -> bool {
    let Some(line) = cart.lines.get_mut(index) else {
        return false;
    };
    let previous = std::mem::replace(&mut line.quantity, quantity);

    if cart.checked_subtotal().is_some() {
        return true;
    }
    if let Some(line) = cart.lines.get_mut(index) {
        line.quantity = previous;
    }
    false
}

fn new_line_id() -> String {
    format!("line-{}", Uuid::new_v4())
}
