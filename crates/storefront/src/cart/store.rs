//! Persistence of the single local cart.

use std::sync::Arc;

use cartlane_core::Cart;
use chrono::Utc;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Key the cart document is stored under.
pub const CART_STORAGE_KEY: &str = "cartlane_cart";

/// Id of the in-memory cart handed out when there is no persistence.
pub const EPHEMERAL_CART_ID: &str = "ephemeral-cart";

/// Loads and saves the cart document.
///
/// With no backend every load yields a fresh ephemeral cart and saves are
/// dropped.
#[derive(Clone, Default)]
pub struct CartStore {
    backend: Option<Arc<dyn KeyValueStore>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("persistent", &self.is_persistent())
            .finish()
    }
}

impl CartStore {
    /// Store persisting through `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Store with no persistence.
    #[must_use]
    pub const fn ephemeral() -> Self {
        Self { backend: None }
    }

    /// Whether carts survive between loads.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.backend.is_some()
    }

    /// Load the stored cart, creating and persisting an empty one if none
    /// exists.
    ///
    /// A document that fails to parse is replaced with a fresh cart. A backend
    /// that cannot be read is treated like no backend for this call.
    #[must_use]
    pub fn load_cart(&self) -> Cart {
        let Some(backend) = self.backend.as_deref() else {
            return Cart::empty(EPHEMERAL_CART_ID);
        };

        match backend.get(CART_STORAGE_KEY) {
            Ok(Some(stored)) => match serde_json::from_str::<Cart>(&stored) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(error = %e, "Stored cart is corrupt, starting a new one");
                    self.create_and_save()
                }
            },
            Ok(None) => self.create_and_save(),
            Err(e) => {
                warn!(error = %e, "Cart storage unreadable, using ephemeral cart");
                Cart::empty(EPHEMERAL_CART_ID)
            }
        }
    }

    /// Persist `cart`. Failures are logged; there is nothing to roll back.
    pub fn save_cart(&self, cart: &Cart) {
        if let Err(e) = self.try_save_cart(cart) {
            warn!(error = %e, cart_id = %cart.id, "Failed to save cart");
        }
    }

    /// Persist `cart`, reporting failures.
    ///
    /// Succeeds without writing when there is no backend.
    ///
    /// # Errors
    ///
    /// Returns error if the cart cannot be encoded or the backend rejects the
    /// write.
    pub fn try_save_cart(&self, cart: &Cart) -> Result<(), StorageError> {
        let Some(backend) = self.backend.as_deref() else {
            return Ok(());
        };
        let json = serde_json::to_string(cart)?;
        backend.set(CART_STORAGE_KEY, &json)?;
        debug!(cart_id = %cart.id, lines = cart.lines.len(), "Saved cart");
        Ok(())
    }

    /// Recompute derived totals in place.
    pub fn recompute_totals(cart: &mut Cart) {
        cart.recompute_totals();
    }

    fn create_and_save(&self) -> Cart {
        let cart = Cart::empty(new_cart_id());
        self.save_cart(&cart);
        cart
    }
}

fn new_cart_id() -> String {
    format!("cart-{}", Utc::now().timestamp_millis())
}
