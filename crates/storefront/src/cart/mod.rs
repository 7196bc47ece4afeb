//! Client-local cart.
//!
//! - [`CartStore`] loads, saves and totals the single stored cart.
//! - [`CartService`] implements the cart operations on top of it, resolving
//!   merchandise through the product API before inserting lines.

mod service;
mod store;

pub use service::CartService;
pub use store::{CART_STORAGE_KEY, CartStore, EPHEMERAL_CART_ID};

/// Request to add `quantity` units of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLineRequest {
    /// Variant id, i.e. the stringified product id.
    pub merchandise_id: String,
    pub quantity: u32,
}

impl AddLineRequest {
    #[must_use]
    pub fn new(merchandise_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            merchandise_id: merchandise_id.into(),
            quantity,
        }
    }
}

/// Request to set the quantity of an existing line.
///
/// A quantity of zero or less removes the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLineRequest {
    pub line_id: String,
    pub quantity: i64,
}

impl UpdateLineRequest {
    #[must_use]
    pub fn new(line_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            line_id: line_id.into(),
            quantity,
        }
    }
}
