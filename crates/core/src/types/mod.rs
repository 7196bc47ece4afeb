//! Core types for Cartlane.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{
    CHECKOUT_PATH, Cart, CartCost, CartLine, CartMerchandise, CartMerchandiseProduct,
};
pub use catalog::{
    CatalogItem, Collection, DEFAULT_VARIANT_TITLE, Image, PLACEHOLDER_IMAGE_URL, PriceRange,
    ProductVariant,
};
pub use id::*;
pub use price::{CurrencyCode, Money};
pub use product::RemoteProduct;
