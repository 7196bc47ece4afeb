//! Cartlane storefront library.
//!
//! Reads the remote product API, reshapes its records into catalog items, and
//! keeps a single client-local cart in a key-value store.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartlane_storefront::{api::ProductApiClient, cart::{CartService, CartStore}};
//!
//! let client = ProductApiClient::new(&config.api_url)?;
//! let carts = CartService::new(client.clone(), CartStore::new(store));
//!
//! let cart = carts.add_lines("", &[AddLineRequest::new("7", 2)]).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod storage;

pub use api::{ApiError, ProductApiClient};
pub use cart::{AddLineRequest, CartService, CartStore, UpdateLineRequest};
pub use catalog::{Catalog, filter_items, map_to_catalog_item};
pub use config::{CartStorageKind, ConfigError, StorefrontConfig};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
