//! Cartlane Core - Shared types library.
//!
//! This crate provides common types used across all Cartlane components:
//! - `storefront` - Catalog adapter and the client-local cart
//! - `admin` - Product management against the product API
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients, no persistence. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Ids, money, remote product records, catalog items and carts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
