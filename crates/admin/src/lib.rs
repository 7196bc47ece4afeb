//! Cartlane admin library.
//!
//! Product back-office over the product API: list, create, edit and delete
//! products, with form validation and image uploads.
//!
//! # Security
//!
//! The product API has no authentication; anyone who can reach it can change
//! the catalog. Keep it on a private network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod upload;

pub use client::ProductAdminClient;
pub use config::AdminConfig;
pub use error::AdminError;
pub use form::{ProductDraft, ProductForm};
pub use upload::ImageUpload;
