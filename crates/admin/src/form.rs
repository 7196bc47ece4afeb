//! Product form validation.
//!
//! [`ProductForm`] holds raw text input as typed by an operator;
//! [`ProductForm::validate`] turns it into a [`ProductDraft`] the product API
//! accepts, or every problem it found.

use std::str::FromStr;

use cartlane_core::RemoteProduct;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AdminError;

/// Date format the product API stores release dates in.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw product form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub stock_quantity: String,
    /// Blank means today.
    pub release_date: String,
    /// `None` means available.
    pub product_available: Option<bool>,
}

/// Validated product fields, serialized as the multipart `product` part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub brand: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub release_date: NaiveDate,
    pub product_available: bool,
    pub stock_quantity: i64,
}

impl ProductForm {
    /// Prefill a form from an existing product, for editing.
    #[must_use]
    pub fn from_product(product: &RemoteProduct) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            // Timestamps keep only their date part
            release_date: product
                .release_date
                .as_deref()
                .and_then(|date| date.split('T').next())
                .unwrap_or_default()
                .to_string(),
            product_available: Some(product.product_available),
        }
    }

    /// Validate the form; `today` fills in a blank release date.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` listing every invalid field.
    pub fn validate(&self, today: NaiveDate) -> Result<ProductDraft, AdminError> {
        let mut errors = Vec::new();

        let name = required(&self.name, "name", &mut errors);
        let brand = required(&self.brand, "brand", &mut errors);
        let description = required(&self.description, "description", &mut errors);
        let category = required(&self.category, "category", &mut errors);

        let price = match Decimal::from_str(self.price.trim()) {
            Ok(price) if price < Decimal::ZERO => {
                errors.push("price must not be negative".to_string());
                None
            }
            Ok(price) => Some(price),
            Err(_) => {
                errors.push(format!("price is not a number: '{}'", self.price.trim()));
                None
            }
        };

        let stock_quantity = match self.stock_quantity.trim().parse::<i64>() {
            Ok(stock) if stock < 0 => {
                errors.push("stock must not be negative".to_string());
                None
            }
            Ok(stock) => Some(stock),
            Err(_) => {
                errors.push(format!(
                    "stock is not a whole number: '{}'",
                    self.stock_quantity.trim()
                ));
                None
            }
        };

        let release_date = match self.release_date.trim() {
            "" => Some(today),
            raw => match NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(format!("release date must be YYYY-MM-DD: '{raw}'"));
                    None
                }
            },
        };

        match (price, stock_quantity, release_date) {
            (Some(price), Some(stock_quantity), Some(release_date)) if errors.is_empty() => {
                Ok(ProductDraft {
                    name,
                    description,
                    brand,
                    price,
                    category,
                    release_date,
                    product_available: self.product_available.unwrap_or(true),
                    stock_quantity,
                })
            }
            _ => Err(AdminError::Validation(errors)),
        }
    }
}

fn required(value: &str, field: &str, errors: &mut Vec<String>) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(format!("{field} is required"));
    }
    value.to_string()
}
