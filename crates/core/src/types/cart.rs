//! Client-local cart document.
//!
//! The whole [`Cart`] is persisted as one JSON document, so every field here
//! is part of the stored format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Image;
use super::price::Money;

/// Where the storefront sends a customer to check out.
pub const CHECKOUT_PATH: &str = "/checkout";

/// Product snapshot stored on a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMerchandiseProduct {
    pub title: String,
    pub handle: String,
    pub images: Vec<Image>,
}

/// Variant snapshot stored on a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMerchandise {
    /// Variant id the line was added with.
    pub id: String,
    /// Variant title.
    pub title: String,
    /// Unit price at the time the line was added.
    pub price: Money,
    pub product: CartMerchandiseProduct,
}

/// One row in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line id, unique within the cart.
    pub id: String,
    /// Always positive while the line is in a cart.
    pub quantity: u32,
    pub merchandise: CartMerchandise,
}

impl CartLine {
    /// Unit price times quantity, or `None` when it does not fit a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.merchandise.price.checked_times(self.quantity)
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    pub total_amount: Money,
    pub subtotal_amount: Money,
    /// Always zero; there is no tax model.
    pub total_tax_amount: Money,
}

impl Default for CartCost {
    fn default() -> Self {
        Self {
            total_amount: Money::zero(),
            subtotal_amount: Money::zero(),
            total_tax_amount: Money::zero(),
        }
    }
}

/// A shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,
    pub cost: CartCost,
    pub checkout_url: String,
}

impl Cart {
    /// An empty cart with zeroed totals.
    #[must_use]
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lines: Vec::new(),
            cost: CartCost::default(),
            checkout_url: CHECKOUT_PATH.to_string(),
        }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Find a line by its id.
    #[must_use]
    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// Find the line holding a given merchandise id.
    #[must_use]
    pub fn line_for_merchandise(&self, merchandise_id: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.merchandise.id == merchandise_id)
    }

    /// Sum of all line totals, or `None` if any step overflows.
    #[must_use]
    pub fn checked_subtotal(&self) -> Option<Decimal> {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total()?))
    }

    /// Recompute `total_amount` and `subtotal_amount` from the lines.
    ///
    /// This is the only place cart money arithmetic happens. Totals carry
    /// two fraction digits and tax stays at zero. A sum too large for a
    /// `Decimal` saturates at [`Decimal::MAX`]. Applying it twice yields the
    /// same cost.
    pub fn recompute_totals(&mut self) -> &mut Self {
        let sum = self.checked_subtotal().unwrap_or(Decimal::MAX);
        let total = Money::usd(sum).to_cents();

        self.cost.total_amount = total;
        self.cost.subtotal_amount = total;
        self.cost.total_tax_amount = Money::zero();
        self
    }
}
