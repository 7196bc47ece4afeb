//! Storefront-facing catalog types.
//!
//! A [`CatalogItem`] is the commerce-platform shape the storefront renders:
//! price ranges, an image list and purchasable variants. It is built once at
//! the adapter boundary and treated as validated from then on.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::price::Money;

/// Image shown when the product API has no image for a product.
pub const PLACEHOLDER_IMAGE_URL: &str = "/placeholder.svg";

/// Title of the single variant synthesized for every product.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Variant";

// =============================================================================
// Image Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: String,
}

// =============================================================================
// Price Types
// =============================================================================

/// Price range for a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

impl PriceRange {
    /// A range collapsed onto a single price.
    #[must_use]
    pub const fn single(price: Money) -> Self {
        Self {
            min_variant_price: price,
            max_variant_price: price,
        }
    }
}

// =============================================================================
// Product Types
// =============================================================================

/// A purchasable variant of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant ID (pass to the cart as merchandise id).
    pub id: String,
    /// Variant title.
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Whether the variant can be added to a cart.
    pub available_for_sale: bool,
}

/// A product as presented by the storefront.
///
/// Built by the catalog adapter, which guarantees `images` and `variants`
/// are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// URL handle; the product API has no slugs, so this is the stringified id.
    pub handle: String,
    /// Brand name.
    pub vendor: String,
    /// Category name.
    pub product_type: String,
    pub available_for_sale: bool,
    /// Units in stock.
    pub total_inventory: i64,
    pub images: Vec<Image>,
    pub price_range: PriceRange,
    /// List price range; equal to `price_range` until the feed carries list prices.
    pub compare_at_price_range: PriceRange,
    pub variants: Vec<ProductVariant>,
}

impl CatalogItem {
    /// The variant added to a cart when the customer picks this item.
    #[must_use]
    pub fn first_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }

    /// The image shown in listings and cart lines.
    #[must_use]
    pub fn featured_image(&self) -> Option<&Image> {
        self.images.first()
    }

    /// Whole-percent discount of price against compare-at price.
    ///
    /// `None` unless the compare-at price is strictly higher.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let price = self.price_range.min_variant_price.amount;
        let compare_at = self.compare_at_price_range.min_variant_price.amount;

        if compare_at <= price || compare_at <= Decimal::ZERO {
            return None;
        }

        compare_at
            .checked_sub(price)?
            .checked_div(compare_at)?
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }

    /// Case-insensitive match of `needle` against title or description.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

// =============================================================================
// Collection Types
// =============================================================================

/// A group of catalog items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub description: String,
    pub image: Option<Image>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn item(price: &str, compare_at: &str) -> CatalogItem {
        let price = Money::usd(Decimal::from_str(price).unwrap());
        let compare_at = Money::usd(Decimal::from_str(compare_at).unwrap());
        CatalogItem {
            id: "1".to_string(),
            title: "Canvas Tote".to_string(),
            description: "Sturdy everyday bag".to_string(),
            handle: "1".to_string(),
            vendor: "Acme".to_string(),
            product_type: "Bags".to_string(),
            available_for_sale: true,
            total_inventory: 3,
            images: vec![Image {
                url: PLACEHOLDER_IMAGE_URL.to_string(),
                alt_text: "Canvas Tote".to_string(),
            }],
            price_range: PriceRange::single(price),
            compare_at_price_range: PriceRange::single(compare_at),
            variants: vec![ProductVariant {
                id: "1".to_string(),
                title: DEFAULT_VARIANT_TITLE.to_string(),
                price,
                available_for_sale: true,
            }],
        }
    }

    #[test]
    fn test_discount_none_when_prices_equal() {
        assert_eq!(item("19.99", "19.99").discount_percent(), None);
    }

    #[test]
    fn test_discount_none_when_compare_at_lower() {
        assert_eq!(item("20", "10").discount_percent(), None);
    }

    #[test]
    fn test_discount_rounds_to_whole_percent() {
        assert_eq!(item("75", "100").discount_percent(), Some(25));
        assert_eq!(item("2", "3").discount_percent(), Some(33));
    }

    #[test]
    fn test_discount_none_when_difference_overflows() {
        let item = item(
            "-50000000000000000000000000000",
            "50000000000000000000000000000",
        );
        assert_eq!(item.discount_percent(), None);
    }

    #[test]
    fn test_matches_title_or_description() {
        let item = item("1", "1");
        assert!(item.matches("tote"));
        assert!(item.matches("EVERYDAY"));
        assert!(item.matches(""));
        assert!(!item.matches("shoe"));
    }

    #[test]
    fn test_catalog_item_json_is_camel_case() {
        let json = serde_json::to_value(item("1", "1")).unwrap();
        assert!(json.get("priceRange").is_some());
        assert!(json.get("compareAtPriceRange").is_some());
        assert_eq!(json["variants"][0]["availableForSale"], true);
        assert_eq!(json["images"][0]["altText"], "Canvas Tote");
    }
}
