//! Product management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a product
//! cartlane admin add --name Mug --brand Acme --description "Holds coffee" \
//!     --category Kitchen --price 12.50 --stock 10 --image mug.png
//!
//! # Change the price (the image must be sent again)
//! cartlane admin edit 7 --price 11.00 --image mug.png
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_PRODUCT_API_URL` - Product API base URL (falls back to `PRODUCT_API_URL`)

use std::path::Path;

use cartlane_admin::{AdminConfig, AdminError, ImageUpload, ProductAdminClient, ProductForm};
use cartlane_core::ProductId;
use chrono::Local;

use super::{CommandError, print_json};

/// Form fields given on the command line; `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct FieldOverrides {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub stock_quantity: Option<String>,
    pub release_date: Option<String>,
    pub product_available: Option<bool>,
}

impl FieldOverrides {
    /// Overlay the given fields onto `form`.
    pub fn apply(self, form: &mut ProductForm) {
        let overlay = |field: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *field = value;
            }
        };
        overlay(&mut form.name, self.name);
        overlay(&mut form.brand, self.brand);
        overlay(&mut form.description, self.description);
        overlay(&mut form.category, self.category);
        overlay(&mut form.price, self.price);
        overlay(&mut form.stock_quantity, self.stock_quantity);
        overlay(&mut form.release_date, self.release_date);
        if self.product_available.is_some() {
            form.product_available = self.product_available;
        }
    }
}

/// Build the admin client from configuration.
pub fn client() -> Result<ProductAdminClient, Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    Ok(ProductAdminClient::new(&config.api_url)?)
}

/// Print every product.
pub async fn list(client: &ProductAdminClient) -> Result<(), AdminError> {
    let products = client.list_products().await?;
    tracing::info!(count = products.len(), "Listed products");
    print_json(&products)?;
    Ok(())
}

/// Create a product from command-line fields.
pub async fn add(
    client: &ProductAdminClient,
    fields: FieldOverrides,
    image: &Path,
) -> Result<(), AdminError> {
    let mut form = ProductForm::default();
    fields.apply(&mut form);
    let draft = form.validate(Local::now().date_naive())?;
    let image = ImageUpload::from_path(image).await?;

    let product = client.create_product(&draft, &image).await?;
    print_json(&product)?;
    Ok(())
}

/// Edit a product, keeping fields that were not given.
pub async fn edit(
    client: &ProductAdminClient,
    id: &str,
    fields: FieldOverrides,
    image: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(id)?;

    // Checked before anything else so a missing image never costs a request
    let Some(image) = image else {
        return Err(AdminError::ImageRequired.into());
    };

    let existing = client
        .get_product(id)
        .await?
        .ok_or_else(|| CommandError::NotFound(format!("product {id}")))?;

    let mut form = ProductForm::from_product(&existing);
    fields.apply(&mut form);
    let draft = form.validate(Local::now().date_naive())?;
    let image = ImageUpload::from_path(image).await?;

    let message = client.update_product(id, &draft, Some(&image)).await?;
    tracing::info!(product_id = %id, %message, "Product updated");
    print_json(&serde_json::json!({ "id": id, "message": message }))?;
    Ok(())
}

/// Delete a product.
pub async fn delete(client: &ProductAdminClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(id)?;
    let message = client.delete_product(id).await?;
    print_json(&serde_json::json!({ "id": id, "message": message }))?;
    Ok(())
}

fn parse_id(raw: &str) -> Result<ProductId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_keep_unset_fields() {
        let mut form = ProductForm {
            name: "Mug".to_string(),
            price: "12.50".to_string(),
            product_available: Some(false),
            ..ProductForm::default()
        };

        FieldOverrides {
            price: Some("11.00".to_string()),
            ..FieldOverrides::default()
        }
        .apply(&mut form);

        assert_eq!(form.name, "Mug");
        assert_eq!(form.price, "11.00");
        assert_eq!(form.product_available, Some(false));
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("12").is_ok());
        assert!(matches!(parse_id("12x"), Err(CommandError::InvalidId(_))));
    }
}
