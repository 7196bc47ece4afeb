//! Integration tests for product administration.

#![allow(clippy::unwrap_used)]

use cartlane_admin::{AdminError, ImageUpload, ProductAdminClient, ProductForm};
use cartlane_core::ProductId;
use cartlane_integration_tests::{TestApi, product_json};
use chrono::NaiveDate;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

fn admin(api: &TestApi) -> ProductAdminClient {
    ProductAdminClient::new(&api.url()).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

async fn image_file(dir: &tempfile::TempDir) -> ImageUpload {
    let path = dir.path().join("mug.png");
    std::fs::write(&path, b"PNGBYTES").unwrap();
    ImageUpload::from_path(&path).await.unwrap()
}

#[tokio::test]
async fn test_create_from_form() {
    let api = TestApi::with_products(&[]).await;
    Mock::given(method("POST"))
        .and(path("/api/product"))
        .and(body_string_contains("\"name\":\"Mug\""))
        .and(body_string_contains("\"releaseDate\":\"2025-01-15\""))
        .and(body_string_contains("filename=\"mug.png\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(product_json(21, "Mug", 9.5)))
        .expect(1)
        .mount(&api.server)
        .await;

    let form = ProductForm {
        name: "Mug".to_string(),
        brand: "Acme".to_string(),
        description: "Holds coffee".to_string(),
        category: "Kitchen".to_string(),
        price: "9.50".to_string(),
        stock_quantity: "10".to_string(),
        ..ProductForm::default()
    };
    let draft = form.validate(today()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let created = admin(&api)
        .create_product(&draft, &image_file(&dir).await)
        .await
        .unwrap();
    assert_eq!(created.id, ProductId::new(21));
}

#[tokio::test]
async fn test_edit_without_image_makes_no_request() {
    let api = TestApi::with_products(&[product_json(5, "Mug", 9.5)]).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Updated"))
        .expect(0)
        .mount(&api.server)
        .await;

    let client = admin(&api);
    let existing = client.get_product(ProductId::new(5)).await.unwrap().unwrap();
    let draft = ProductForm::from_product(&existing).validate(today()).unwrap();

    let err = client
        .update_product(ProductId::new(5), &draft, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::ImageRequired));
}

#[tokio::test]
async fn test_edit_with_image_sends_prefilled_fields() {
    let api = TestApi::with_products(&[product_json(5, "Mug", 9.5)]).await;
    Mock::given(method("PUT"))
        .and(path("/api/product/5"))
        .and(body_string_contains("\"price\":11.0"))
        .and(body_string_contains("\"brand\":\"Acme\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("Updated"))
        .expect(1)
        .mount(&api.server)
        .await;

    let client = admin(&api);
    let existing = client.get_product(ProductId::new(5)).await.unwrap().unwrap();
    let mut form = ProductForm::from_product(&existing);
    form.price = "11.0".to_string();
    let draft = form.validate(today()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let message = client
        .update_product(ProductId::new(5), &draft, Some(&image_file(&dir).await))
        .await
        .unwrap();
    assert_eq!(message, "Updated");
}

#[tokio::test]
async fn test_delete_then_storefront_no_longer_finds_it() {
    let api = TestApi::with_products(&[]).await;
    Mock::given(method("DELETE"))
        .and(path("/api/product/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Deleted"))
        .expect(1)
        .mount(&api.server)
        .await;

    let message = admin(&api).delete_product(ProductId::new(5)).await.unwrap();
    assert_eq!(message, "Deleted");
    assert!(api.catalog().get_catalog_item("5").await.is_none());
}

#[tokio::test]
async fn test_invalid_form_never_reaches_api() {
    let form = ProductForm {
        name: String::new(),
        price: "-4".to_string(),
        stock_quantity: "many".to_string(),
        ..ProductForm::default()
    };

    let AdminError::Validation(errors) = form.validate(today()).unwrap_err() else {
        panic!("expected validation error");
    };
    assert!(errors.iter().any(|e| e.contains("name")));
    assert!(errors.iter().any(|e| e.contains("price")));
    assert!(errors.iter().any(|e| e.contains("stock")));
}
