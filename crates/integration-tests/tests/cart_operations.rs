//! Integration tests for cart operations.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use cartlane_core::Cart;
use cartlane_integration_tests::{TestApi, product_json};
use cartlane_storefront::{
    AddLineRequest, CartService, CartStore, FileStore, KeyValueStore, UpdateLineRequest,
    cart::{CART_STORAGE_KEY, EPHEMERAL_CART_ID},
};

async fn mug_api() -> TestApi {
    TestApi::with_products(&[
        product_json(7, "Mug", 19.99),
        product_json(8, "Saucer", 4.25),
    ])
    .await
}

// ============================================================================
// Adding
// ============================================================================

#[tokio::test]
async fn test_add_two_mugs_totals_39_98() {
    let api = mug_api().await;
    let (carts, _) = api.memory_carts();

    let cart = carts.create_cart().await;
    let cart = carts
        .add_lines(&cart.id, &[AddLineRequest::new("7", 2)])
        .await;

    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].quantity, 2);
    assert_eq!(cart.cost.total_amount.amount.to_string(), "39.98");
    assert_eq!(cart.cost.subtotal_amount.amount.to_string(), "39.98");
    assert_eq!(cart.cost.total_tax_amount.amount.to_string(), "0.00");
}

#[tokio::test]
async fn test_repeat_add_merges_to_five() {
    let api = mug_api().await;
    let (carts, _) = api.memory_carts();

    carts.add_lines("", &[AddLineRequest::new("7", 2)]).await;
    let cart = carts.add_lines("", &[AddLineRequest::new("7", 3)]).await;

    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].quantity, 5);
    assert_eq!(cart.cost.total_amount.amount.to_string(), "99.95");
}

#[tokio::test]
async fn test_unknown_product_leaves_cart_unchanged() {
    let api = mug_api().await;
    let (carts, _) = api.memory_carts();

    let before = carts.add_lines("", &[AddLineRequest::new("8", 1)]).await;
    let after = carts.add_lines("", &[AddLineRequest::new("999", 1)]).await;

    assert_eq!(after.lines, before.lines);
    assert_eq!(after.cost, before.cost);
}

#[tokio::test]
async fn test_batch_skips_unresolvable_entries() {
    let api = mug_api().await;
    let (carts, _) = api.memory_carts();

    let cart = carts
        .add_lines(
            "",
            &[
                AddLineRequest::new("7", 1),
                AddLineRequest::new("not-an-id", 4),
                AddLineRequest::new("999", 2),
                AddLineRequest::new("8", 2),
            ],
        )
        .await;

    let ids: Vec<_> = cart.lines.iter().map(|l| l.merchandise.id.as_str()).collect();
    assert_eq!(ids, ["7", "8"]);
    assert_eq!(cart.cost.total_amount.amount.to_string(), "28.49");
}

// ============================================================================
// Updating and removing
// ============================================================================

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let api = mug_api().await;
    let (carts, _) = api.memory_carts();

    let cart = carts
        .add_lines("", &[AddLineRequest::new("7", 1), AddLineRequest::new("8", 1)])
        .await;
    let mug_line = cart.line_for_merchandise("7").unwrap().id.clone();

    let cart = carts
        .update_lines("", &[UpdateLineRequest::new(mug_line, 0)])
        .await;

    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].merchandise.id, "8");
    assert_eq!(cart.cost.total_amount.amount.to_string(), "4.25");
}

#[tokio::test]
async fn test_update_positive_keeps_line_count() {
    let api = mug_api().await;
    let (carts, _) = api.memory_carts();

    let cart = carts.add_lines("", &[AddLineRequest::new("8", 1)]).await;
    let line = cart.lines[0].id.clone();

    let cart = carts
        .update_lines("", &[UpdateLineRequest::new(line, 4)])
        .await;
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.cost.total_amount.amount.to_string(), "17.00");
}

#[tokio::test]
async fn test_remove_drops_exactly_named_lines() {
    let api = mug_api().await;
    let (carts, _) = api.memory_carts();

    let cart = carts
        .add_lines("", &[AddLineRequest::new("7", 1), AddLineRequest::new("8", 3)])
        .await;
    let mug_line = cart.line_for_merchandise("7").unwrap().id.clone();
    let saucer = cart.line_for_merchandise("8").unwrap().clone();

    let cart = carts
        .remove_lines("", &[mug_line, "line-unknown".to_string()])
        .await;

    assert_eq!(cart.lines, vec![saucer]);
    assert_eq!(cart.cost.total_amount.amount.to_string(), "12.75");
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_file_backend_survives_new_service() {
    let api = mug_api().await;
    let dir = tempfile::tempdir().unwrap();

    let first = api.carts(Arc::new(FileStore::new(dir.path())));
    let added = first.add_lines("", &[AddLineRequest::new("7", 2)]).await;

    let second = api.carts(Arc::new(FileStore::new(dir.path())));
    let loaded = second.get_cart(&added.id).await;

    assert_eq!(loaded, added);
}

#[tokio::test]
async fn test_stored_document_round_trips() {
    let api = mug_api().await;
    let (carts, backend) = api.memory_carts();

    let cart = carts.add_lines("", &[AddLineRequest::new("8", 3)]).await;

    let stored = backend.get(CART_STORAGE_KEY).unwrap().unwrap();
    let decoded: Cart = serde_json::from_str(&stored).unwrap();
    assert_eq!(decoded, cart);
    assert_eq!(serde_json::to_string(&decoded).unwrap(), stored);
}

#[tokio::test]
async fn test_ephemeral_store_adds_without_persisting() {
    let api = mug_api().await;
    let carts = CartService::new(api.client(), CartStore::ephemeral());

    let cart = carts.add_lines("", &[AddLineRequest::new("7", 1)]).await;
    assert_eq!(cart.id, EPHEMERAL_CART_ID);
    assert_eq!(cart.lines.len(), 1);

    let reloaded = carts.get_cart("").await;
    assert_eq!(reloaded.id, EPHEMERAL_CART_ID);
    assert!(reloaded.is_empty());
}

#[tokio::test]
async fn test_corrupt_document_is_replaced() {
    let api = mug_api().await;
    let (carts, backend) = api.memory_carts();
    backend.set(CART_STORAGE_KEY, "[1, 2, 3]").unwrap();

    let cart = carts.get_cart("").await;
    assert!(cart.id.starts_with("cart-"));
    assert!(cart.is_empty());

    let cart = carts.add_lines(&cart.id, &[AddLineRequest::new("8", 1)]).await;
    assert_eq!(cart.lines.len(), 1);
}
