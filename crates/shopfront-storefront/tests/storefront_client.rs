//! Integration tests for `StorefrontClient` using wiremock HTTP mocks.

use serde_json::json;
use shopfront_storefront::{LineInput, StorefrontClient, StorefrontError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/api/2025-01/graphql.json";

fn test_client(server: &MockServer) -> StorefrontClient {
    let endpoint = format!("{}{GRAPHQL_PATH}", server.uri());
    StorefrontClient::with_endpoint(&endpoint, "test-token", 30, "shopfront-test/0.1")
        .expect("client construction should not fail")
        .with_store_host("shop.example.com")
}

fn money(amount: &str) -> serde_json::Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

fn product_node(handle: &str, title: &str) -> serde_json::Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": title,
        "availableForSale": true,
        "images": { "edges": [] },
        "priceRange": { "minVariantPrice": money("24.00") },
        "variants": { "edges": [ { "node": {
            "id": format!("gid://shopify/ProductVariant/{handle}"),
            "title": "Default Title",
            "availableForSale": true,
            "price": money("24.00")
        } } ] }
    })
}

fn cart_body(root: &str, quantity: u32) -> serde_json::Value {
    let payload = json!({
        "cart": {
            "id": "gid://shopify/Cart/abc",
            "checkoutUrl": "https://shop.example.com/checkouts/abc",
            "totalQuantity": quantity,
            "cost": {
                "subtotalAmount": money("48.00"),
                "totalAmount": money("51.84"),
                "totalTaxAmount": money("3.84")
            },
            "discountCodes": [],
            "lines": { "edges": [ { "node": {
                "id": "gid://shopify/CartLine/1",
                "quantity": quantity,
                "merchandise": {
                    "id": "gid://shopify/ProductVariant/1",
                    "title": "Default Title",
                    "price": money("24.00"),
                    "product": { "id": "gid://shopify/Product/1", "title": "Trail Tee", "handle": "trail-tee" }
                }
            } } ] }
        },
        "userErrors": []
    });
    let mut data = serde_json::Map::new();
    data.insert(root.to_string(), payload);
    json!({ "data": data })
}

#[tokio::test]
async fn products_sends_token_and_adapts_nodes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Storefront-Access-Token", "test-token"))
        .and(body_partial_json(json!({ "variables": { "first": 12 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "edges": [
                { "node": product_node("trail-tee", "Trail Tee") },
                { "node": product_node("starter-kit", "Starter Kit") }
            ] } }
        })))
        .mount(&server)
        .await;

    let products = test_client(&server)
        .products(12, None)
        .await
        .expect("should list products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].handle, "trail-tee");
    assert!(products[0].images[0].is_placeholder());
    assert!(products[1].badge.is_some());
}

#[tokio::test]
async fn product_by_handle_returns_none_for_null() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "handle": "missing" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": null }
        })))
        .mount(&server)
        .await;

    let product = test_client(&server)
        .product_by_handle("missing")
        .await
        .expect("null product is not an error");

    assert!(product.is_none());
}

#[tokio::test]
async fn graphql_errors_become_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [ { "message": "Throttled" }, { "message": "Field 'x' doesn't exist" } ]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).products(10, None).await.unwrap_err();

    match err {
        StorefrontError::Graphql { messages } => assert_eq!(messages.len(), 2),
        other => panic!("expected Graphql error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = test_client(&server).collections(10).await.unwrap_err();

    assert!(
        matches!(err, StorefrontError::UnexpectedStatus { status: 401, .. }),
        "expected UnexpectedStatus, got: {err:?}"
    );
}

#[tokio::test]
async fn collection_products_returns_collection_and_products() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "collection": {
                "id": "gid://shopify/Collection/1",
                "handle": "kits",
                "title": "Kits",
                "products": { "edges": [ { "node": product_node("base-camp", "Base Camp") } ] }
            } }
        })))
        .mount(&server)
        .await;

    let (collection, products) = test_client(&server)
        .collection_products("kits", 24)
        .await
        .expect("request should succeed")
        .expect("collection exists");

    assert_eq!(collection.title, "Kits");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].handle, "base-camp");
}

#[tokio::test]
async fn menu_links_to_store_become_relative() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "menu": {
                "handle": "main-menu",
                "title": "Main",
                "items": [ { "title": "All", "url": "https://shop.example.com/collections/all", "items": [] } ]
            } }
        })))
        .mount(&server)
        .await;

    let menu = test_client(&server)
        .menu("main-menu")
        .await
        .unwrap()
        .expect("menu exists");

    assert_eq!(menu.items[0].url, "/collections/all");
}

#[tokio::test]
async fn add_lines_returns_cart_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": {
            "cartId": "gid://shopify/Cart/abc",
            "lines": [ { "merchandiseId": "gid://shopify/ProductVariant/1", "quantity": 2 } ]
        } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_body("cartLinesAdd", 2)))
        .mount(&server)
        .await;

    let cart = test_client(&server)
        .add_lines(
            "gid://shopify/Cart/abc",
            &[LineInput {
                merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
                quantity: 2,
            }],
        )
        .await
        .expect("add should succeed");

    assert_eq!(cart.total_quantity, 2);
    assert_eq!(cart.cost.total.display(), "$51.84");
    assert_eq!(cart.lines[0].merchandise.product_title, "Trail Tee");
}

#[tokio::test]
async fn user_errors_are_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cartLinesAdd": {
                "cart": null,
                "userErrors": [ { "field": ["lines"], "message": "Merchandise is sold out", "code": "MERCHANDISE_NOT_ENOUGH_STOCK" } ]
            } }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .add_lines(
            "gid://shopify/Cart/abc",
            &[LineInput {
                merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();

    match err {
        StorefrontError::UserErrors { messages } => {
            assert_eq!(messages, vec!["Merchandise is sold out".to_string()]);
        }
        other => panic!("expected UserErrors, got: {other:?}"),
    }
}

#[tokio::test]
async fn missing_line_user_error_maps_to_line_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cartLinesRemove": {
                "cart": null,
                "userErrors": [ { "field": ["lineIds"], "message": "The merchandise line with id gid://shopify/CartLine/9 does not exist.", "code": "INVALID_MERCHANDISE_LINE" } ]
            } }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .remove_lines(
            "gid://shopify/Cart/abc",
            &["gid://shopify/CartLine/9".to_string()],
        )
        .await
        .unwrap_err();

    match err {
        StorefrontError::LineNotFound { line_id } => {
            assert_eq!(line_id, "gid://shopify/CartLine/9");
        }
        other => panic!("expected LineNotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn null_cart_payload_maps_to_cart_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cartDiscountCodesUpdate": { "cart": null, "userErrors": [] } }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .update_discount_codes("gid://shopify/Cart/gone", &["SPRING15".to_string()])
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_cart_returns_none_when_expired() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "cart": null } })))
        .mount(&server)
        .await;

    let cart = test_client(&server)
        .get_cart("gid://shopify/Cart/gone")
        .await
        .expect("expired cart is not an error");

    assert!(cart.is_none());
}
