use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use lettre::transport::stub::AsyncStubTransport;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::contact::{validate, ContactRequest};
use super::*;

const GRAPHQL_PATH: &str = "/api/2025-01/graphql.json";
const CART_ID: &str = "gid://shopify/Cart/abc";

const SEO_MAP: &str = r#"{
    "default": { "title": "Shopfront", "description": "Outdoor gear." },
    "/blog": { "title": "Journal" }
}"#;

fn storefront(server: &MockServer) -> StorefrontClient {
    let endpoint = format!("{}{GRAPHQL_PATH}", server.uri());
    StorefrontClient::with_endpoint(&endpoint, "test-token", 5, "shopfront-test/0.1")
        .expect("client construction should not fail")
}

fn test_state(server: &MockServer, blog_dir: &Path) -> AppState {
    AppState {
        storefront: Arc::new(storefront(server)),
        admin: None,
        contact: None,
        content: Arc::new(ContentSettings {
            blog_dir: blog_dir.to_path_buf(),
            seo: SeoMap::from_json(SEO_MAP).expect("seo map"),
            site_url: "https://shop.example.com".to_string(),
        }),
    }
}

fn app(state: AppState) -> Router {
    build_app(state, default_rate_limit_state())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn send_json(method: &str, uri: &str, cart_id: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(id) = cart_id {
        builder = builder.header(CART_ID_HEADER, id);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

fn money(amount: &str) -> Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

fn product_node(handle: &str, price: &str, compare_at: Option<&str>) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": handle.replace('-', " "),
        "availableForSale": true,
        "images": { "edges": [] },
        "priceRange": { "minVariantPrice": money(price) },
        "variants": { "edges": [ { "node": {
            "id": format!("gid://shopify/ProductVariant/{handle}"),
            "title": "Default Title",
            "availableForSale": true,
            "price": money(price),
            "compareAtPrice": compare_at.map(money)
        } } ] }
    })
}

fn cart_json(quantity: u32) -> Value {
    json!({
        "id": CART_ID,
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
                "compareAtPrice": money("30.00"),
                "product": { "id": "gid://shopify/Product/1", "title": "Trail Tee", "handle": "trail-tee" }
            }
        } } ] }
    })
}

fn mutation_body(root: &str, cart: Value) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(root.to_string(), json!({ "cart": cart, "userErrors": [] }));
    json!({ "data": data })
}

#[test]
fn normalize_limit_applies_defaults_and_bounds() {
    assert_eq!(normalize_limit(None), 24);
    assert_eq!(normalize_limit(Some(0)), 1);
    assert_eq!(normalize_limit(Some(1_000)), 100);
    assert_eq!(normalize_limit(Some(12)), 12);
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("validation_error", StatusCode::BAD_REQUEST),
        ("not_found", StatusCode::NOT_FOUND),
        ("upstream_error", StatusCode::BAD_GATEWAY),
        ("not_configured", StatusCode::SERVICE_UNAVAILABLE),
        ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, status) in cases {
        let response = ApiError::new("req-1", code, "message").into_response();
        assert_eq!(response.status(), status, "code {code}");
    }
}

#[test]
fn user_errors_map_to_validation_error() {
    let error = StorefrontError::UserErrors {
        messages: vec!["Quantity too high".to_string(), "Sold out".to_string()],
    };
    let api_error = map_storefront_error("req-1".to_string(), &error);
    assert_eq!(api_error.error.code, "validation_error");
    assert_eq!(api_error.error.message, "Quantity too high; Sold out");
}

#[test]
fn contact_validation_rejects_bad_input() {
    let request = |name: &str, email: &str, message: &str| ContactRequest {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        subject: Some("  ".to_string()),
        message: message.to_string(),
    };

    assert!(validate(&request("", "ada@example.com", "hi")).is_err());
    assert!(validate(&request("Ada", "ada@example", "hi")).is_err());
    assert!(validate(&request("Ada", "ada @example.com", "hi")).is_err());
    assert!(validate(&request("Ada", "@example.com", "hi")).is_err());
    assert!(validate(&request("Ada", "ada@example.com", "   ")).is_err());
    assert!(validate(&request("Ada", "ada@example.com", &"x".repeat(5_001))).is_err());

    let message = validate(&request(" Ada ", "ada@example.com", " Hello ")).expect("valid");
    assert_eq!(message.name, "Ada");
    assert_eq!(message.message, "Hello");
    assert_eq!(message.subject, None);
}

#[tokio::test]
async fn health_reports_optional_features() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/health"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["discounts"], "disabled");
    assert_eq!(json["data"]["contact"], "disabled");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn list_products_includes_sale_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "first": 12 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "edges": [
                { "node": product_node("trail-tee", "24.00", Some("30.00")) }
            ] } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/products?limit=12"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let product = &json["data"][0];
    assert_eq!(product["handle"], "trail-tee");
    assert_eq!(product["sale"]["isOnSale"], true);
    assert_eq!(product["sale"]["percentOff"], 20);
    assert_eq!(product["sale"]["saveAmountText"], "$6.00");
}

#[tokio::test]
async fn list_products_degrades_to_empty_on_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/products"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn get_product_returns_404_for_unknown_handle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": null }
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/products/nope"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn get_product_reports_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/products/trail-tee"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn unknown_collection_degrades_to_empty_grid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "collection": null }
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/collections/nope/products"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["collection"].is_null());
    assert_eq!(json["data"]["products"], json!([]));
}

#[tokio::test]
async fn blank_search_skips_the_storefront() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/search?q=%20%20"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn get_cart_without_id_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/cart"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["cart_id"].is_null());
    assert!(json["data"]["cart"].is_null());
}

#[tokio::test]
async fn get_cart_purges_expired_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "cartId": CART_ID } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cart": null }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let request = Request::builder()
        .uri("/api/v1/cart")
        .header(CART_ID_HEADER, CART_ID)
        .body(Body::empty())
        .expect("request");
    let response = app(test_state(&server, dir.path()))
        .oneshot(request)
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["cart_id"].is_null());
    assert!(json["data"]["cart"].is_null());
}

#[tokio::test]
async fn add_line_creates_cart_and_returns_its_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("cartCreate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mutation_body(
            "cartCreate",
            json!({
                "id": CART_ID,
                "checkoutUrl": "https://shop.example.com/checkouts/abc",
                "totalQuantity": 0,
                "lines": { "edges": [] }
            }),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("cartLinesAdd"))
        .and(body_partial_json(json!({ "variables": { "cartId": CART_ID } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mutation_body("cartLinesAdd", cart_json(2))),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(send_json(
            "POST",
            "/api/v1/cart/lines",
            None,
            &json!({ "merchandise_id": "gid://shopify/ProductVariant/1", "quantity": 2 }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["cart_id"], CART_ID);
    assert_eq!(json["data"]["cart"]["total_quantity"], 2);
    let line = &json["data"]["cart"]["lines"][0];
    assert_eq!(line["quantity"], 2);
    assert_eq!(line["sale"]["isOnSale"], true);
    assert_eq!(line["sale"]["compareAtText"], "$30.00");
}

#[tokio::test]
async fn merged_add_caps_line_quantity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query GetCart"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "cart": cart_json(99) } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("cartLinesUpdate"))
        .and(body_partial_json(json!({ "variables": {
            "cartId": CART_ID,
            "lines": [ { "id": "gid://shopify/CartLine/1", "quantity": 99 } ]
        } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mutation_body("cartLinesUpdate", cart_json(99))),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(send_json(
            "POST",
            "/api/v1/cart/lines",
            Some(CART_ID),
            &json!({ "merchandise_id": "gid://shopify/ProductVariant/1", "quantity": 99 }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["cart"]["lines"][0]["quantity"], 99);
}

#[tokio::test]
async fn add_line_rejects_blank_merchandise_id() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(send_json(
            "POST",
            "/api/v1/cart/lines",
            None,
            &json!({ "merchandise_id": "  " }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn update_line_without_cart_is_not_found() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(send_json(
            "PATCH",
            "/api/v1/cart/lines/gid%3A%2F%2Fshopify%2FCartLine%2F1",
            None,
            &json!({ "quantity": 3 }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_last_line_clears_cart_id() {
    let server = MockServer::start().await;
    let mut emptied = cart_json(0);
    emptied["lines"] = json!({ "edges": [] });
    Mock::given(method("POST"))
        .and(body_string_contains("cartLinesRemove"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mutation_body("cartLinesRemove", emptied)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/cart/lines/line-1")
        .header(CART_ID_HEADER, CART_ID)
        .body(Body::empty())
        .expect("request");
    let response = app(test_state(&server, dir.path()))
        .oneshot(request)
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["cart_id"].is_null());
    assert!(json["data"]["cart"].is_null());
}

#[tokio::test]
async fn discount_codes_without_cart_return_no_cart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(send_json(
            "POST",
            "/api/v1/cart/discount-codes",
            None,
            &json!({ "codes": ["SPRING15"] }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["cart"].is_null());
}

#[tokio::test]
async fn active_discounts_are_inactive_without_admin_client() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/discounts/active"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["active"], false);
    assert_eq!(json["data"]["discounts"], json!([]));
}

#[tokio::test]
async fn contact_without_smtp_is_not_configured() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(send_json(
            "POST",
            "/api/v1/contact",
            None,
            &json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "not_configured");
}

fn contact_request() -> Request<Body> {
    send_json(
        "POST",
        "/api/v1/contact",
        None,
        &json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }),
    )
}

#[tokio::test]
async fn contact_is_mailed_when_configured() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let stub = AsyncStubTransport::new_ok();
    let mailer = ContactMailer::with_stub("owner@example.com", "noreply@example.com", stub.clone())
        .expect("mailer");
    let state = AppState {
        contact: Some(Arc::new(mailer)),
        ..test_state(&server, dir.path())
    };

    let response = app(state)
        .oneshot(contact_request())
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "sent");

    let sent = stub.messages().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0.to()[0].to_string(), "owner@example.com");
    assert!(sent[0].1.contains("Reply-To: Ada <ada@example.com>"));
}

#[tokio::test]
async fn contact_delivery_failure_is_upstream_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let mailer = ContactMailer::with_stub(
        "owner@example.com",
        "noreply@example.com",
        AsyncStubTransport::new_error(),
    )
    .expect("mailer");
    let state = AppState {
        contact: Some(Arc::new(mailer)),
        ..test_state(&server, dir.path())
    };

    let response = app(state)
        .oneshot(contact_request())
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "upstream_error");
}

#[tokio::test]
async fn contact_validation_error_is_bad_request() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(send_json(
            "POST",
            "/api/v1/contact",
            None,
            &json!({ "name": "Ada", "email": "not-an-email", "message": "Hello" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blog_routes_list_and_find_posts() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("winter-layers.md"),
        "---\ntitle: Winter layers\ndate: 2026-09-20\n---\nStay dry out there.\n",
    )
    .expect("write post");
    let state = test_state(&server, dir.path());

    let list = app(state.clone())
        .oneshot(get("/api/v1/blog"))
        .await
        .expect("response");
    assert_eq!(list.status(), StatusCode::OK);
    let json = body_json(list).await;
    assert_eq!(json["data"][0]["slug"], "winter-layers");
    assert_eq!(json["data"][0]["excerpt"], "Stay dry out there.");

    let found = app(state.clone())
        .oneshot(get("/api/v1/blog/winter-layers"))
        .await
        .expect("response");
    assert_eq!(found.status(), StatusCode::OK);

    let missing = app(state)
        .oneshot(get("/api/v1/blog/summer"))
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seo_lookup_falls_back_to_default() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/api/v1/seo?path=/blog/"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["path"], "/blog/");
    assert_eq!(json["data"]["title"], "Journal");
    assert_eq!(json["data"]["description"], "Outdoor gear.");
}

#[tokio::test]
async fn sitemap_lists_products_and_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query Products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "edges": [
                { "node": product_node("trail-tee", "24.00", None) }
            ] } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("query Collections"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("winter-layers.md"),
        "---\ntitle: Winter layers\ndate: 2026-09-20\n---\nStay dry.\n",
    )
    .expect("write post");

    let response = app(test_state(&server, dir.path()))
        .oneshot(get("/sitemap.xml"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(content_type.as_deref(), Some("application/xml; charset=utf-8"));

    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let xml = String::from_utf8(body.to_vec()).expect("utf-8");
    assert!(xml.contains("<loc>https://shop.example.com/products/trail-tee</loc>"));
    assert!(xml.contains("<loc>https://shop.example.com/blog/winter-layers</loc>"));
    assert!(!xml.contains("/collections/"));
}
