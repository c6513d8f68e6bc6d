// Integration tests for the full checkout flow:
// request validation → order store → YooKassa client → response.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::StatusCode;
use actix_web::test;
use base64::prelude::*;
use checkout_intake::core::traits::Repository;
use checkout_intake::create_app;
use checkout_intake::orders::Order;
use chrono::Utc;
use futures_util::future::join_all;
use helpers::*;
use serde_json::{json, Value};

const PATH: &str = "/api/create-payment";

fn read_document(ctx: &TestContext) -> Vec<Order> {
    let raw = std::fs::read_to_string(ctx.config.storage.orders_path())
        .expect("Order document missing");
    serde_json::from_str(&raw).expect("Order document is not a valid JSON array")
}

#[actix_web::test]
async fn test_successful_checkout_appends_one_order() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.service())).await;

    let started = Utc::now();
    let req = test::TestRequest::post()
        .uri(PATH)
        .set_json(TestDataFactory::checkout_payload_with(
            "  buyer@example.com ",
            " +79001234567",
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let finished = Utc::now();

    assert_status(&resp, StatusCode::OK);

    let orders = read_document(&ctx);
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.email, "buyer@example.com");
    assert_eq!(order.phone, "+79001234567");
    assert!(order.created_at >= started, "timestamp before call start");
    assert!(order.created_at <= finished, "timestamp after call end");
}

#[actix_web::test]
async fn test_sequential_checkouts_keep_arrival_order() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.service())).await;

    for (i, email) in ["first@example.com", "second@example.com"]
        .into_iter()
        .enumerate()
    {
        let req = test::TestRequest::post()
            .uri(PATH)
            .set_json(TestDataFactory::checkout_payload_with(email, "+79001234567"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_status(&resp, StatusCode::OK);

        // Document must be a valid array after every write
        assert_eq!(read_document(&ctx).len(), i + 1);
    }

    let emails: Vec<String> = read_document(&ctx).into_iter().map(|o| o.email).collect();
    assert_eq!(emails, ["first@example.com", "second@example.com"]);
}

#[actix_web::test]
async fn test_each_checkout_uses_a_fresh_idempotence_key() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.service())).await;
    let payload = TestDataFactory::checkout_payload_with("same@example.com", "+79001234567");

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(PATH)
            .set_json(payload.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_status(&resp, StatusCode::OK);
    }

    let keys: Vec<String> = ctx
        .gateway
        .requests()
        .into_iter()
        .map(|r| r.idempotence_key.expect("Idempotence-Key header missing"))
        .collect();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
    assert!(keys.iter().all(|k| uuid::Uuid::parse_str(k).is_ok()));
}

#[actix_web::test]
async fn test_gateway_request_is_authenticated_and_complete() {
    let ctx = TestContext::with_env(&[("VAT_CODE", "4")]).await;
    let app = test::init_service(create_app(ctx.service())).await;

    let req = test::TestRequest::post()
        .uri(PATH)
        .set_json(TestDataFactory::checkout_payload_with(
            "buyer@example.com",
            "+79001234567",
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_status(&resp, StatusCode::OK);

    let requests = ctx.gateway.requests();
    assert_eq!(requests.len(), 1);
    let captured = &requests[0];

    let authorization = captured.authorization.as_deref().expect("No Authorization header");
    let encoded = authorization
        .strip_prefix("Basic ")
        .expect("Authorization is not Basic");
    let decoded = String::from_utf8(BASE64_STANDARD.decode(encoded).unwrap()).unwrap();
    assert_eq!(decoded, format!("{TEST_SHOP_ID}:{TEST_SECRET_KEY}"));

    let body: &Value = &captured.body;
    assert_eq!(body["amount"], json!({ "value": "1990.00", "currency": "RUB" }));
    assert_eq!(body["capture"], true);
    assert_eq!(body["description"], "Consultation");
    assert_eq!(
        body["confirmation"],
        json!({ "type": "redirect", "return_url": "https://shop.example/thank-you.html" })
    );
    assert_eq!(
        body["receipt"]["customer"],
        json!({ "email": "buyer@example.com", "phone": "+79001234567" })
    );

    let items = body["receipt"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["amount"], body["amount"]);
    assert_eq!(items[0]["description"], body["description"]);
    assert_eq!(items[0]["vat_code"], 4);
}

#[actix_web::test]
async fn test_invalid_request_skips_store_and_gateway() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.service())).await;

    for payload in [
        json!({ "email": "", "phone": "x" }),
        json!({ "phone": "x" }),
        json!({ "email": "buyer@example.com", "phone": "   " }),
    ] {
        let req = test::TestRequest::post()
            .uri(PATH)
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_status(&resp, StatusCode::BAD_REQUEST);
    }

    assert!(read_document(&ctx).is_empty());
    assert!(ctx.gateway.requests().is_empty());
}

#[actix_web::test]
async fn test_concurrent_checkouts_lose_no_orders() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.service())).await;

    let emails: Vec<String> = (0..12).map(|_| TestDataFactory::random_email()).collect();
    let responses = join_all(emails.iter().map(|email| {
        let req = test::TestRequest::post()
            .uri(PATH)
            .set_json(TestDataFactory::checkout_payload_with(email, "+79001234567"))
            .to_request();
        test::call_service(&app, req)
    }))
    .await;

    assert!(responses.iter().all(|r| r.status() == StatusCode::OK));

    let stored = ctx.store.list().await.unwrap();
    assert_eq!(stored.len(), emails.len());
    for email in &emails {
        assert!(stored.iter().any(|o| &o.email == email), "{email} was lost");
    }
}
