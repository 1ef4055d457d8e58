//! End-to-end tests for the payment orchestration flow.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use payment_orchestrator::clients::{AuthorizationClient, ProductClient};
use payment_orchestrator::config::ServiceConfig;
use payment_orchestrator::http::HttpServer;
use payment_orchestrator::lifecycle::Shutdown;
use payment_orchestrator::orchestrator::PaymentOrchestrator;
use payment_orchestrator::telemetry::{install_propagator, Telemetry};
use serde_json::{json, Value};
use url::Url;

mod common;

const WIDGET: &str = r#"{"id":"p1","name":"Widget","price":9.99}"#;
const TRACE_ID: &str = "4bf92f3577b34da6a3ce929d0e0e4736";

/// Boot an orchestrator wired to the given upstream addresses.
async fn spawn_orchestrator(
    bind: SocketAddr,
    product_addr: SocketAddr,
    auth_addr: SocketAddr,
) -> Shutdown {
    install_propagator();

    let http = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    let orchestrator = Arc::new(PaymentOrchestrator::new(
        ProductClient::new(
            http.clone(),
            Url::parse(&format!("http://{product_addr}")).unwrap(),
        ),
        AuthorizationClient::new(http, Url::parse(&format!("http://{auth_addr}")).unwrap()),
        Telemetry::disabled(),
    ));

    let mut config = ServiceConfig::default();
    config.listener.bind_address = bind.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, orchestrator);
    let listener = tokio::net::TcpListener::bind(bind).await.unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(200)).await;

    shutdown
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

fn payment_body() -> Value {
    json!({ "product_id": "p1", "payment_token": "tok" })
}

#[tokio::test]
async fn test_successful_payment() {
    let product_addr: SocketAddr = "127.0.0.1:29101".parse().unwrap();
    let auth_addr: SocketAddr = "127.0.0.1:29102".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29103".parse().unwrap();

    let product_seen = common::start_upstream(product_addr, 200, WIDGET).await;
    let auth_seen = common::start_upstream(auth_addr, 200, "").await;
    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    let res = client()
        .post(format!("http://{bind}/process_payment"))
        .json(&payment_body())
        .send()
        .await
        .expect("orchestrator unreachable");

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "status": "Payment successful" }));

    // One call to each downstream, product first.
    assert_eq!(product_seen.lock().unwrap().len(), 1);
    assert_eq!(auth_seen.lock().unwrap().len(), 1);
    let product_head = product_seen.lock().unwrap()[0].clone();
    assert!(product_head.starts_with("GET /get_product?product_id=p1"));
    let auth_head = auth_seen.lock().unwrap()[0].clone();
    assert!(auth_head.starts_with("GET /authorize?"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_denied_payment_maps_to_403() {
    let product_addr: SocketAddr = "127.0.0.1:29111".parse().unwrap();
    let auth_addr: SocketAddr = "127.0.0.1:29112".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29113".parse().unwrap();

    common::start_upstream(product_addr, 200, WIDGET).await;
    common::start_upstream(auth_addr, 401, "").await;
    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    let res = client()
        .post(format!("http://{bind}/process_payment"))
        .json(&payment_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 403);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "status": "Payment not authorized" }));

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_bodies_are_rejected_locally() {
    let product_addr: SocketAddr = "127.0.0.1:29121".parse().unwrap();
    let auth_addr: SocketAddr = "127.0.0.1:29122".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29123".parse().unwrap();

    let product_seen = common::start_upstream(product_addr, 200, WIDGET).await;
    let auth_seen = common::start_upstream(auth_addr, 200, "").await;
    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    for body in [
        "not json at all",
        r#"{"product_id":"p1"}"#,
        r#"{"product_id":"","payment_token":"tok"}"#,
    ] {
        let res = client()
            .post(format!("http://{bind}/process_payment"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 400, "body: {body}");
        let payload: Value = res.json().await.unwrap();
        assert!(payload.get("error").is_some(), "body: {body}");
    }

    // Rejected before any downstream call.
    assert_eq!(product_seen.lock().unwrap().len(), 0);
    assert_eq!(auth_seen.lock().unwrap().len(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_product_failure_skips_authorization() {
    let product_addr: SocketAddr = "127.0.0.1:29131".parse().unwrap();
    let auth_addr: SocketAddr = "127.0.0.1:29132".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29133".parse().unwrap();

    common::start_upstream(product_addr, 500, "boom").await;
    let auth_seen = common::start_upstream(auth_addr, 200, "").await;
    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    let res = client()
        .post(format!("http://{bind}/process_payment"))
        .json(&payment_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Could not fetch product" }));
    assert_eq!(auth_seen.lock().unwrap().len(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_undecodable_product_is_a_fetch_error() {
    let product_addr: SocketAddr = "127.0.0.1:29141".parse().unwrap();
    let auth_addr: SocketAddr = "127.0.0.1:29142".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29143".parse().unwrap();

    common::start_upstream(product_addr, 200, "<html>not json</html>").await;
    common::start_upstream(auth_addr, 200, "").await;
    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    let res = client()
        .post(format!("http://{bind}/process_payment"))
        .json(&payment_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Could not fetch product" }));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_authorizer_maps_to_500() {
    let product_addr: SocketAddr = "127.0.0.1:29151".parse().unwrap();
    // Nothing listens here: connections are refused.
    let auth_addr: SocketAddr = "127.0.0.1:29152".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29153".parse().unwrap();

    common::start_upstream(product_addr, 200, WIDGET).await;
    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    let res = client()
        .post(format!("http://{bind}/process_payment"))
        .json(&payment_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Could not authorize payment" }));

    shutdown.trigger();
}

#[tokio::test]
async fn test_identical_requests_get_identical_responses() {
    let product_addr: SocketAddr = "127.0.0.1:29161".parse().unwrap();
    let auth_addr: SocketAddr = "127.0.0.1:29162".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29163".parse().unwrap();

    let product_seen = common::start_upstream(product_addr, 200, WIDGET).await;
    common::start_upstream(auth_addr, 200, "").await;
    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    let client = client();
    let mut responses = Vec::new();
    for _ in 0..2 {
        let res = client
            .post(format!("http://{bind}/process_payment"))
            .json(&payment_body())
            .send()
            .await
            .unwrap();
        let status = res.status();
        let body: Value = res.json().await.unwrap();
        responses.push((status, body));
    }

    assert_eq!(responses[0], responses[1]);
    // No hidden state: each request made its own product lookup.
    assert_eq!(product_seen.lock().unwrap().len(), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_trace_context_and_baggage_propagate_downstream() {
    let product_addr: SocketAddr = "127.0.0.1:29171".parse().unwrap();
    let auth_addr: SocketAddr = "127.0.0.1:29172".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29173".parse().unwrap();

    let product_seen = common::start_upstream(product_addr, 200, WIDGET).await;
    let auth_seen = common::start_upstream(auth_addr, 200, "").await;
    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    let res = client()
        .post(format!("http://{bind}/process_payment"))
        .header(
            "traceparent",
            format!("00-{TRACE_ID}-00f067aa0ba902b7-01"),
        )
        .header("baggage", "tenant=acme")
        .json(&payment_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    // Both downstream calls continue the caller's trace and carry its
    // baggage; only the outcome span sheds it.
    let product_head = product_seen.lock().unwrap()[0].clone();
    assert!(product_head.contains(TRACE_ID), "head: {product_head}");
    assert!(product_head.contains("tenant=acme"), "head: {product_head}");

    let auth_head = auth_seen.lock().unwrap()[0].clone();
    assert!(auth_head.contains(TRACE_ID), "head: {auth_head}");

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_endpoint() {
    let product_addr: SocketAddr = "127.0.0.1:29181".parse().unwrap();
    let auth_addr: SocketAddr = "127.0.0.1:29182".parse().unwrap();
    let bind: SocketAddr = "127.0.0.1:29183".parse().unwrap();

    let shutdown = spawn_orchestrator(bind, product_addr, auth_addr).await;

    let res = client()
        .get(format!("http://{bind}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    shutdown.trigger();
}
