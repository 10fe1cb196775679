//! Shared call path tests: options, error mapping and deadlines

mod common;

use binance_rest::transport::{HttpResponse, MockTransport, TransportError};
use binance_rest::{ClientConfig, LiquidityPoolsQuery, RecoveryStrategy, RequestOptions, RestError};
use common::*;
use std::time::Duration;

#[tokio::test]
async fn test_recv_window_default_and_override() {
    let config = ClientConfig::new()
        .with_credentials(credentials())
        .with_recv_window(5000);
    let (client, transport) = client_with(config, MockTransport::new());
    transport.push_body(200, "[]");
    transport.push_body(200, "[]");

    let query = LiquidityPoolsQuery::new();
    client
        .liquid_swap()
        .get_liquidity_pools(&query, &RequestOptions::default())
        .await
        .unwrap();
    client
        .liquid_swap()
        .get_liquidity_pools(&query, &RequestOptions::new().with_recv_window(60_000))
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].query_param("recvWindow"), Some("5000"));
    assert_eq!(requests[1].query_param("recvWindow"), Some("60000"));
}

#[tokio::test]
async fn test_extra_headers_are_sent() {
    let (client, transport) = signed_client();
    transport.push_body(200, "[]");

    let options = RequestOptions::new().with_header("X-Request-Id", "abc-123");
    client
        .liquid_swap()
        .get_liquidity_pools(&LiquidityPoolsQuery::new(), &options)
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.header("x-request-id"), Some("abc-123"));
    assert_eq!(request.header("X-MBX-APIKEY"), Some(API_KEY));
}

#[tokio::test]
async fn test_api_error_body_is_surfaced() {
    let (client, transport) = signed_client();
    transport.push_body(
        400,
        r#"{"code":-1021,"msg":"Timestamp for this request is outside of the recvWindow."}"#,
    );

    let err = client
        .get_liquidity_pools(&LiquidityPoolsQuery::new())
        .await
        .unwrap_err();

    match &err {
        RestError::Api { status, error } => {
            assert_eq!(*status, 400);
            assert_eq!(error.code, -1021);
            assert!(error.msg.contains("recvWindow"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_rejected_key_is_fatal() {
    let (client, transport) = signed_client();
    transport.push_body(
        401,
        r#"{"code":-2015,"msg":"Invalid API-key, IP, or permissions for action."}"#,
    );

    let err = client
        .get_liquidity_pools(&LiquidityPoolsQuery::new())
        .await
        .unwrap_err();
    assert!(err.api_error().unwrap().is_auth_error());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_rate_limit_status() {
    let (client, transport) = signed_client();
    transport.push_response(
        HttpResponse::new(429, r#"{"code":-1003,"msg":"Too much request weight used."}"#)
            .with_header("Retry-After", "30"),
    );

    let err = client
        .get_liquidity_pools(&LiquidityPoolsQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RestError::RateLimited {
            status: 429,
            retry_after_ms: Some(30_000)
        }
    ));
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_huge_retry_after_saturates() {
    let (client, transport) = signed_client();
    transport.push_response(
        HttpResponse::new(429, "").with_header("Retry-After", "18446744073709552"),
    );

    let err = client
        .get_liquidity_pools(&LiquidityPoolsQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RestError::RateLimited {
            status: 429,
            retry_after_ms: Some(u64::MAX)
        }
    ));
    assert_eq!(
        err.recovery_strategy(),
        RecoveryStrategy::Backoff {
            initial_ms: u64::MAX,
            max_ms: u64::MAX,
            multiplier: 1,
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unrecognized_error_body() {
    let (client, transport) = signed_client();
    transport.push_body(503, "Service Unavailable");

    let err = client
        .get_liquidity_pools(&LiquidityPoolsQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::Status { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let (client, transport) = signed_client();
    transport.push_error(TransportError::Other("connection reset".into()));

    let err = client
        .get_liquidity_pools(&LiquidityPoolsQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::Transport(TransportError::Other(ref m)) if m == "connection reset"));
}

#[tokio::test]
async fn test_per_call_timeout() {
    let transport = MockTransport::new().with_delay(Duration::from_millis(500));
    let (client, transport) = client_with(ClientConfig::new().with_credentials(credentials()), transport);
    transport.push_body(200, "[]");

    let options = RequestOptions::new().with_timeout(Duration::from_millis(20));
    let err = client
        .liquid_swap()
        .get_liquidity_pools(&LiquidityPoolsQuery::new(), &options)
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::Timeout(d) if d == Duration::from_millis(20)));
}

#[tokio::test]
async fn test_clones_share_transport() {
    let (client, transport) = signed_client();
    transport.push_body(200, "[]");
    transport.push_body(200, "[]");

    let cloned = client.clone();
    let query = LiquidityPoolsQuery::new();
    let (a, b) = tokio::join!(
        client.get_liquidity_pools(&query),
        cloned.get_liquidity_pools(&query)
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(transport.requests().len(), 2);
}
