//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::{extract::Request, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use locale_gateway::config::GatewayConfig;
use locale_gateway::http::HttpServer;
use locale_gateway::lifecycle::Shutdown;

/// Start a mock site renderer that echoes what it received as JSON.
pub async fn start_echo_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().fallback(|request: Request| async move {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(json!({
            "method": request.method().as_str(),
            "path": request.uri().path(),
            "query": request.uri().query(),
            "locale": header("x-locale"),
            "direction": header("x-text-direction"),
            "request_id": header("x-request-id"),
        }))
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Start the gateway in front of a fresh echo upstream.
pub async fn start_gateway_with_upstream() -> (SocketAddr, Shutdown) {
    let upstream = start_echo_upstream().await;
    let mut config = GatewayConfig::default();
    config.upstream.address = Some(upstream.to_string());
    start_gateway(config).await
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub async fn echo(res: reqwest::Response) -> Value {
    assert_eq!(res.status(), 200, "expected the upstream to answer");
    res.json().await.unwrap()
}
