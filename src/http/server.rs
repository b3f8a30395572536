//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, locale routing)
//! - Bind server to listener
//! - Forward locale-resolved requests to the upstream site
//! - Observability (metrics, correlation IDs)

use axum::{
    body::Body,
    extract::State,
    http::{uri::Authority, uri::Scheme, HeaderValue, Request, StatusCode, Uri, Version},
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::REDIRECT_STATUSES;
use crate::config::GatewayConfig;
use crate::http::handlers::{get_health, switch_locale, HEALTH_PATH};
use crate::http::middleware::locale::{locale_middleware, LocaleContext};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::locale::LocaleSetError;
use crate::observability::metrics;
use crate::routing::LocaleRouter;

/// Errors building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The locale list or default is invalid.
    #[error("locale configuration: {0}")]
    Locales(#[from] LocaleSetError),

    /// The upstream address is not a socket address.
    #[error("invalid upstream address {0:?}")]
    Upstream(String),

    /// The redirect status is not a supported redirection.
    #[error("invalid redirect status {0}")]
    RedirectStatus(u16),
}

/// The site renderer pass-through requests are forwarded to.
#[derive(Clone)]
pub struct Upstream {
    pub authority: Authority,
    pub client: Client<HttpConnector, Body>,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<LocaleRouter>,
    pub redirect_status: StatusCode,
    pub upstream: Option<Upstream>,
}

/// HTTP server for the locale gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let locale_router = Arc::new(LocaleRouter::from_config(&config.locale)?);

        let redirect_status = StatusCode::from_u16(config.locale.redirect_status)
            .ok()
            .filter(|s| REDIRECT_STATUSES.contains(&s.as_u16()))
            .ok_or(ServerError::RedirectStatus(config.locale.redirect_status))?;

        let upstream = match &config.upstream.address {
            Some(address) => Some(Upstream {
                authority: parse_authority(address)?,
                client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
            }),
            None => None,
        };

        let state = AppState {
            router: locale_router,
            redirect_status,
            upstream,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route(HEALTH_PATH, get(get_health))
            .route("/api/locale/{code}", get(switch_locale))
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state.clone())
            .layer(middleware::from_fn_with_state(state, locale_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            locales = ?self.config.locale.supported,
            default_locale = %self.config.locale.default,
            upstream = ?self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for serving on a custom transport.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

fn parse_authority(address: &str) -> Result<Authority, ServerError> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|_| ServerError::Upstream(address.to_string()))?;
    Authority::from_str(&addr.to_string()).map_err(|_| ServerError::Upstream(address.to_string()))
}

/// Forwards a request that passed locale routing to the upstream site.
async fn proxy_handler(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    let Some(upstream) = state.upstream else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let uri = match Uri::builder()
        .scheme(Scheme::HTTP)
        .authority(upstream.authority.clone())
        .path_and_query(path_and_query)
        .build()
    {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot build upstream URI");
            return (StatusCode::BAD_REQUEST, "Invalid request target").into_response();
        }
    };

    *request.uri_mut() = uri;
    *request.version_mut() = Version::HTTP_11;

    if let Some(context) = request.extensions().get::<LocaleContext>().cloned() {
        context.apply(request.headers_mut());
    }
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        request.headers_mut().insert(X_REQUEST_ID, value);
    }

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Forwarding request"
    );

    match upstream.client.request(request).await {
        Ok(response) => {
            metrics::record_upstream(response.status().as_u16(), start_time);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_upstream(StatusCode::BAD_GATEWAY.as_u16(), start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{ACCEPT_LANGUAGE, COOKIE, LOCATION};
    use tower::ServiceExt;

    fn app(config: GatewayConfig) -> Router {
        HttpServer::new(config).unwrap().into_router()
    }

    async fn send(router: Router, request: Request<Body>) -> Response {
        router.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_unprefixed_page_redirects() {
        let request = Request::builder()
            .uri("/donate?campaign=42")
            .header(COOKIE, "NEXT_LOCALE=ar")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .body(Body::empty())
            .unwrap();

        let response = send(app(GatewayConfig::default()), request).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[LOCATION], "/ar/donate?campaign=42");
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_configured_redirect_status() {
        let mut config = GatewayConfig::default();
        config.locale.redirect_status = 308;

        let request = Request::builder().uri("/about").body(Body::empty()).unwrap();
        let response = send(app(config), request).await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[LOCATION], "/en/about");
    }

    #[tokio::test]
    async fn test_prefixed_page_without_upstream_is_not_found() {
        let request = Request::builder().uri("/en/about").body(Body::empty()).unwrap();
        let response = send(app(GatewayConfig::default()), request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_is_not_redirected() {
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let response = send(app(GatewayConfig::default()), request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_switch_rejects_unknown_locale() {
        let request = Request::builder()
            .uri("/api/locale/fr?return_to=/en/about")
            .body(Body::empty())
            .unwrap();
        let response = send(app(GatewayConfig::default()), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rejects_bad_upstream() {
        let mut config = GatewayConfig::default();
        config.upstream.address = Some("not an address".into());
        assert!(matches!(
            HttpServer::new(config),
            Err(ServerError::Upstream(_))
        ));
    }

    #[test]
    fn test_rejects_non_redirect_status() {
        let mut config = GatewayConfig::default();
        config.locale.redirect_status = 200;
        assert!(matches!(
            HttpServer::new(config),
            Err(ServerError::RedirectStatus(200))
        ));
    }
}
