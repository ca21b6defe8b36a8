//! HTTP server setup and gateway dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all gateway handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Run the canonicalization engine per request
//! - Act on the decision: preflight, redirect, or annotated forward
//! - Forward pass-through traffic to the upstream page-resolution service
//! - Observability (metrics, correlation IDs)

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::uri::{Authority, Scheme},
    http::{header, HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::engine::cors::CorsHeaders;
use crate::engine::locale::Locale;
use crate::engine::parser::RouteMatch;
use crate::engine::{Decision, RoutingEngine};
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::observability::metrics;

/// Request header carrying the resolved locale to the upstream.
pub const X_RESOLVED_LOCALE: &str = "x-resolved-locale";

/// Request header carrying the serialized route parameters to the upstream.
pub const X_ROUTE_PARAMS: &str = "x-route-params";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// The compiled canonicalization engine.
    pub engine: Arc<RoutingEngine>,
    /// Client for the upstream forwarding hop.
    pub client: Client<HttpConnector, Body>,
    /// Upstream authority, e.g. "127.0.0.1:3000".
    pub upstream: String,
}

/// HTTP server for the canonicalization gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let engine = Arc::new(RoutingEngine::from_config(&config));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            engine,
            client,
            upstream: config.upstream.address.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Main gateway handler.
/// Runs the engine and acts on its decision.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let decision = state
        .engine
        .decide(&method, &path, query.as_deref(), origin.as_deref());

    match decision {
        Decision::Bypass => {
            metrics::record_decision("bypass");
            forward(&state, request, &request_id, start).await
        }
        Decision::Preflight { cors } => {
            metrics::record_decision("preflight");
            let mut response = StatusCode::NO_CONTENT.into_response();
            apply_cors(&mut response, &cors);
            metrics::record_request(method.as_str(), response.status().as_u16(), start);
            response
        }
        Decision::Redirect { location, cors } => match HeaderValue::from_str(&location) {
            Ok(value) => {
                metrics::record_decision("redirect");
                tracing::debug!(
                    request_id = %request_id,
                    from = %path,
                    to = %location,
                    "Redirecting to canonical URL"
                );
                let mut response = StatusCode::PERMANENT_REDIRECT.into_response();
                response.headers_mut().insert(header::LOCATION, value);
                apply_cors(&mut response, &cors);
                metrics::record_request(method.as_str(), response.status().as_u16(), start);
                response
            }
            Err(_) => {
                // Location not header-safe: degrade to pass-through.
                tracing::warn!(
                    request_id = %request_id,
                    location = %location,
                    "Canonical location not header-safe, forwarding unmodified"
                );
                metrics::record_fail_open();
                forward(&state, request, &request_id, start).await
            }
        },
        Decision::Forward { cors, locale, route } => {
            metrics::record_decision("forward");
            let mut request = request;
            annotate(&mut request, locale, &route);
            let mut response = forward(&state, request, &request_id, start).await;
            apply_cors(&mut response, &cors);
            response
        }
    }
}

/// Attach the engine's resolution to the outgoing upstream request.
fn annotate(request: &mut Request<Body>, locale: Locale, route: &RouteMatch) {
    request
        .headers_mut()
        .insert(X_RESOLVED_LOCALE, HeaderValue::from_static(locale.as_str()));

    match serde_json::to_string(route) {
        Ok(json) => {
            if let Ok(value) = HeaderValue::from_str(&json) {
                request.headers_mut().insert(X_ROUTE_PARAMS, value);
            } else {
                tracing::warn!("Route parameters not header-safe, annotation skipped");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize route parameters");
        }
    }
}

/// Apply negotiated CORS headers to a response.
fn apply_cors(response: &mut Response, cors: &CorsHeaders) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&cors.allow_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    if cors.allow_credentials {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
    if let Ok(value) = HeaderValue::from_str(&cors.allow_methods) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, value);
    }
    if let Ok(value) = HeaderValue::from_str(&cors.allow_headers) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
    }
}

/// Forward a request to the upstream, single attempt.
async fn forward(
    state: &AppState,
    request: Request<Body>,
    request_id: &str,
    start: Instant,
) -> Response {
    let method_str = request.method().to_string();
    let (mut parts, body) = request.into_parts();

    let authority = match Authority::from_str(&state.upstream) {
        Ok(authority) => authority,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Invalid upstream address");
            metrics::record_request(&method_str, 502, start);
            return (StatusCode::BAD_GATEWAY, "Invalid upstream address").into_response();
        }
    };

    // URI rewrite: same path and query, upstream scheme and authority.
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(authority);
    let uri = Uri::from_parts(uri_parts).unwrap_or_else(|_| parts.uri.clone());
    parts.uri = uri;

    // Propagate the correlation ID to the upstream hop.
    if let Ok(value) = HeaderValue::from_str(request_id) {
        parts.headers.insert(X_REQUEST_ID, value);
    }

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let status = response.status();
            metrics::record_request(&method_str, status.as_u16(), start);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_request(&method_str, 502, start);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
