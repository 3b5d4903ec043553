//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Resolve each request against the route table
//! - Gate protected routes on the session check
//! - Forward to the matched downstream service and relay the result
//!
//! The dispatch path is a two-gate state machine per request: route
//! resolution, then authentication. Either gate failing terminates the
//! request with a complete response; in particular an authentication
//! failure means the downstream service is never contacted.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{SessionStore, TokenValidator};
use crate::config::{GatewayConfig, ServicesConfig};
use crate::error::GatewayError;
use crate::http::request::{RequestIdExt, RequestIdLayer, X_REQUEST_ID};
use crate::http::upstream::UpstreamClient;
use crate::observability::metrics;
use crate::routing::RouteTable;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub services: ServicesConfig,
    pub validator: Arc<TokenValidator>,
    pub upstream: UpstreamClient,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and session
    /// store.
    pub fn new(config: GatewayConfig, store: Arc<dyn SessionStore>) -> Self {
        let routes = Arc::new(RouteTable::new());
        let validator = Arc::new(TokenValidator::new(
            store,
            Duration::from_millis(config.session_cache.lookup_timeout_ms),
        ));
        let upstream = UpstreamClient::new(&config.timeouts);

        let state = AppState {
            routes,
            services: config.services.clone(),
            validator,
            upstream,
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_size))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main dispatch handler.
/// Resolves the route, gates on the session check, forwards, and relays.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    // 1. Route resolution
    let Some(matched) = state.routes.resolve(&method, &path) else {
        tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
        metrics::record_request(method.as_str(), StatusCode::NOT_FOUND.as_u16(), "none", start);
        return GatewayError::RouteNotFound.into_response();
    };
    let backend = matched.entry.backend;
    let relay_response = matched.entry.relay_response;

    // 2. Authentication gate. The raw header value is the cache key; a
    // missing header degrades to the empty token and misses like any other.
    if matched.entry.requires_auth {
        let token = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        match state.validator.validate(token).await {
            // The identity payload is not attached to the downstream request.
            Ok(_identity) => {}
            Err(err) => {
                tracing::warn!(
                    request_id = %request_id,
                    backend = backend.as_str(),
                    kind = err.kind(),
                    error = %err,
                    "Session check failed, rejecting request"
                );
                metrics::record_auth_failure(err.kind());
                metrics::record_request(
                    method.as_str(),
                    StatusCode::UNAUTHORIZED.as_u16(),
                    backend.as_str(),
                    start,
                );
                return GatewayError::Unauthorized.into_response();
            }
        }
    }

    // 3. Forward: same method, same body, service base + re-expanded path.
    let downstream_path = matched.downstream_path();
    let target = format!(
        "{}{}",
        state.services.base_url(backend).trim_end_matches('/'),
        downstream_path
    );

    let (parts, body) = request.into_parts();
    let mut builder = Request::builder().method(parts.method).uri(target.as_str());
    if let Some(headers) = builder.headers_mut() {
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(X_REQUEST_ID, value);
        }
    }
    let downstream = match builder.body(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(request_id = %request_id, target = %target, error = %e, "Failed to build downstream request");
            return GatewayError::Internal(e.to_string()).into_response();
        }
    };

    let response = match state.upstream.send(downstream).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                backend = backend.as_str(),
                target = %target,
                error = %err,
                "Upstream call failed"
            );
            metrics::record_request(method.as_str(), err.status_code().as_u16(), backend.as_str(), start);
            return err.into_response();
        }
    };

    // 4. Relay
    let status = response.status();
    if relay_response {
        metrics::record_request(method.as_str(), status.as_u16(), backend.as_str(), start);
        let (parts, body) = response.into_parts();
        Response::from_parts(parts, Body::new(body)).into_response()
    } else {
        // Delete-style contract: the call happened, its outcome is logged,
        // the caller only sees a bare success.
        tracing::debug!(
            request_id = %request_id,
            backend = backend.as_str(),
            status = status.as_u16(),
            "Downstream response suppressed"
        );
        metrics::record_request(method.as_str(), StatusCode::OK.as_u16(), backend.as_str(), start);
        StatusCode::OK.into_response()
    }
}
