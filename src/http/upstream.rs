//! Downstream HTTP client.
//!
//! # Responsibilities
//! - Hold the pooled client shared by all request handlers
//! - Bound every downstream call with connect and overall deadlines
//! - Map transport failures into the gateway error taxonomy
//!
//! # Design Decisions
//! - One pooled client for all five services; pooling is per-host inside
//!   the client, so separate clients would buy nothing
//! - A call is attempted exactly once; there is no retry loop
//! - Timeout and unreachability are distinct failure classes (504 vs 502)

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TimeoutConfig;
use crate::error::GatewayError;

/// Pooled client for calls to the downstream services.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    call_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            call_timeout: Duration::from_secs(timeouts.upstream_secs),
        }
    }

    /// Perform one downstream call within the configured deadline.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Incoming>, GatewayError> {
        match tokio::time::timeout(self.call_timeout, self.client.request(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(GatewayError::UpstreamUnavailable(e.to_string())),
            Err(_) => Err(GatewayError::UpstreamTimeout),
        }
    }
}
