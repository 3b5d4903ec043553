//! Gateway error taxonomy.
//!
//! Every failure a request can hit is converted into one of these variants at
//! the dispatch boundary and rendered as a complete HTTP response. Nothing
//! here propagates past the request handler: a bad request never takes the
//! process down and never leaves the caller with a dropped connection.
//!
//! A downstream service answering with its own error status is *not* a
//! gateway error; that response is relayed verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Request-level failures produced by the gateway itself.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The session check failed. Covers a missing session as well as a
    /// session-cache outage; the distinction is logged but not exposed.
    #[error("unauthorized")]
    Unauthorized,

    /// No route table entry matches the request method and path.
    #[error("no route for request")]
    RouteNotFound,

    /// The downstream service could not be reached.
    #[error("upstream request failed: {0}")]
    UpstreamUnavailable(String),

    /// The downstream call did not complete within the configured deadline.
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// A request that should have been forwardable could not be built.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status the caller sees for this failure class.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::RouteNotFound => StatusCode::NOT_FOUND,
            GatewayError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed response body for this failure class. Bodies are static so the
    /// caller-visible contract does not leak internal detail.
    fn body(&self) -> &'static str {
        match self {
            GatewayError::Unauthorized => "Unauthorized",
            GatewayError::RouteNotFound => "No matching route found",
            GatewayError::UpstreamUnavailable(_) => "Upstream request failed",
            GatewayError::UpstreamTimeout => "Upstream request timed out",
            GatewayError::Internal(_) => "Internal error",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.body()).into_response()
    }
}
