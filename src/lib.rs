//! Authenticating API gateway for the music catalog services.
//!
//! Sits in front of the artist, song, playlist, user and authentication
//! services. Every inbound request is classified by a static route table;
//! protected routes are admitted only when the presented bearer token
//! resolves against the session cache, and admitted requests are forwarded
//! verbatim to their service with the response relayed back unchanged.
//!
//! ```text
//! client ──▶ http (server, request id)
//!               │
//!               ├─▶ routing (route table, path shapes)
//!               ├─▶ auth (token validator ──▶ session cache)
//!               └─▶ http::upstream ──▶ backend service
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
