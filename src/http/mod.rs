//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, dispatch handler)
//!     → request.rs (assign request ID)
//!     → [route table decides target, auth gate decides admission]
//!     → upstream.rs (bounded call to the downstream service)
//!     → relay status/body back to the client
//! ```

pub mod request;
pub mod server;
pub mod upstream;

pub use request::{RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
pub use upstream::UpstreamClient;
