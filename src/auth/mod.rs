//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Authorization header value (raw, unparsed)
//!     → validator.rs (single bounded lookup)
//!     → store.rs (GET token against the session cache)
//!     → Ok(identity payload) or AuthError
//! ```
//!
//! The gateway only ever reads the cache. Sessions are created and expired
//! by the authentication service and the cache TTL.

pub mod store;
pub mod validator;

pub use store::{RedisSessionStore, SessionStore, SessionStoreError};
pub use validator::{AuthError, TokenValidator};
