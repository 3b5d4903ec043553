//! Token validation against the session cache.
//!
//! # Responsibilities
//! - Resolve a bearer token to its stored identity payload
//! - Distinguish a missing session from a cache outage in the error kind
//! - Bound the lookup with a deadline so a dead cache fails fast
//!
//! # Design Decisions
//! - The token is used verbatim as the cache key; no scheme prefix is
//!   stripped and no format check is applied. A request without an
//!   `Authorization` header arrives here as the empty string and simply
//!   misses.
//! - Exactly one lookup per validation: no retries, no TTL refresh, no
//!   write-back.
//! - All error kinds surface to the caller as the same 401; the distinction
//!   exists for logs and metrics.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::auth::store::{SessionStore, SessionStoreError};

/// Why a validation failed. `kind()` gives the stable metrics label.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The cache answered and holds no session for this token.
    #[error("no session for presented token")]
    SessionMissing,

    /// The cache could not be reached or the lookup itself failed.
    #[error(transparent)]
    StoreUnavailable(#[from] SessionStoreError),

    /// The lookup did not answer within the configured deadline.
    #[error("session lookup timed out")]
    StoreTimeout,
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::SessionMissing => "session_missing",
            AuthError::StoreUnavailable(_) => "store_unavailable",
            AuthError::StoreTimeout => "store_timeout",
        }
    }
}

/// Decides whether a caller is authenticated.
pub struct TokenValidator {
    store: Arc<dyn SessionStore>,
    lookup_timeout: Duration,
}

impl TokenValidator {
    pub fn new(store: Arc<dyn SessionStore>, lookup_timeout: Duration) -> Self {
        Self { store, lookup_timeout }
    }

    /// Resolve `token` against the session cache.
    ///
    /// Returns the stored identity payload on a hit. The payload is opaque
    /// pass-through data; callers may log it but must not parse it.
    pub async fn validate(&self, token: &str) -> Result<String, AuthError> {
        match tokio::time::timeout(self.lookup_timeout, self.store.get(token)).await {
            Ok(Ok(Some(identity))) => Ok(identity),
            Ok(Ok(None)) => Err(AuthError::SessionMissing),
            Ok(Err(e)) => Err(AuthError::StoreUnavailable(e)),
            Err(_) => Err(AuthError::StoreTimeout),
        }
    }
}
