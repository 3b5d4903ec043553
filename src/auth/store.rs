//! Session store client.
//!
//! The session cache is owned by the authentication service; from here it is
//! a read-only key→value lookup. The token presented by the caller is the
//! key, the stored identity payload is the value, and neither is interpreted.
//! The gateway never writes an entry and never refreshes a TTL.

use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::{Pool, Runtime};
use thiserror::Error;

use crate::config::SessionCacheConfig;

/// Failures talking to the session cache. A miss is not an error; it is the
/// `Ok(None)` case.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session cache connection failed: {0}")]
    Connection(String),

    #[error("session cache lookup failed: {0}")]
    Lookup(String),
}

/// Key→value lookup against the session cache.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the identity payload stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
}

/// Production store backed by a Redis connection pool.
///
/// The pool hands out connections lazily, so an unreachable cache degrades to
/// per-request auth failures instead of preventing startup.
pub struct RedisSessionStore {
    pool: Pool,
}

impl RedisSessionStore {
    pub fn new(config: &SessionCacheConfig) -> Result<Self, SessionStoreError> {
        let mut cfg = deadpool_redis::Config::from_url(&config.url);
        cfg.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size));

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| SessionStoreError::Connection(format!("failed to create pool: {e}")))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| SessionStoreError::Connection(e.to_string()))?;

        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| SessionStoreError::Lookup(e.to_string()))?;

        Ok(value)
    }
}
