//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so a minimal (or absent) file still runs.

use serde::{Deserialize, Serialize};

use crate::routing::Backend;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Base URLs of the downstream services.
    pub services: ServicesConfig,

    /// Session cache connection settings.
    pub session_cache: SessionCacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_size: 2 * 1024 * 1024,
        }
    }
}

/// Base URL for each downstream service, individually overridable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub artist_url: String,
    pub song_url: String,
    pub playlist_url: String,
    pub user_url: String,
    pub authentication_url: String,
}

impl ServicesConfig {
    /// The configured base URL for a backend.
    pub fn base_url(&self, backend: Backend) -> &str {
        match backend {
            Backend::Artist => &self.artist_url,
            Backend::Song => &self.song_url,
            Backend::Playlist => &self.playlist_url,
            Backend::User => &self.user_url,
            Backend::Authentication => &self.authentication_url,
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            artist_url: "http://127.0.0.1:8081".to_string(),
            song_url: "http://127.0.0.1:8082".to_string(),
            playlist_url: "http://127.0.0.1:8083".to_string(),
            user_url: "http://127.0.0.1:8084".to_string(),
            authentication_url: "http://127.0.0.1:8085".to_string(),
        }
    }
}

/// Session cache connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionCacheConfig {
    /// Cache URL (redis://...).
    pub url: String,

    /// Connection pool size.
    pub pool_size: usize,

    /// Deadline for a single session lookup, in milliseconds.
    pub lookup_timeout_ms: u64,
}

impl Default for SessionCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6380".to_string(),
            pool_size: 16,
            lookup_timeout_ms: 500,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for downstream calls, in seconds.
    pub connect_secs: u64,

    /// Whole-request timeout at the listener, in seconds.
    pub request_secs: u64,

    /// Deadline for a single downstream call, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
            upstream_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
