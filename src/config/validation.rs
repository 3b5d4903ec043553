//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses and URLs actually parse
//! - Validate value ranges (timeouts > 0, pool size > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    BindAddress(String),

    #[error("services.{field} `{url}` is not a valid http(s) URL")]
    ServiceUrl { field: &'static str, url: String },

    #[error("session_cache.url `{0}` is not a valid redis URL")]
    CacheUrl(String),

    #[error("session_cache.pool_size must be greater than zero")]
    EmptyPool,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.metrics_address `{0}` is not a valid socket address")]
    MetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let services = [
        ("artist_url", &config.services.artist_url),
        ("song_url", &config.services.song_url),
        ("playlist_url", &config.services.playlist_url),
        ("user_url", &config.services.user_url),
        ("authentication_url", &config.services.authentication_url),
    ];
    for (field, raw) in services {
        let ok = Url::parse(raw)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !ok {
            errors.push(ValidationError::ServiceUrl { field, url: raw.clone() });
        }
    }

    let cache_ok = Url::parse(&config.session_cache.url)
        .map(|u| matches!(u.scheme(), "redis" | "rediss"))
        .unwrap_or(false);
    if !cache_ok {
        errors.push(ValidationError::CacheUrl(config.session_cache.url.clone()));
    }
    if config.session_cache.pool_size == 0 {
        errors.push(ValidationError::EmptyPool);
    }
    if config.session_cache.lookup_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("session_cache.lookup_timeout_ms"));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.upstream_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
