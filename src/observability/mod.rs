//! Observability subsystem.
//!
//! Structured logging goes through `tracing` directly at the call sites; the
//! request id assigned at the edge flows into every event. This module holds
//! what needs shared state: the metrics recorder and its scrape endpoint.

pub mod metrics;
