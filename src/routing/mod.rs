//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → table.rs (scan route entries)
//!     → pattern.rs (match path shape, bind variables)
//!     → Return: RouteMatch { entry, params } or None
//! ```
//!
//! # Design Decisions
//! - The table is declarative data, not per-endpoint handlers; one
//!   dispatcher algorithm serves every route
//! - Routes are fixed at startup and immutable at runtime
//! - By construction no two entries can match the same request

pub mod pattern;
pub mod table;

pub use pattern::PathPattern;
pub use table::{Backend, RouteEntry, RouteMatch, RouteTable};
