//! List builder
//!
//! Builds permission filtered listings of a module. Search, sorting and
//! pagination are resolved from the request and the per-session list state,
//! then the items are loaded either with an optimized store query or by
//! filtering and sorting the full permitted collection in memory.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod build;
pub mod handler;
pub mod paginate;
pub mod params;
mod prelude;
pub mod saved;
pub mod search;
pub mod settings;
pub mod sort;

pub use build::{Listing, list_build, rest_list};
pub use params::ListParams;
pub use settings::register_settings;

// vim: ts=4
