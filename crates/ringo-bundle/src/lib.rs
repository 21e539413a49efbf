//! Bundle action dispatcher
//!
//! Applies one action to a multi-selection of items. The selection is
//! remembered per session and module, filtered by the permission filter and
//! handed to the bundle handler registered for the action.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod delete;
pub mod dispatch;
pub mod handler;
mod prelude;

pub use delete::register;
pub use dispatch::{BundleOutcome, BundleRequest, bundle_dispatch, clear_bundle};

// vim: ts=4
