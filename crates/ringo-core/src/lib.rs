//! Core infrastructure for Ringo.
//!
//! Holds the application state, the module registry with its lifecycle and
//! bundle hooks, the permission filter, form validation, the shared read
//! cache, the settings subsystem, the in-memory session store and the axum
//! glue (extractors and the session middleware) used by the feature crates.

pub mod app;
pub mod cache;
pub mod core_settings;
pub mod extract;
pub mod form;
pub mod message;
pub mod middleware;
pub mod perm;
pub mod prelude;
pub mod registry;
pub mod session;
pub mod settings;
pub mod value_check;

pub use app::{App, AppState};
pub use core_settings::register_settings;

// vim: ts=4
