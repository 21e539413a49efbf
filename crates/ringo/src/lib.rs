//! Ringo, a CRUD framework over a pluggable item store.
//!
//! This crate ties the feature crates together: the `AppBuilder` collects
//! the store, the modules and the settings overrides, bootstraps the default
//! roles and the administrator, and serves the route table.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub use ringo_core::{form, perm, registry, session, settings};
pub use ringo_types as types;

pub use ringo_bundle as bundle;
pub use ringo_item as item;
pub use ringo_list as list;

pub mod app;
pub mod bootstrap;
pub mod handler;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
