//! Shared types, store traits, and error types for the Ringo CRUD framework.
//!
//! This crate holds everything that is shared between the feature crates
//! (listing, bundles, item lifecycle) and the storage adapters, so adapters
//! only depend on these definitions and not on the application crates.

pub mod auth;
pub mod error;
pub mod item;
pub mod item_store;
pub mod list;
pub mod module;
pub mod prelude;
pub mod session;
pub mod types;

// vim: ts=4
