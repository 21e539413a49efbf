//! Request lifecycle handler
//!
//! Create, update and delete of items: validation against the module's
//! form, value checks, persistence, lifecycle callbacks, relation links,
//! read cache invalidation, flash messages and the redirect decision.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod delete;
pub mod handler;
pub mod load;
pub mod params;
mod prelude;
pub mod save;

pub use delete::{DeleteResult, handle_delete};
pub use load::load_item;
pub use params::{FormParams, ItemParams, handle_params};
pub use save::{SaveResult, SaveTarget, handle_save, save_redirect};

// vim: ts=4
