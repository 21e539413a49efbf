pub use crate::app::App;
pub use ringo_types::prelude::*;
pub use ringo_types::session::SessionId;

// vim: ts=4
