pub use ringo_core::prelude::*;

// vim: ts=4
