//! Root crate facade for the softwrap engine.
//!
//! Re-exports `softwrap_core` so integration tests and downstream editors
//! depend on one crate name.

pub use softwrap_core::*;
