//! Core wrap engine for softwrap (word wrapper, wrap cache, window resolver,
//! coordinate mapper).

/// Mutable line sequence with edit deltas.
pub mod buffer;
/// Per-line wrap cache and invalidation.
pub mod cache;
/// Configuration loading and defaults.
pub mod config;
/// Shared defaults.
pub mod constants;
/// Document/display coordinate mapping and vertical navigation.
pub mod coords;
/// Library error types.
pub mod error;
/// Read-only access to source lines.
pub mod source;
/// Viewport scroll clamp.
pub mod viewport;
/// Owned cache + viewport handle used by editor state.
pub mod view;
/// Visible window resolution.
pub mod window;
/// Pure line wrapping.
pub mod wrap;

pub use buffer::{LineBuffer, LineEdit};
pub use cache::{CacheStats, WrapCache, WrapSegment};
pub use config::WrapConfig;
pub use constants::*;
pub use coords::{DocPosition, WrappedLocation};
pub use error::WrapError;
pub use source::LineSource;
pub use view::WrapView;
pub use viewport::Viewport;
pub use wrap::wrap_line;
