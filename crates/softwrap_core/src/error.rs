//! Error types for the wrap engine.
use thiserror::Error;

/// Errors surfaced by the wrap engine.
///
/// Cache reads never fail. Only wrapped-row lookups past the end of the
/// document and configuration validation return these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WrapError {
    #[error("wrapped index {index} is out of range ({total} wrapped lines)")]
    WrappedIndexOutOfRange { index: usize, total: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
