//! Shared constants used across softwrap crates.

/// Narrowest wrap width a terminal-derived width is floored to.
pub const DEFAULT_MIN_WRAP_WIDTH: usize = 20;

/// Columns subtracted from the terminal width before wrapping.
pub const DEFAULT_GUTTER_COLUMNS: usize = 2;

/// Rows reserved below the text area (status bar + command line).
pub const DEFAULT_RESERVED_ROWS: usize = 2;

/// Marker painted on viewport rows past the end of the document.
pub const EMPTY_ROW_INDICATOR: &str = "~";

/// Environment variable overriding [`DEFAULT_MIN_WRAP_WIDTH`].
pub const ENV_MIN_WRAP_WIDTH: &str = "SOFTWRAP_MIN_WRAP_WIDTH";
/// Environment variable overriding [`DEFAULT_GUTTER_COLUMNS`].
pub const ENV_GUTTER_COLUMNS: &str = "SOFTWRAP_GUTTER_COLUMNS";
/// Environment variable overriding [`DEFAULT_RESERVED_ROWS`].
pub const ENV_RESERVED_ROWS: &str = "SOFTWRAP_RESERVED_ROWS";
