//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_GUTTER_COLUMNS, DEFAULT_MIN_WRAP_WIDTH, DEFAULT_RESERVED_ROWS, ENV_GUTTER_COLUMNS,
    ENV_MIN_WRAP_WIDTH, ENV_RESERVED_ROWS,
};
use crate::error::WrapError;
use serde::Deserialize;
use std::env;
use tracing::warn;

/// How terminal dimensions turn into a wrap width and a viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    /// Floor for the derived wrap width.
    pub min_wrap_width: usize,
    /// Columns subtracted from the terminal width.
    pub gutter_columns: usize,
    /// Rows subtracted from the terminal height.
    pub reserved_rows: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            min_wrap_width: DEFAULT_MIN_WRAP_WIDTH,
            gutter_columns: DEFAULT_GUTTER_COLUMNS,
            reserved_rows: DEFAULT_RESERVED_ROWS,
        }
    }
}

fn parse_or_default<F>(lookup: &F, name: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                variable = name,
                value = %raw,
                default,
                "ignoring unparsable configuration value"
            );
            default
        }
    }
}

impl WrapConfig {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`WrapConfig`] with defaults applied when env vars are
    /// missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injected variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            min_wrap_width: parse_or_default(&lookup, ENV_MIN_WRAP_WIDTH, DEFAULT_MIN_WRAP_WIDTH),
            gutter_columns: parse_or_default(&lookup, ENV_GUTTER_COLUMNS, DEFAULT_GUTTER_COLUMNS),
            reserved_rows: parse_or_default(&lookup, ENV_RESERVED_ROWS, DEFAULT_RESERVED_ROWS),
        }
    }

    /// Reject configurations that cannot produce a usable wrap width.
    ///
    /// # Errors
    /// [`WrapError::InvalidConfig`] when `min_wrap_width` is zero.
    pub fn validate(&self) -> Result<(), WrapError> {
        if self.min_wrap_width == 0 {
            return Err(WrapError::InvalidConfig(
                "min_wrap_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Wrap width for a terminal `total_width` columns wide.
    pub fn wrap_width_for(&self, total_width: usize) -> usize {
        total_width
            .saturating_sub(self.gutter_columns)
            .max(self.min_wrap_width)
            .max(1)
    }

    /// Viewport height for a terminal `total_height` rows tall.
    pub fn visible_height_for(&self, total_height: usize) -> usize {
        total_height.saturating_sub(self.reserved_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_variables_use_defaults() {
        let config = WrapConfig::from_lookup(|_| None);
        assert_eq!(config, WrapConfig::default());
        assert_eq!(config.min_wrap_width, 20);
        assert_eq!(config.gutter_columns, 2);
        assert_eq!(config.reserved_rows, 2);
    }

    #[test]
    fn variables_override_defaults() {
        let config = WrapConfig::from_lookup(lookup_from(&[
            (ENV_MIN_WRAP_WIDTH, " 12 "),
            (ENV_GUTTER_COLUMNS, "0"),
            (ENV_RESERVED_ROWS, "1"),
        ]));
        assert_eq!(
            config,
            WrapConfig {
                min_wrap_width: 12,
                gutter_columns: 0,
                reserved_rows: 1,
            }
        );
    }

    #[test]
    fn unparsable_values_fall_back_per_field() {
        let config = WrapConfig::from_lookup(lookup_from(&[
            (ENV_MIN_WRAP_WIDTH, "wide"),
            (ENV_GUTTER_COLUMNS, "-3"),
            (ENV_RESERVED_ROWS, "4"),
        ]));
        assert_eq!(config.min_wrap_width, DEFAULT_MIN_WRAP_WIDTH);
        assert_eq!(config.gutter_columns, DEFAULT_GUTTER_COLUMNS);
        assert_eq!(config.reserved_rows, 4);
    }

    #[test]
    fn derived_dimensions_follow_terminal_size() {
        struct Case {
            total: usize,
            width: usize,
            height: usize,
        }

        let config = WrapConfig::default();
        let cases = [
            Case { total: 80, width: 78, height: 78 },
            Case { total: 22, width: 20, height: 20 },
            Case { total: 10, width: 20, height: 8 },
            Case { total: 1, width: 20, height: 0 },
        ];
        for case in cases {
            assert_eq!(config.wrap_width_for(case.total), case.width, "total: {}", case.total);
            assert_eq!(
                config.visible_height_for(case.total),
                case.height,
                "total: {}",
                case.total
            );
        }
    }

    #[test]
    fn validate_rejects_zero_floor() {
        assert!(WrapConfig::default().validate().is_ok());
        let config = WrapConfig {
            min_wrap_width: 0,
            ..WrapConfig::default()
        };
        assert!(matches!(config.validate(), Err(WrapError::InvalidConfig(_))));
    }
}
