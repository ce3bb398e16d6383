#![forbid(unsafe_code)]

//! Layout configuration: container bounds, gap, and the width table.
//!
//! Defaults match the dashboard console. Hosts may override the scalar
//! settings through environment variables or deserialize a full
//! [`LayoutConfig`] from their own settings file.
//!
//! | Env var                               | Field                 | Default |
//! |---------------------------------------|-----------------------|---------|
//! | `WIDGET_LAYOUT_CONTAINER_MIN_WIDTH`   | `container_min_width` | 800     |
//! | `WIDGET_LAYOUT_CONTAINER_MAX_WIDTH`   | `container_max_width` | 1920    |
//! | `WIDGET_LAYOUT_GAP`                   | `gap`                 | 0       |

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::size::WidthTable;

/// Narrowest container that still gets a packed layout.
pub const WIDGET_CONTAINER_MIN_WIDTH: u32 = 800;
/// Widest container; wider viewports are clamped to this.
pub const WIDGET_CONTAINER_MAX_WIDTH: u32 = 1920;

const ENV_CONTAINER_MIN_WIDTH: &str = "WIDGET_LAYOUT_CONTAINER_MIN_WIDTH";
const ENV_CONTAINER_MAX_WIDTH: &str = "WIDGET_LAYOUT_CONTAINER_MAX_WIDTH";
const ENV_GAP: &str = "WIDGET_LAYOUT_GAP";

/// Configuration for [`LayoutPlanner`](crate::LayoutPlanner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Below this width the planner stacks one widget per row.
    pub container_min_width: u32,
    /// Viewports wider than this are clamped.
    pub container_max_width: u32,
    /// Horizontal gap between adjacent widgets in a row.
    pub gap: u32,
    /// Size-to-pixel lookup.
    pub widths: WidthTable,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            container_min_width: WIDGET_CONTAINER_MIN_WIDTH,
            container_max_width: WIDGET_CONTAINER_MAX_WIDTH,
            gap: 0,
            widths: WidthTable::default(),
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct LayoutConfigParse {
    pub config: LayoutConfig,
    pub errors: Vec<LayoutConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl LayoutConfigError {
    pub(crate) fn new(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for LayoutConfigError {}

impl LayoutConfig {
    /// Parse config from environment variables.
    ///
    /// Unparseable values are ignored and the default is kept.
    #[must_use]
    pub fn from_env() -> LayoutConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> LayoutConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Set the gap between adjacent widgets.
    #[must_use]
    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the container bounds.
    #[must_use]
    pub fn with_container_bounds(mut self, min: u32, max: u32) -> Self {
        self.container_min_width = min;
        self.container_max_width = max;
        self
    }

    /// Replace the width table.
    #[must_use]
    pub fn with_widths(mut self, widths: WidthTable) -> Self {
        self.widths = widths;
        self
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<LayoutConfigError>> {
        let mut errors = Vec::new();
        if self.container_min_width == 0 {
            errors.push(LayoutConfigError::new(
                "container_min_width",
                "0",
                "expected positive integer",
            ));
        }
        if self.container_max_width < self.container_min_width {
            errors.push(LayoutConfigError::new(
                "container_max_width",
                self.container_max_width.to_string(),
                format!(
                    "must be >= container_min_width ({})",
                    self.container_min_width
                ),
            ));
        }
        if let Err(err) = self.widths.validate() {
            errors.push(err);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn from_env_with<F>(mut get: F) -> LayoutConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = LayoutConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_CONTAINER_MIN_WIDTH) {
        match parse_positive(&value) {
            Some(parsed) => config.container_min_width = parsed,
            None => errors.push(LayoutConfigError::new(
                "container_min_width",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_CONTAINER_MAX_WIDTH) {
        match parse_positive(&value) {
            Some(parsed) => config.container_max_width = parsed,
            None => errors.push(LayoutConfigError::new(
                "container_max_width",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_GAP) {
        match value.trim().parse::<u32>() {
            Ok(parsed) => config.gap = parsed,
            Err(_) => errors.push(LayoutConfigError::new(
                "gap",
                value,
                "expected non-negative integer",
            )),
        }
    }

    if let Err(mut violations) = config.validate() {
        errors.append(&mut violations);
    }

    LayoutConfigParse { config, errors }
}

fn parse_positive(value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(parsed) => Some(parsed),
    }
}
