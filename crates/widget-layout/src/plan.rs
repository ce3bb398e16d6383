#![forbid(unsafe_code)]

//! Dashboard layout planning.
//!
//! [`LayoutPlanner`] is the entry point for dashboard rendering code. It
//! turns a measured viewport width and the persisted widget sizes into a
//! [`DashboardLayout`]:
//!
//! 1. The viewport width must be finite and positive. It is floored to whole
//!    pixels and clamped to `container_max_width`.
//! 2. Below `container_min_width` every widget gets its own row at the full
//!    container width ([`LayoutMode::Stacked`]).
//! 3. Otherwise widgets are packed into rows and stretched to fill them
//!    ([`LayoutMode::Packed`]).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | NaN / infinite / non-positive viewport | Bad measurement | `InvalidContainerWidth` |
//! | Size missing from the width table | Bad config | `UnknownWidgetSize` |
//! | Any of the above via [`LayoutPlanner::plan_or_stacked`] | | Stacked layout |

use serde::Serialize;

use crate::assign::WidgetPacker;
use crate::config::{LayoutConfig, LayoutConfigError};
use crate::error::LayoutError;
use crate::size::WidgetSize;
use crate::stretch::{WidgetCell, stretch_row};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// How a layout was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Best-fit rows, stretched to fill the container.
    Packed,
    /// One widget per row at the container width.
    Stacked,
}

/// A rendered row of widget cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LayoutRow {
    /// Cards in input order.
    pub cells: Vec<WidgetCell>,
    /// A single card wider than the container.
    pub overflow: bool,
}

/// Result of planning a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DashboardLayout {
    /// Effective container width after clamping.
    pub container_width: u32,
    pub mode: LayoutMode,
    pub rows: Vec<LayoutRow>,
}

impl DashboardLayout {
    /// Total number of cards across all rows.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    /// Size tokens of each row.
    #[must_use]
    pub fn row_sizes(&self) -> Vec<Vec<WidgetSize>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.size).collect())
            .collect()
    }

    /// Rendered widths of each row.
    #[must_use]
    pub fn row_widths(&self) -> Vec<Vec<u32>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.width).collect())
            .collect()
    }

    /// One widget per row, each at `container_width`.
    #[must_use]
    pub fn stacked(widgets: &[WidgetSize], container_width: u32) -> Self {
        let rows = widgets
            .iter()
            .enumerate()
            .map(|(index, &size)| LayoutRow {
                cells: vec![WidgetCell {
                    index,
                    size,
                    width: container_width,
                }],
                overflow: false,
            })
            .collect();
        Self {
            container_width,
            mode: LayoutMode::Stacked,
            rows,
        }
    }
}

/// Plans dashboard layouts from a [`LayoutConfig`].
#[derive(Debug, Clone, Default)]
pub struct LayoutPlanner {
    config: LayoutConfig,
}

impl LayoutPlanner {
    /// Create a planner.
    ///
    /// The config is used as given; call [`LayoutConfig::validate`] first,
    /// or use [`try_new`](Self::try_new), when it comes from user input.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Create a planner after validating `config`.
    pub fn try_new(config: LayoutConfig) -> Result<Self, Vec<LayoutConfigError>> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// The planner's configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Effective container width for a measured viewport width.
    pub fn container_width(&self, viewport_width: f64) -> Result<u32, LayoutError> {
        if !viewport_width.is_finite() || viewport_width <= 0.0 {
            return Err(LayoutError::InvalidContainerWidth {
                value: viewport_width,
            });
        }
        let max = self.config.container_max_width;
        Ok(viewport_width.min(f64::from(max)).floor() as u32)
    }

    /// Plan a layout for `widgets` in a viewport `viewport_width` pixels wide.
    pub fn plan(
        &self,
        widgets: &[WidgetSize],
        viewport_width: f64,
    ) -> Result<DashboardLayout, LayoutError> {
        let container_width = self.container_width(viewport_width)?;
        self.plan_at(widgets, container_width)
    }

    /// Like [`plan`](Self::plan), but parses size tokens first.
    pub fn plan_tokens<'a>(
        &self,
        tokens: impl IntoIterator<Item = &'a str>,
        viewport_width: f64,
    ) -> Result<DashboardLayout, LayoutError> {
        let widgets = WidgetSize::parse_all(tokens)?;
        self.plan(&widgets, viewport_width)
    }

    /// Plan a layout, falling back to a stacked layout on any error.
    ///
    /// An invalid viewport width stacks at `container_min_width`.
    #[must_use]
    pub fn plan_or_stacked(&self, widgets: &[WidgetSize], viewport_width: f64) -> DashboardLayout {
        match self.plan(widgets, viewport_width) {
            Ok(layout) => layout,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                warn!(error = %_err, widgets = widgets.len(), "layout failed; stacking widgets");
                let width = self
                    .container_width(viewport_width)
                    .unwrap_or(self.config.container_min_width);
                DashboardLayout::stacked(widgets, width)
            }
        }
    }

    /// Plan at an already-resolved container width.
    pub(crate) fn plan_at(
        &self,
        widgets: &[WidgetSize],
        container_width: u32,
    ) -> Result<DashboardLayout, LayoutError> {
        let table = &self.config.widths;
        if container_width < self.config.container_min_width {
            // Same errors at every width, even though stacking ignores widths.
            for &size in widgets {
                table.width(size)?;
            }
            #[cfg(feature = "tracing")]
            debug!(
                container_width,
                min = self.config.container_min_width,
                "container below minimum width; stacking widgets"
            );
            return Ok(DashboardLayout::stacked(widgets, container_width));
        }

        let gap = self.config.gap;
        let packed = WidgetPacker::new(table)
            .gap(gap)
            .pack(widgets, container_width)?;

        let mut rows = Vec::with_capacity(packed.len());
        for row in &packed {
            rows.push(LayoutRow {
                cells: stretch_row(row, table, container_width, gap)?,
                overflow: row.is_overflow(),
            });
        }

        #[cfg(feature = "tracing")]
        debug!(
            container_width,
            widgets = widgets.len(),
            rows = rows.len(),
            "planned dashboard layout"
        );

        Ok(DashboardLayout {
            container_width,
            mode: LayoutMode::Packed,
            rows,
        })
    }
}
