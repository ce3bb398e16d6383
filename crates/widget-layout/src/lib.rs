#![forbid(unsafe_code)]

//! Row packing and width assignment for dashboard widget cards.
//!
//! Dashboard widgets are persisted with a discrete size token (`sm` … `full`).
//! This crate turns an ordered list of those tokens and a container width
//! into rows of cards:
//!
//! - [`widget_width_assigner`] / [`WidgetPacker`] - greedy best-fit packing
//!   of widgets into rows that never exceed the container width
//! - [`WidthTable`] - size token to pixel width lookup
//! - [`stretch_row`] - widen packed cards to fill leftover row space
//! - [`LayoutPlanner`] - viewport validation, clamping, stacked fallback
//! - [`LayoutCache`] - memoized planning for resize-heavy callers
//! - [`LayoutConfig`] - container bounds, gap, and width table
//!
//! # Example
//!
//! ```
//! use widget_layout::{LayoutPlanner, LayoutMode, WidgetSize};
//!
//! let planner = LayoutPlanner::default();
//! let layout = planner
//!     .plan_tokens(["md", "md", "sm", "md", "lg", "sm"], 1360.0)
//!     .unwrap();
//!
//! assert_eq!(layout.mode, LayoutMode::Packed);
//! assert_eq!(layout.widget_count(), 6);
//! assert_eq!(
//!     layout.row_sizes()[0],
//!     vec![WidgetSize::Md, WidgetSize::Lg],
//! );
//! ```

pub mod assign;
pub mod cache;
pub mod config;
pub mod error;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod plan;
pub mod size;
pub mod stretch;

pub use assign::{PackedRow, PlacedWidget, WidgetPacker, widget_width_assigner};
pub use cache::{DEFAULT_CACHE_CAPACITY, LayoutCache, LayoutCacheStats};
pub use config::{
    LayoutConfig, LayoutConfigError, LayoutConfigParse, WIDGET_CONTAINER_MAX_WIDTH,
    WIDGET_CONTAINER_MIN_WIDTH,
};
pub use error::LayoutError;
pub use plan::{DashboardLayout, LayoutMode, LayoutPlanner, LayoutRow};
pub use size::{WidgetSize, WidthRange, WidthTable};
pub use stretch::{WidgetCell, stretch_row};
