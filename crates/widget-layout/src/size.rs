#![forbid(unsafe_code)]

//! Widget size tokens and the size-to-pixel lookup table.
//!
//! A [`WidgetSize`] is a discrete token persisted with each dashboard widget.
//! The [`WidthTable`] maps every token to a [`WidthRange`]: the ordered pixel
//! widths a card of that size may render at. The first entry of a range is
//! the base width used for packing; the rest are stretch levels used to fill
//! leftover row space.
//!
//! | Token  | Default range (px)            |
//! |--------|-------------------------------|
//! | `sm`   | 320, 400, 480                 |
//! | `md`   | 480, 560, 640                 |
//! | `lg`   | 800, 880, 960                 |
//! | `xl`   | 1120, 1200, 1280              |
//! | `full` | container max width (1920)    |

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfigError, WIDGET_CONTAINER_MAX_WIDTH};
use crate::error::LayoutError;

/// Pixel distance between stretch levels in the default table.
const STRETCH_STEP: u32 = 80;
/// Levels per range in the default table, base included.
const STRETCH_LEVELS: u32 = 3;

/// Discrete widget width token.
///
/// Ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    /// Small card.
    Sm,
    /// Medium card.
    Md,
    /// Large card.
    Lg,
    /// Extra large card.
    Xl,
    /// Spans the whole container.
    Full,
}

impl WidgetSize {
    /// All sizes in ascending order.
    pub const ALL: [WidgetSize; 5] = [
        WidgetSize::Sm,
        WidgetSize::Md,
        WidgetSize::Lg,
        WidgetSize::Xl,
        WidgetSize::Full,
    ];

    /// Token as persisted in dashboard layouts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            WidgetSize::Sm => "sm",
            WidgetSize::Md => "md",
            WidgetSize::Lg => "lg",
            WidgetSize::Xl => "xl",
            WidgetSize::Full => "full",
        }
    }

    /// Base width in the default [`WidthTable`].
    #[must_use]
    pub const fn default_width(self) -> u32 {
        match self {
            WidgetSize::Sm => 320,
            WidgetSize::Md => 480,
            WidgetSize::Lg => 800,
            WidgetSize::Xl => 1120,
            WidgetSize::Full => WIDGET_CONTAINER_MAX_WIDTH,
        }
    }

    /// Parse a size token. Surrounding whitespace and case are ignored.
    pub fn parse(token: &str) -> Result<Self, LayoutError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "sm" => Ok(WidgetSize::Sm),
            "md" => Ok(WidgetSize::Md),
            "lg" => Ok(WidgetSize::Lg),
            "xl" => Ok(WidgetSize::Xl),
            "full" => Ok(WidgetSize::Full),
            _ => Err(LayoutError::unknown_size(token)),
        }
    }

    /// Parse a whole sequence of tokens, failing on the first unknown one.
    pub fn parse_all<'a>(
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<Self>, LayoutError> {
        tokens.into_iter().map(Self::parse).collect()
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WidgetSize {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Ordered pixel widths a widget size may render at.
///
/// Non-empty, every width positive, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct WidthRange {
    widths: Vec<u32>,
}

impl WidthRange {
    /// Build a range from ascending positive widths.
    pub fn new(widths: impl IntoIterator<Item = u32>) -> Result<Self, LayoutConfigError> {
        let widths: Vec<u32> = widths.into_iter().collect();
        if widths.is_empty() {
            return Err(LayoutConfigError::new(
                "width_range",
                "[]",
                "expected at least one width",
            ));
        }
        if widths.contains(&0) {
            return Err(LayoutConfigError::new(
                "width_range",
                format!("{widths:?}"),
                "widths must be positive",
            ));
        }
        if widths.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(LayoutConfigError::new(
                "width_range",
                format!("{widths:?}"),
                "widths must be ascending",
            ));
        }
        Ok(Self { widths })
    }

    /// A single fixed width (no stretch levels).
    ///
    /// A zero width is raised to 1.
    #[must_use]
    pub fn fixed(width: u32) -> Self {
        Self {
            widths: vec![width.max(1)],
        }
    }

    /// `levels` widths starting at `base`, `step` pixels apart.
    fn stepped(base: u32, step: u32, levels: u32) -> Self {
        Self {
            widths: (0..levels).map(|i| base + i * step).collect(),
        }
    }

    /// Width used for packing.
    #[inline]
    #[must_use]
    pub fn base(&self) -> u32 {
        self.widths[0]
    }

    /// Widest stretch level.
    #[inline]
    #[must_use]
    pub fn max(&self) -> u32 {
        self.widths[self.widths.len() - 1]
    }

    /// Width at a stretch level, if the range has that many levels.
    #[inline]
    #[must_use]
    pub fn level(&self, level: usize) -> Option<u32> {
        self.widths.get(level).copied()
    }

    /// Number of levels (including the base).
    #[inline]
    #[must_use]
    pub fn levels(&self) -> usize {
        self.widths.len()
    }

    /// All widths, ascending.
    #[inline]
    #[must_use]
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }
}

impl TryFrom<Vec<u32>> for WidthRange {
    type Error = LayoutConfigError;

    fn try_from(widths: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(widths)
    }
}

impl From<WidthRange> for Vec<u32> {
    fn from(range: WidthRange) -> Self {
        range.widths
    }
}

/// Lookup table from [`WidgetSize`] to [`WidthRange`].
///
/// Tables may be partial: a lookup for a missing token yields
/// [`LayoutError::UnknownWidgetSize`] rather than a silent default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidthTable {
    ranges: FxHashMap<WidgetSize, WidthRange>,
}

impl Default for WidthTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for size in WidgetSize::ALL {
            let range = match size {
                // Always rendered at the container width; no stretch levels.
                WidgetSize::Full => WidthRange::fixed(size.default_width()),
                _ => WidthRange::stepped(size.default_width(), STRETCH_STEP, STRETCH_LEVELS),
            };
            table.insert(size, range);
        }
        table
    }
}

impl WidthTable {
    /// A table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ranges: FxHashMap::default(),
        }
    }

    /// Add or replace the range for a size.
    #[must_use]
    pub fn with(mut self, size: WidgetSize, range: WidthRange) -> Self {
        self.insert(size, range);
        self
    }

    /// Add or replace the range for a size in place.
    pub fn insert(&mut self, size: WidgetSize, range: WidthRange) {
        self.ranges.insert(size, range);
    }

    /// Range for a size.
    pub fn range(&self, size: WidgetSize) -> Result<&WidthRange, LayoutError> {
        self.ranges
            .get(&size)
            .ok_or_else(|| LayoutError::unknown_size(size.label()))
    }

    /// Base (packing) width for a size.
    pub fn width(&self, size: WidgetSize) -> Result<u32, LayoutError> {
        self.range(size).map(WidthRange::base)
    }

    /// Whether the table has an entry for `size`.
    #[must_use]
    pub fn contains(&self, size: WidgetSize) -> bool {
        self.ranges.contains_key(&size)
    }

    /// Check that base widths strictly increase in token order.
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        let mut previous: Option<(WidgetSize, u32)> = None;
        for size in WidgetSize::ALL {
            let Some(range) = self.ranges.get(&size) else {
                continue;
            };
            if let Some((prev_size, prev_width)) = previous {
                if range.base() <= prev_width {
                    return Err(LayoutConfigError::new(
                        "width_table",
                        format!("{prev_size}={prev_width}, {size}={}", range.base()),
                        "base widths must increase from sm to full",
                    ));
                }
            }
            previous = Some((size, range.base()));
        }
        Ok(())
    }
}
