#![forbid(unsafe_code)]

//! Greedy best-fit packing of widget cards into rows.
//!
//! # Algorithm
//!
//! Widgets wait in a queue kept in dashboard order. Every row starts with
//! the full container width and is filled by repeatedly pulling the widest
//! waiting widget that still fits the remaining space, the first slot
//! included. Equal widths go to the earliest widget. When nothing fits, the
//! row closes and its widgets are put back in dashboard order.
//!
//! When not even an empty row can hold any waiting widget, the earliest one
//! is placed alone in an overflow row instead of being dropped.
//!
//! # Invariants
//!
//! 1. Every input widget appears in exactly one row.
//! 2. No row is empty; empty input produces no rows.
//! 3. A non-overflow row's widths plus gaps sum to at most the container
//!    width.
//! 4. Widgets inside a row are ordered by input index.
//! 5. Output depends only on the input (no hidden state).
//!
//! # Example
//!
//! ```
//! use widget_layout::{WidgetSize, widget_width_assigner};
//!
//! let rows = widget_width_assigner(
//!     &[WidgetSize::Lg, WidgetSize::Md, WidgetSize::Sm],
//!     1200,
//! );
//! // The `sm` card is pulled up to fill the space beside the `lg` card.
//! assert_eq!(
//!     rows,
//!     vec![vec![WidgetSize::Lg, WidgetSize::Sm], vec![WidgetSize::Md]],
//! );
//! ```

use serde::Serialize;

use crate::error::LayoutError;
use crate::size::{WidgetSize, WidthTable};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// A widget assigned to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlacedWidget {
    /// Position in the input sequence.
    pub index: usize,
    /// Size token.
    pub size: WidgetSize,
    /// Base width used for packing.
    pub width: u32,
}

/// One packed row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackedRow {
    widgets: Vec<PlacedWidget>,
    used_width: u32,
    overflow: bool,
}

impl PackedRow {
    /// Widgets in input order.
    #[inline]
    #[must_use]
    pub fn widgets(&self) -> &[PlacedWidget] {
        &self.widgets
    }

    /// Size tokens in input order.
    #[must_use]
    pub fn sizes(&self) -> Vec<WidgetSize> {
        self.widgets.iter().map(|w| w.size).collect()
    }

    /// Input indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.widgets.iter().map(|w| w.index)
    }

    /// Number of widgets in the row.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Always false for rows produced by [`WidgetPacker`].
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Sum of base widths plus the gaps between them.
    #[inline]
    #[must_use]
    pub fn used_width(&self) -> u32 {
        self.used_width
    }

    /// True when the row holds a single widget wider than the container.
    #[inline]
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        self.overflow
    }
}

/// Packs widget sequences into rows using a [`WidthTable`].
#[derive(Debug, Clone, Copy)]
pub struct WidgetPacker<'a> {
    table: &'a WidthTable,
    gap: u32,
}

impl<'a> WidgetPacker<'a> {
    /// Create a packer with no gap between widgets.
    #[must_use]
    pub fn new(table: &'a WidthTable) -> Self {
        Self { table, gap: 0 }
    }

    /// Set the horizontal gap between adjacent widgets.
    #[must_use]
    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Pack `widgets` into rows no wider than `container_width`.
    ///
    /// Fails with [`LayoutError::UnknownWidgetSize`] if the table has no
    /// entry for one of the sizes. A zero container width puts every widget
    /// in its own overflow row.
    pub fn pack(
        &self,
        widgets: &[WidgetSize],
        container_width: u32,
    ) -> Result<Vec<PackedRow>, LayoutError> {
        let queue = widgets
            .iter()
            .enumerate()
            .map(|(index, &size)| {
                Ok(PlacedWidget {
                    index,
                    size,
                    width: self.table.width(size)?,
                })
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;
        Ok(pack_queue(queue, container_width, self.gap))
    }
}

/// Pack `widgets` with the default width table and no gap.
///
/// Returns the size tokens of each row; see the [module docs](self) for the
/// placement rules. Empty input yields no rows.
#[must_use]
pub fn widget_width_assigner(widgets: &[WidgetSize], container_width: u32) -> Vec<Vec<WidgetSize>> {
    let queue = widgets
        .iter()
        .enumerate()
        .map(|(index, &size)| PlacedWidget {
            index,
            size,
            width: size.default_width(),
        })
        .collect();
    pack_queue(queue, container_width, 0)
        .iter()
        .map(PackedRow::sizes)
        .collect()
}

fn pack_queue(mut queue: Vec<PlacedWidget>, container_width: u32, gap: u32) -> Vec<PackedRow> {
    let total = queue.len();
    let mut rows = Vec::new();

    while !queue.is_empty() {
        let Some(pos) = best_fit(&queue, container_width, 0) else {
            let lone = queue.remove(0);
            #[cfg(feature = "tracing")]
            warn!(
                index = lone.index,
                size = lone.size.label(),
                width = lone.width,
                container_width,
                "widget wider than container; placed alone"
            );
            rows.push(PackedRow {
                used_width: lone.width,
                widgets: vec![lone],
                overflow: true,
            });
            continue;
        };

        let opener = queue.remove(pos);
        let mut remaining = container_width - opener.width;
        let mut row = vec![opener];
        while let Some(pos) = best_fit(&queue, remaining, gap) {
            let picked = queue.remove(pos);
            remaining -= picked.width + gap;
            row.push(picked);
        }
        row.sort_by_key(|w| w.index);

        rows.push(PackedRow {
            widgets: row,
            used_width: container_width - remaining,
            overflow: false,
        });
    }

    #[cfg(feature = "tracing")]
    debug!(
        widgets = total,
        rows = rows.len(),
        container_width,
        gap,
        "packed widget rows"
    );
    debug_assert_eq!(rows.iter().map(PackedRow::len).sum::<usize>(), total);

    rows
}

/// Queue position of the widest widget whose width plus `gap` fits in
/// `remaining`. Ties keep the earliest position.
fn best_fit(queue: &[PlacedWidget], remaining: u32, gap: u32) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (pos, widget) in queue.iter().enumerate() {
        if widget.width.saturating_add(gap) > remaining {
            continue;
        }
        match best {
            Some((_, width)) if width >= widget.width => {}
            _ => best = Some((pos, widget.width)),
        }
    }
    best.map(|(pos, _)| pos)
}
