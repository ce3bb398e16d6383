#![forbid(unsafe_code)]

//! Widen packed widgets to use leftover row space.
//!
//! Packing only looks at base widths, so most rows end with unused pixels.
//! Stretching walks the stretch levels of each widget's [`WidthRange`]
//! (level 1 for every widget, then level 2, ...) and raises a widget to the
//! next level whenever the row still fits. A `full` widget takes whatever is
//! left after that, so a lone `full` card spans the container exactly.
//!
//! Overflow rows are not stretched: the lone widget keeps its base width,
//! except `full`, which always renders at the container width.
//!
//! [`WidthRange`]: crate::WidthRange

use serde::Serialize;

use crate::assign::PackedRow;
use crate::error::LayoutError;
use crate::size::{WidgetSize, WidthTable};

/// A widget with its final rendered width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WidgetCell {
    /// Position in the input sequence.
    pub index: usize,
    /// Size token.
    pub size: WidgetSize,
    /// Rendered width in pixels.
    pub width: u32,
}

/// Assign rendered widths to the widgets of one packed row.
pub fn stretch_row(
    row: &PackedRow,
    table: &WidthTable,
    container_width: u32,
    gap: u32,
) -> Result<Vec<WidgetCell>, LayoutError> {
    let mut cells: Vec<WidgetCell> = row
        .widgets()
        .iter()
        .map(|w| WidgetCell {
            index: w.index,
            size: w.size,
            width: w.width,
        })
        .collect();

    if row.is_overflow() {
        for cell in &mut cells {
            if cell.size == WidgetSize::Full {
                cell.width = container_width;
            }
        }
        return Ok(cells);
    }

    let gaps = gap.saturating_mul(cells.len().saturating_sub(1) as u32);
    let available = container_width.saturating_sub(gaps);
    let total = cells.iter().fold(0u32, |sum, c| sum.saturating_add(c.width));
    // Packed for a wider container or another table: leave at base widths.
    let Some(mut slack) = available.checked_sub(total) else {
        return Ok(cells);
    };

    let mut ranges = Vec::with_capacity(cells.len());
    for cell in &cells {
        ranges.push(table.range(cell.size)?);
    }
    let max_levels = ranges.iter().map(|r| r.levels()).max().unwrap_or(0);

    for level in 1..max_levels {
        for (cell, range) in cells.iter_mut().zip(&ranges) {
            if cell.size == WidgetSize::Full {
                continue;
            }
            let Some(next) = range.level(level) else {
                continue;
            };
            if next <= cell.width {
                continue;
            }
            let grow = next - cell.width;
            if grow <= slack {
                cell.width = next;
                slack -= grow;
            }
        }
    }

    if let Some(full) = cells.iter_mut().find(|c| c.size == WidgetSize::Full) {
        full.width = full.width.saturating_add(slack);
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::WidgetPacker;
    use crate::size::WidthRange;
    use crate::size::WidgetSize::{Full, Lg, Md, Sm, Xl};

    fn stretched(widgets: &[WidgetSize], container_width: u32, gap: u32) -> Vec<Vec<u32>> {
        let table = WidthTable::default();
        WidgetPacker::new(&table)
            .gap(gap)
            .pack(widgets, container_width)
            .unwrap()
            .iter()
            .map(|row| {
                stretch_row(row, &table, container_width, gap)
                    .unwrap()
                    .iter()
                    .map(|c| c.width)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn lone_small_widget_grows_to_its_max() {
        assert_eq!(stretched(&[Sm], 1360, 0), vec![vec![480]]);
    }

    #[test]
    fn earlier_widgets_grow_first() {
        assert_eq!(
            stretched(&[Md, Md, Sm, Md, Lg, Sm], 1360, 0),
            vec![vec![560, 800], vec![560, 320, 480], vec![480]]
        );
    }

    #[test]
    fn levels_are_spread_before_climbing() {
        // Both reach 400 (800 total); a third step would need 880.
        assert_eq!(stretched(&[Sm, Sm], 850, 0), vec![vec![400, 400]]);
        assert_eq!(stretched(&[Sm, Sm], 900, 0), vec![vec![480, 400]]);
        assert_eq!(stretched(&[Sm, Sm], 1000, 0), vec![vec![480, 480]]);
    }

    #[test]
    fn gaps_reduce_stretch_room() {
        assert_eq!(stretched(&[Sm, Sm], 900, 20), vec![vec![480, 400]]);
        assert_eq!(stretched(&[Sm, Sm], 900, 100), vec![vec![400, 400]]);
        assert_eq!(stretched(&[Sm, Sm], 900, 200), vec![vec![320, 320]]);
    }

    #[test]
    fn full_widget_spans_container() {
        assert_eq!(stretched(&[Full], 1920, 0), vec![vec![1920]]);
        // Overflowing full is clamped to the container.
        assert_eq!(stretched(&[Full], 1360, 0), vec![vec![1360]]);
    }

    #[test]
    fn overflow_row_keeps_base_width() {
        assert_eq!(stretched(&[Xl], 1000, 0), vec![vec![1120]]);
    }

    #[test]
    fn full_takes_leftover_when_sharing_a_row() {
        let table = WidthTable::default()
            .with(Sm, WidthRange::new([200, 250]).unwrap())
            .with(Md, WidthRange::new([300, 350]).unwrap())
            .with(Lg, WidthRange::new([400, 450]).unwrap())
            .with(Xl, WidthRange::new([500, 550]).unwrap())
            .with(Full, WidthRange::fixed(600));
        let packer = WidgetPacker::new(&table);
        let rows = packer.pack(&[Sm, Full], 1000).unwrap();
        assert_eq!(rows.len(), 1);
        let cells = stretch_row(&rows[0], &table, 1000, 0).unwrap();
        assert_eq!(cells[0].width, 250);
        assert_eq!(cells[1].width, 750);
    }

    #[test]
    fn row_wider_than_container_keeps_base_widths() {
        let table = WidthTable::default().with(Full, WidthRange::fixed(600));
        let rows = WidgetPacker::new(&table).pack(&[Sm, Full], 1920).unwrap();
        assert_eq!(rows.len(), 1);
        let cells = stretch_row(&rows[0], &table, 800, 0).unwrap();
        let widths: Vec<u32> = cells.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![320, 600]);

        let cells = stretch_row(&rows[0], &table, 800, 5000).unwrap();
        assert_eq!(cells.iter().map(|c| c.width).sum::<u32>(), 920);
    }

    #[test]
    fn narrower_table_never_shrinks_packed_widths() {
        let wide = WidthTable::default().with(Sm, WidthRange::fixed(500));
        let rows = WidgetPacker::new(&wide).pack(&[Sm, Md], 1360).unwrap();
        let cells = stretch_row(&rows[0], &WidthTable::default(), 1360, 0).unwrap();
        // sm stays at 500; md climbs from 480 to 640.
        let widths: Vec<u32> = cells.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![500, 640]);
    }

    #[test]
    fn stretched_rows_never_exceed_container() {
        for width in [800, 1024, 1360, 1600, 1920] {
            for gap in [0, 16] {
                let widgets = [Md, Sm, Lg, Sm, Md, Xl, Sm, Sm, Full, Md];
                let table = WidthTable::default();
                let rows = WidgetPacker::new(&table).gap(gap).pack(&widgets, width).unwrap();
                for row in rows.iter().filter(|r| !r.is_overflow()) {
                    let cells = stretch_row(row, &table, width, gap).unwrap();
                    let gaps = gap * (cells.len() as u32 - 1);
                    let total: u32 = cells.iter().map(|c| c.width).sum::<u32>() + gaps;
                    assert!(total <= width, "row {cells:?} is {total} wide in {width}");
                    for (cell, placed) in cells.iter().zip(row.widgets()) {
                        assert!(cell.width >= placed.width);
                    }
                }
            }
        }
    }
}
