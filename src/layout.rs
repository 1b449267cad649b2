//! # Page Layout Engine
//!
//! Places labels on a simulated US Letter sheet.
//!
//! ## Geometry
//!
//! ```text
//! ├0.25┼──────────── 8.0in usable ────────────┼0.25┤
//! ┌─────────────────────────────────────────────────┐ ┬
//! │    ┌────────┐ ┌────────┐ ┌────────┐             │ 0.25in
//! │    │   0    │ │   1    │ │   2    │  ← row gap  │
//! │    └────────┘ └────────┘ └────────┘    0.03in   │
//! │    ┌────────┐ ┌────────┐ ┌────────┐             │
//! │    │   3    │ │   4    │ │   5    │             │
//! │    └────────┘ └────────┘ └────────┘             │
//! │       ↑ column gap: 0.01in (3 cols) / 0.2in (2) │ 11in
//! ```
//!
//! Labels wider than 2.7in switch the sheet to two columns. The threshold is
//! fixed: between 2.66in and 2.7in three columns run slightly past the 8.0in
//! usable width into the margin, which [`SheetLayout::overflow_x_in`]
//! reports. The grid is centered horizontally and grows downward without
//! explicit page breaks; the browser spills a tall sheet onto further pages
//! when printing.

use serde::Serialize;

use crate::settings::LabelSize;

/// Label widths strictly greater than this use two columns
pub const TWO_COLUMN_THRESHOLD_IN: f64 = 2.7;

/// Column gap when the sheet has two columns
pub const WIDE_COLUMN_GAP_IN: f64 = 0.2;

/// Column gap when the sheet has three columns
pub const NARROW_COLUMN_GAP_IN: f64 = 0.01;

/// Gap between rows, independent of column count
pub const ROW_GAP_IN: f64 = 0.03;

/// Tolerance for float comparisons on inch values
const EPSILON_IN: f64 = 1e-9;

// ============================================================================
// PAGE
// ============================================================================

/// A physical page with uniform margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    pub width_in: f64,
    pub height_in: f64,
    pub margin_in: f64,
}

impl PageSpec {
    /// US Letter, 8.5in × 11in with 0.25in margins.
    pub const LETTER: Self = Self {
        width_in: 8.5,
        height_in: 11.0,
        margin_in: 0.25,
    };

    /// Width available to labels inside the margins.
    #[inline]
    pub fn usable_width_in(&self) -> f64 {
        self.width_in - 2.0 * self.margin_in
    }

    /// Height available to labels inside the margins.
    #[inline]
    pub fn usable_height_in(&self) -> f64 {
        self.height_in - 2.0 * self.margin_in
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::LETTER
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Number of columns for a given label width.
///
/// ## Example
///
/// ```
/// use slabel::layout::column_count;
///
/// assert_eq!(column_count(2.65), 3);
/// assert_eq!(column_count(2.7), 3);
/// assert_eq!(column_count(2.71), 2);
/// ```
pub fn column_count(width_in: f64) -> usize {
    if width_in > TWO_COLUMN_THRESHOLD_IN { 2 } else { 3 }
}

/// Column count, spacing, and cell size derived from the label size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub columns: usize,
    pub column_gap_in: f64,
    pub row_gap_in: f64,
    pub cell_width_in: f64,
    pub cell_height_in: f64,
}

impl GridSpec {
    /// Derive the grid for a label size.
    pub fn for_label(size: LabelSize) -> Self {
        let columns = column_count(size.width_in);
        let column_gap_in = if columns == 2 {
            WIDE_COLUMN_GAP_IN
        } else {
            NARROW_COLUMN_GAP_IN
        };
        Self {
            columns,
            column_gap_in,
            row_gap_in: ROW_GAP_IN,
            cell_width_in: size.width_in,
            cell_height_in: size.height_in,
        }
    }

    /// Total width of one full row of cells including gaps.
    pub fn content_width_in(&self) -> f64 {
        let cols = self.columns as f64;
        cols * self.cell_width_in + (cols - 1.0).max(0.0) * self.column_gap_in
    }

    /// Total height of `rows` rows including gaps.
    pub fn content_height_in(&self, rows: usize) -> f64 {
        if rows == 0 {
            return 0.0;
        }
        let rows = rows as f64;
        rows * self.cell_height_in + (rows - 1.0) * self.row_gap_in
    }

    /// Distance from one column's left edge to the next.
    #[inline]
    pub fn column_pitch_in(&self) -> f64 {
        self.cell_width_in + self.column_gap_in
    }

    /// Distance from one row's top edge to the next.
    #[inline]
    pub fn row_pitch_in(&self) -> f64 {
        self.cell_height_in + self.row_gap_in
    }

    /// Number of rows needed for `count` labels.
    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns)
    }
}

// ============================================================================
// SHEET LAYOUT
// ============================================================================

/// One label's position on the sheet. Coordinates are the cell's top-left
/// corner measured from the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub x_in: f64,
    pub y_in: f64,
}

/// The complete placement of a label list on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLayout {
    pub page: PageSpec,
    pub grid: GridSpec,
    /// Rows in use (0 for an empty sheet)
    pub rows: usize,
    /// Left edge of the first column
    pub origin_x_in: f64,
    /// Top edge of the first row
    pub origin_y_in: f64,
    /// How far a full row extends past the usable width (0 when it fits)
    pub overflow_x_in: f64,
    /// Rows that fit on the first physical page
    pub rows_per_page: usize,
    /// Physical pages the printed sheet will occupy (at least 1)
    pub page_count: usize,
    /// One entry per label, in list order
    pub cells: Vec<Cell>,
}

impl SheetLayout {
    /// Lay out `count` labels of the given size on a Letter page.
    pub fn compute(size: LabelSize, count: usize) -> Self {
        Self::compute_on(PageSpec::LETTER, size, count)
    }

    /// Lay out `count` labels on an arbitrary page.
    pub fn compute_on(page: PageSpec, size: LabelSize, count: usize) -> Self {
        let grid = GridSpec::for_label(size);
        let rows = grid.rows_for(count);

        let usable_width = page.usable_width_in();
        let slack = usable_width - grid.content_width_in();
        let overflow_x_in = if slack < -EPSILON_IN { -slack } else { 0.0 };
        let origin_x_in = page.margin_in + (slack / 2.0).max(0.0);
        let origin_y_in = page.margin_in;

        let cells = (0..count)
            .map(|index| {
                let row = index / grid.columns;
                let column = index % grid.columns;
                Cell {
                    index,
                    row,
                    column,
                    x_in: origin_x_in + column as f64 * grid.column_pitch_in(),
                    y_in: origin_y_in + row as f64 * grid.row_pitch_in(),
                }
            })
            .collect();

        let rows_per_page = rows_fitting(page.usable_height_in(), &grid);
        let total_height = 2.0 * page.margin_in + grid.content_height_in(rows);
        let page_count = ((total_height - EPSILON_IN) / page.height_in).ceil().max(1.0) as usize;

        if overflow_x_in > 0.0 {
            tracing::debug!(
                overflow_in = overflow_x_in,
                columns = grid.columns,
                "label grid is wider than the usable page width"
            );
        }

        Self {
            page,
            grid,
            rows,
            origin_x_in,
            origin_y_in,
            overflow_x_in,
            rows_per_page,
            page_count,
            cells,
        }
    }

    /// Whether a full row fits inside the page margins.
    pub fn fits_width(&self) -> bool {
        self.overflow_x_in == 0.0
    }

    /// Labels in row `row`, in reading order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(move |c| c.row == row)
    }
}

/// How many rows of `grid` fit vertically in `height_in`.
fn rows_fitting(height_in: f64, grid: &GridSpec) -> usize {
    if grid.cell_height_in > height_in + EPSILON_IN {
        return 1;
    }
    // n rows need n*h + (n-1)*gap <= height, i.e. n <= (height + gap) / (h + gap)
    (((height_in + grid.row_gap_in) / grid.row_pitch_in()) + EPSILON_IN).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn size(w: f64, h: f64) -> LabelSize {
        LabelSize::new(w, h).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_column_threshold_is_strict() {
        assert_eq!(column_count(2.7), 3);
        assert_eq!(column_count(2.700001), 2);
        assert_eq!(column_count(1.0), 3);
        assert_eq!(column_count(4.0), 2);
    }

    #[test]
    fn test_column_gap_follows_columns() {
        let narrow = GridSpec::for_label(size(2.65, 0.8));
        assert_eq!(narrow.columns, 3);
        assert_eq!(narrow.column_gap_in, NARROW_COLUMN_GAP_IN);

        let wide = GridSpec::for_label(size(3.5, 1.0));
        assert_eq!(wide.columns, 2);
        assert_eq!(wide.column_gap_in, WIDE_COLUMN_GAP_IN);
        assert_eq!(wide.row_gap_in, ROW_GAP_IN);
        assert_eq!(wide.cell_height_in, 1.0);
    }

    #[test]
    fn test_seven_default_labels_fill_row_major() {
        let layout = SheetLayout::compute(LabelSize::default(), 7);
        assert_eq!(layout.grid.columns, 3);
        assert_eq!(layout.rows, 3);

        let per_row: Vec<usize> = (0..layout.rows).map(|r| layout.row(r).count()).collect();
        assert_eq!(per_row, vec![3, 3, 1]);

        let positions: Vec<(usize, usize)> = layout.cells.iter().map(|c| (c.row, c.column)).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0)]
        );
    }

    #[test]
    fn test_empty_sheet_still_one_page() {
        let layout = SheetLayout::compute(LabelSize::default(), 0);
        assert_eq!(layout.rows, 0);
        assert!(layout.cells.is_empty());
        assert_eq!(layout.page_count, 1);
    }

    #[test]
    fn test_grid_is_centered() {
        let layout = SheetLayout::compute(LabelSize::default(), 3);
        // 3 * 2.65 + 2 * 0.01 = 7.97in, leaving 0.03in slack
        assert!(close(layout.grid.content_width_in(), 7.97));
        assert!(close(layout.origin_x_in, 0.265));
        assert!(layout.fits_width());

        let right_edge = layout.cells[2].x_in + layout.grid.cell_width_in;
        assert!(close(8.5 - right_edge, layout.origin_x_in));
    }

    #[test]
    fn test_cells_never_overlap() {
        let layout = SheetLayout::compute(size(2.7, 0.8), 6);
        for pair in layout.cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.row == b.row {
                assert!(b.x_in >= a.x_in + layout.grid.cell_width_in);
            } else {
                assert!(b.y_in >= a.y_in + layout.grid.cell_height_in);
            }
        }
    }

    #[test]
    fn test_two_column_positions() {
        let layout = SheetLayout::compute(size(3.0, 1.0), 3);
        // 2 * 3.0 + 0.2 = 6.2in wide, centered in 8.0in
        assert!(close(layout.origin_x_in, 1.15));
        assert!(close(layout.cells[1].x_in, 1.15 + 3.2));
        assert!(close(layout.cells[2].y_in, 0.25 + 1.03));
    }

    #[test]
    fn test_oversized_labels_report_overflow() {
        let layout = SheetLayout::compute(size(4.5, 1.0), 2);
        assert!(!layout.fits_width());
        assert!(close(layout.overflow_x_in, 1.2));
        assert_eq!(layout.origin_x_in, 0.25);
    }

    #[test]
    fn test_rows_per_page_and_page_count() {
        let layout = SheetLayout::compute(LabelSize::default(), 3);
        // (10.5 + 0.03) / 0.83 = 12.68 → 12 rows
        assert_eq!(layout.rows_per_page, 12);
        assert_eq!(layout.page_count, 1);

        let tall = SheetLayout::compute(LabelSize::default(), 3 * 14);
        assert_eq!(tall.rows, 14);
        assert_eq!(tall.page_count, 2);
    }
}
