//! Table data and the per-table editing engine.
//!
//! A fetched wiki table becomes a [`TableData`] (header plus body rows,
//! padded to a rectangle) wrapped in a [`TableView`] that owns the working
//! copy, the pristine snapshot taken at construction, and the grid that
//! displays it.

use crate::grid::{Column, CursorMode, GridView};

/// Rectangular table content. Every row has exactly `headers.len()` cells
/// once it has passed through [`TableData::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    /// Column titles from the first row of the raw table
    pub headers: Vec<String>,
    /// Body rows
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Build table data from a raw grid as returned by the fetch service.
    /// Row 0 is the header; body rows shorter than the header are padded
    /// with empty cells. Rows are never truncated.
    pub fn from_raw(raw: Vec<Vec<String>>) -> Self {
        let mut raw = raw.into_iter();
        let headers: Vec<String> = raw.next().unwrap_or_default();
        let rows: Vec<Vec<String>> = raw
            .map(|mut row| {
                while row.len() < headers.len() {
                    row.push(String::new());
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Returns the number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns the number of body rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Display width for column `col`: the longest cell in that column
/// (header included), capped at `max_width` when the cap is positive.
/// The scan stops as soon as the cap is reached.
pub fn column_width(data: &TableData, col: usize, max_width: usize) -> usize {
    let mut width = 0;
    let cells = std::iter::once(&data.headers).chain(data.rows.iter());
    for row in cells {
        if let Some(cell) = row.get(col) {
            width = width.max(cell.len());
        }
        if max_width > 0 && width >= max_width {
            return max_width;
        }
    }
    width
}

fn columns_for(data: &TableData, max_width: usize) -> Vec<Column> {
    data.headers
        .iter()
        .enumerate()
        .map(|(i, title)| Column {
            title: title.clone(),
            width: column_width(data, i, max_width),
        })
        .collect()
}

/// One fetched table: the mutable working copy, the snapshot it can be
/// reset to, and the grid view that renders it.
#[derive(Debug, Clone)]
pub struct TableView {
    grid: GridView,
    data: TableData,
    original: TableData,
    max_column_width: usize,
}

impl TableView {
    /// Create a table view at the given viewport height. The snapshot for
    /// [`TableView::reset`] is a deep copy taken here.
    pub fn new(data: TableData, height: u16, max_column_width: usize) -> Self {
        let grid = GridView::new(
            columns_for(&data, max_column_width),
            data.rows.clone(),
            height,
        );
        Self {
            grid,
            original: data.clone(),
            data,
            max_column_width,
        }
    }

    /// The working copy currently displayed.
    pub fn data(&self) -> &TableData {
        &self.data
    }

    /// The grid view backing this table.
    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn move_up(&mut self, n: usize) {
        self.grid.move_up(n);
    }

    pub fn move_down(&mut self, n: usize) {
        self.grid.move_down(n);
    }

    /// Jump to the first body row. Only meaningful in row-select mode.
    pub fn go_to_top(&mut self) {
        if self.grid.cursor_mode() == CursorMode::RowSelect {
            self.grid.go_to_top();
        }
    }

    /// Jump to the last body row. Only meaningful in row-select mode.
    pub fn go_to_bottom(&mut self) {
        if self.grid.cursor_mode() == CursorMode::RowSelect {
            self.grid.go_to_bottom();
        }
    }

    pub fn switch_cursor_mode(&mut self) {
        self.grid.switch_cursor_mode();
    }

    /// Delete the selected body row or column, depending on cursor mode.
    ///
    /// Deleting the last row/column moves the cursor to the new last
    /// index; otherwise the cursor keeps its position and now references
    /// the element that shifted into it. Body rows may be removed down to
    /// zero; the final remaining column cannot be removed.
    pub fn remove(&mut self) {
        match self.grid.cursor_mode() {
            CursorMode::RowSelect => {
                if self.data.rows.is_empty() {
                    return;
                }
                let cursor = self.grid.cursor();
                let was_last = cursor == self.data.rows.len() - 1;
                self.data.rows.remove(cursor);
                self.sync_grid();
                if was_last {
                    self.grid.set_cursor(self.data.rows.len().saturating_sub(1));
                }
            }
            CursorMode::ColumnSelect => {
                if self.data.headers.len() <= 1 {
                    return;
                }
                let cursor = self.grid.cursor();
                let was_last = cursor == self.data.headers.len() - 1;
                self.data.headers.remove(cursor);
                for row in &mut self.data.rows {
                    if cursor < row.len() {
                        row.remove(cursor);
                    }
                }
                self.sync_grid();
                if was_last {
                    self.grid.set_cursor(self.data.headers.len() - 1);
                }
            }
        }
    }

    /// Discard all edits: restore the original snapshot and rebuild the
    /// grid at the given viewport height, back in row-select mode with the
    /// cursor on the first row.
    pub fn reset(&mut self, height: u16) {
        self.data = self.original.clone();
        self.grid = GridView::new(
            columns_for(&self.data, self.max_column_width),
            self.data.rows.clone(),
            height,
        );
    }

    /// Push the working copy back into the grid and recompute column
    /// widths. Called after every structural mutation.
    fn sync_grid(&mut self) {
        self.grid.set_rows(self.data.rows.clone());
        self.grid
            .set_columns(columns_for(&self.data, self.max_column_width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn sample() -> TableData {
        TableData::from_raw(raw(&[
            &["column", "column2", "column3"],
            &["test", "test", "test"],
            &["test2", "test2", "test2"],
            &["test3", "test3", "test3"],
        ]))
    }

    #[test]
    fn from_raw_pads_short_rows() {
        let data = TableData::from_raw(raw(&[
            &["column", "column2", "column3", "column4"],
            &["test", "test", "test"],
        ]));
        assert_eq!(data.column_count(), 4);
        assert_eq!(data.rows[0], vec!["test", "test", "test", ""]);
    }

    #[test]
    fn from_raw_never_truncates_long_rows() {
        let data = TableData::from_raw(raw(&[&["a"], &["x", "y"]]));
        assert_eq!(data.rows[0], vec!["x", "y"]);
    }

    #[test]
    fn column_width_uses_longest_cell() {
        let data = sample();
        assert_eq!(column_width(&data, 0, 0), "column".len());
        assert_eq!(column_width(&data, 1, 0), "column2".len());
    }

    #[test]
    fn column_width_caps_at_max() {
        let data = sample();
        assert_eq!(column_width(&data, 0, 3), 3);
        // A cap wider than the content leaves the natural width
        assert_eq!(column_width(&data, 0, 50), "column".len());
    }

    #[test]
    fn remove_row_keeps_cursor_on_shifted_row() {
        let mut table = TableView::new(sample(), 10, 0);
        table.move_down(1);
        table.remove();
        assert_eq!(
            table.data().rows,
            vec![
                vec!["test", "test", "test"],
                vec!["test3", "test3", "test3"],
            ]
        );
        assert_eq!(table.grid().cursor(), 1);
    }

    #[test]
    fn remove_last_row_clamps_cursor() {
        let mut table = TableView::new(sample(), 10, 0);
        table.go_to_bottom();
        table.remove();
        assert_eq!(table.data().row_count(), 2);
        assert_eq!(table.grid().cursor(), 1);
    }

    #[test]
    fn remove_rows_down_to_zero_keeps_header() {
        let mut table = TableView::new(sample(), 10, 0);
        table.remove();
        table.remove();
        table.remove();
        assert_eq!(table.data().row_count(), 0);
        assert_eq!(table.data().headers.len(), 3);
        assert_eq!(table.grid().cursor(), 0);
        // Further removals are no-ops
        table.remove();
        assert_eq!(table.data().headers.len(), 3);
    }

    #[test]
    fn remove_column_removes_from_header_and_all_rows() {
        let mut table = TableView::new(sample(), 10, 0);
        table.switch_cursor_mode();
        table.move_down(1);
        table.remove();
        assert_eq!(table.data().headers, vec!["column", "column3"]);
        for row in &table.data().rows {
            assert_eq!(row.len(), 2);
        }
        assert_eq!(table.grid().cursor(), 1);
    }

    #[test]
    fn remove_last_column_clamps_cursor() {
        let mut table = TableView::new(sample(), 10, 0);
        table.switch_cursor_mode();
        table.move_down(2);
        table.remove();
        assert_eq!(table.data().headers, vec!["column", "column2"]);
        assert_eq!(table.grid().cursor(), 1);
    }

    #[test]
    fn sole_column_cannot_be_removed() {
        let mut table = TableView::new(
            TableData::from_raw(raw(&[&["only"], &["x"]])),
            10,
            0,
        );
        table.switch_cursor_mode();
        table.remove();
        assert_eq!(table.data().headers, vec!["only"]);
        assert_eq!(table.data().rows, vec![vec!["x"]]);
    }

    #[test]
    fn widths_recomputed_after_removal() {
        let mut table = TableView::new(
            TableData::from_raw(raw(&[
                &["a", "b"],
                &["looooooong", "x"],
                &["s", "y"],
            ])),
            10,
            0,
        );
        assert_eq!(table.grid().columns()[0].width, 10);
        table.remove();
        assert_eq!(table.grid().columns()[0].width, 1);
    }

    #[test]
    fn max_width_caps_display_but_not_content() {
        let table = TableView::new(sample(), 10, 3);
        assert_eq!(table.grid().columns()[0].width, 3);
        assert_eq!(table.data().rows[1][0], "test2");
    }

    #[test]
    fn reset_restores_snapshot_and_cursor() {
        let mut table = TableView::new(sample(), 10, 0);
        table.remove();
        table.switch_cursor_mode();
        table.remove();
        table.reset(7);
        assert_eq!(*table.data(), sample());
        assert_eq!(table.grid().cursor_mode(), CursorMode::RowSelect);
        assert_eq!(table.grid().cursor(), 0);
    }
}
