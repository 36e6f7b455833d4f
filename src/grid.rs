//! Grid view: cursor, selection mode, and viewport scrolling over a
//! rectangular block of cells.
//!
//! The grid knows nothing about where its data came from; the table
//! component feeds it rows and sized columns and the render layer draws
//! whatever window [`GridView::offset`] points at.

/// Header title plus the display width of its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub width: usize,
}

/// Whether navigation and deletion operate on rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    RowSelect,
    ColumnSelect,
}

/// A scrollable grid with a single cursor that addresses either a body
/// row or a column, depending on [`CursorMode`].
#[derive(Debug, Clone)]
pub struct GridView {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    cursor: usize,
    mode: CursorMode,
    offset: usize,
    height: u16,
}

impl GridView {
    /// Create a grid sized for a viewport of `height` terminal rows.
    /// Starts in row-select mode with the cursor on the first row.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<String>>, height: u16) -> Self {
        Self {
            columns,
            rows,
            cursor: 0,
            mode: CursorMode::RowSelect,
            offset: 0,
            height,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.mode
    }

    /// Index of the first body row in the visible window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Body rows that fit in the viewport alongside the header line.
    pub fn page_size(&self) -> usize {
        usize::from(self.height.saturating_sub(1)).max(1)
    }

    /// How many elements the cursor ranges over in the current mode.
    fn extent(&self) -> usize {
        match self.mode {
            CursorMode::RowSelect => self.rows.len(),
            CursorMode::ColumnSelect => self.columns.len(),
        }
    }

    /// Move the cursor, clamped to the current mode's extent.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.extent().saturating_sub(1));
        self.scroll_to_cursor();
    }

    pub fn move_up(&mut self, n: usize) {
        self.set_cursor(self.cursor.saturating_sub(n));
    }

    pub fn move_down(&mut self, n: usize) {
        self.set_cursor(self.cursor.saturating_add(n));
    }

    pub fn go_to_top(&mut self) {
        self.set_cursor(0);
    }

    pub fn go_to_bottom(&mut self) {
        self.set_cursor(self.extent().saturating_sub(1));
    }

    /// Toggle between row and column selection. The cursor resets to 0
    /// when its position does not exist in the new mode.
    pub fn switch_cursor_mode(&mut self) {
        self.mode = match self.mode {
            CursorMode::RowSelect => CursorMode::ColumnSelect,
            CursorMode::ColumnSelect => CursorMode::RowSelect,
        };
        if self.cursor >= self.extent() {
            self.cursor = 0;
        }
        self.scroll_to_cursor();
    }

    /// Replace all body rows, keeping the cursor and scroll window in
    /// bounds.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        self.offset = self.offset.min(self.rows.len().saturating_sub(1));
        self.set_cursor(self.cursor);
    }

    /// Replace the column set, keeping the cursor in bounds.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        self.set_cursor(self.cursor);
    }

    /// Keep the selected row inside the visible window. Column selection
    /// never scrolls vertically.
    fn scroll_to_cursor(&mut self) {
        if self.mode != CursorMode::RowSelect {
            return;
        }
        let page = self.page_size();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
    }
}
