//! Drawing for both application modes.
//!
//! All styling comes from a [`Theme`] handed in by the caller; nothing in
//! here reaches for process-wide style state.

use ratatui::{
    prelude::*,
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::app::{App, Mode};
use crate::grid::{CursorMode, GridView};
use crate::input::{self, InputForm};

/// Style configuration passed to the rendering layer.
#[derive(Debug, Clone)]
pub struct Theme {
    pub focused: Style,
    pub blurred: Style,
    pub error: Style,
    pub header: Style,
    pub selected: Style,
    pub hint: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focused: Style::default().fg(Color::Indexed(212)),
            blurred: Style::default().fg(Color::Indexed(240)),
            error: Style::default().fg(Color::Indexed(1)),
            header: Style::default().add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::Indexed(229))
                .bg(Color::Indexed(57)),
            hint: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Render the whole frame for the current mode.
pub fn draw<S>(frame: &mut Frame, app: &App<S>, theme: &Theme) {
    match app.mode {
        Mode::Collecting => draw_form(frame, app, theme),
        Mode::Browsing => draw_tables(frame, app, theme),
    }
}

/// The input view: labeled fields, the submit button, and the latest
/// submit error, centered in the viewport.
fn draw_form<S>(frame: &mut Frame, app: &App<S>, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();
    for i in 0..input::FIELD_COUNT {
        lines.push(Line::from(input::LABELS[i]));
        lines.push(field_line(&app.form, i, theme));
        lines.push(Line::default());
    }

    lines.push(Line::default());
    let submit_style = if app.form.submit_focused() {
        theme.focused
    } else {
        theme.blurred
    };
    lines.push(Line::styled("[ Submit ]", submit_style));

    if let Some(err) = &app.error {
        lines.push(Line::default());
        lines.push(Line::styled(err.to_string(), theme.error));
    }

    let height = lines.len() as u16;
    let area = centered(frame.area(), 60, height);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}

/// One editable field: `> value`, or a dimmed placeholder while empty.
fn field_line<'a>(form: &'a InputForm, field: usize, theme: &Theme) -> Line<'a> {
    let focused = form.focus() == field;
    let prompt_style = if focused { theme.focused } else { theme.blurred };
    let value = form.value(field);

    let mut spans = vec![Span::styled("> ", prompt_style)];
    if value.is_empty() && !focused {
        spans.push(Span::styled(input::PLACEHOLDERS[field], theme.blurred));
    } else {
        let value_style = if focused {
            theme.focused
        } else {
            Style::default()
        };
        spans.push(Span::styled(value, value_style));
        if focused {
            spans.push(Span::styled("█", theme.focused));
        }
    }
    Line::from(spans)
}

/// The browsing view: active table above a one-line key hint. An empty
/// table sequence draws only the hint.
fn draw_tables<S>(frame: &mut Frame, app: &App<S>, theme: &Theme) {
    let [table_area, hint_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

    if let Some(table) = app.active_table() {
        draw_grid(frame, table_area, table.grid(), theme);
    }

    let hint = format!(
        "table {}/{}  tab: next  ctrl+k: mode  ctrl+d: delete  ctrl+r: reset  ctrl+t: close  ctrl+n: new query  q: quit",
        if app.tables.is_empty() { 0 } else { app.active + 1 },
        app.tables.len(),
    );
    frame.render_widget(Paragraph::new(hint).style(theme.hint), hint_area);
}

/// Render the visible window of a grid, highlighting the selected row or
/// column.
fn draw_grid(frame: &mut Frame, area: Rect, grid: &GridView, theme: &Theme) {
    let widths: Vec<Constraint> = grid
        .columns()
        .iter()
        .map(|c| {
            // Saturate rather than wrap on absurdly wide cells
            let width = u16::try_from(c.width.saturating_add(1)).unwrap_or(u16::MAX);
            Constraint::Length(width)
        })
        .collect();

    let column_cursor = match grid.cursor_mode() {
        CursorMode::ColumnSelect => Some(grid.cursor()),
        CursorMode::RowSelect => None,
    };

    let header = Row::new(grid.columns().iter().enumerate().map(|(i, c)| {
        let style = if column_cursor == Some(i) {
            theme.header.patch(theme.selected)
        } else {
            theme.header
        };
        Cell::from(clipped(&c.title, c.width)).style(style)
    }));

    // Page through the grid's scroll window; the grid keeps the cursor
    // inside it.
    let page = usize::from(area.height.saturating_sub(1)).max(1);
    let rows = grid
        .rows()
        .iter()
        .enumerate()
        .skip(grid.offset())
        .take(page)
        .map(|(row_idx, row)| {
            let row_selected =
                grid.cursor_mode() == CursorMode::RowSelect && row_idx == grid.cursor();
            let cells = row.iter().enumerate().map(|(col_idx, cell)| {
                let width = grid.columns().get(col_idx).map_or(0, |c| c.width);
                let styled = Cell::from(clipped(cell, width));
                if column_cursor == Some(col_idx) {
                    styled.style(theme.selected)
                } else {
                    styled
                }
            });
            let row = Row::new(cells);
            if row_selected {
                row.style(theme.selected)
            } else {
                row
            }
        });

    frame.render_widget(Table::new(rows, widths).header(header), area);
}

/// Clip cell content to the column's display width.
fn clipped(cell: &str, width: usize) -> String {
    cell.chars().take(width).collect()
}

/// Center a `width` x `height` box inside `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, middle, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(vertical);
    middle
}
