use std::path::Path;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Row, Table, TableState};
use ratatui::Frame;

use crate::color::Rgb;
use crate::state::AppState;

/// The swatch rendered in the leading `Color` column of every row.
const SWATCH: &str = "█████";

/// Render the main line table with its status and key-hint lines.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    path: &Path,
    table_state: &mut TableState,
) {
    let [table_area, status_area, help_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let header = Row::new(
        std::iter::once(Cell::from("Color"))
            .chain(state.columns.iter().map(|c| Cell::from(c.name()))),
    )
    .style(Style::new().bold());

    let rows = state.rows().iter().map(|row| {
        let Rgb(r, g, b) = row.color;
        Row::new(
            std::iter::once(Cell::from(SWATCH).style(Style::new().fg(Color::Rgb(r, g, b))))
                .chain(row.cells.iter().map(|cell| Cell::from(cell.as_str()))),
        )
    });

    let mut widths = vec![Constraint::Length(5)];
    widths.extend(
        state
            .columns
            .iter()
            .map(|c| Constraint::Min(c.name().len().max(8) as u16)),
    );

    let total = state.table().map(|t| t.len()).unwrap_or(0);
    let title = format!(
        " {} — {} lines, {} shown ",
        path.display(),
        total,
        state.rows().len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::bordered().title(title))
        .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, table_area, table_state);

    if let Some(message) = &state.status {
        frame.render_widget(Line::from(message.as_str()).yellow(), status_area);
    }
    frame.render_widget(
        Line::from("c columns · f filter · v visualize · j jump · r reload · q quit").dim(),
        help_area,
    );
}
