use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::color::Rgb;
use crate::data::filter::filtered_indices;
use crate::state::AppState;

/// Render the filtered lines as an emission spectrum: one colored vertical
/// bar per line over a wavelength axis, bar height from relative intensity.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(table) = state.table() else {
        return;
    };
    // Wavelength/intensity pairs of the visible lines; a line without an
    // intensity value still shows up as a minimum-height bar.
    let spectral: Vec<(f64, f64)> = filtered_indices(table, &state.filters)
        .into_iter()
        .map(|i| {
            let line = &table.lines[i];
            (line.wavelength, line.intens.unwrap_or(1.0))
        })
        .collect();

    let block = Block::bordered().title(format!(
        " Spectrum — {} lines (any key to return) ",
        spectral.len()
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if spectral.is_empty() || inner.width < 2 || inner.height < 2 {
        return;
    }

    let [bars_area, axis_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let (mut lo, mut hi) = spectral.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &(w, _)| (lo.min(w), hi.max(w)),
    );
    if hi - lo < f64::EPSILON {
        lo -= 10.0;
        hi += 10.0;
    }

    let width = bars_area.width as usize;
    let height = bars_area.height as usize;

    // One bucket per terminal column; the strongest line in a bucket wins.
    let mut buckets: Vec<Option<(f64, f64)>> = vec![None; width];
    for &(wavelength, intens) in &spectral {
        let col = (((wavelength - lo) / (hi - lo)) * (width - 1) as f64).round() as usize;
        let slot = &mut buckets[col.min(width - 1)];
        if slot.map_or(true, |(_, strongest)| intens > strongest) {
            *slot = Some((wavelength, intens));
        }
    }

    // Log scale: line intensities span several decades.
    let max_magnitude = buckets
        .iter()
        .flatten()
        .map(|&(_, i)| (1.0 + i).log10())
        .fold(0.0_f64, f64::max);
    let bars: Vec<Option<(Rgb, usize)>> = buckets
        .iter()
        .map(|bucket| {
            bucket.map(|(wavelength, intens)| {
                let magnitude = (1.0 + intens).log10();
                let bar = if max_magnitude > 0.0 {
                    ((magnitude / max_magnitude) * height as f64).ceil() as usize
                } else {
                    height
                };
                (state.color_model.to_rgb(wavelength), bar.max(1))
            })
        })
        .collect();

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let threshold = height - row;
        let spans: Vec<Span> = bars
            .iter()
            .map(|bar| match bar {
                Some((rgb, h)) if *h >= threshold => {
                    let Rgb(r, g, b) = *rgb;
                    Span::styled("█", Style::new().fg(Color::Rgb(r, g, b)))
                }
                _ => Span::raw(" "),
            })
            .collect();
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), bars_area);

    let left = format!("{lo:.1} nm");
    let right = format!("{hi:.1} nm");
    let pad = width.saturating_sub(left.len() + right.len());
    frame.render_widget(
        Line::from(format!("{left}{}{right}", " ".repeat(pad))).dim(),
        axis_area,
    );
}
