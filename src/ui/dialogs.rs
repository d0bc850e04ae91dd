use std::collections::BTreeSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::data::filter::{DataFilters, RangeFilter};
use crate::data::model::Column;

// ---------------------------------------------------------------------------
// Modal dialog plumbing
// ---------------------------------------------------------------------------

/// What a key press did to a modal dialog.
pub enum DialogResult<T> {
    /// Dialog stays open.
    Open,
    /// Discard and close.
    Cancel,
    /// Close with a result.
    Confirm(T),
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    area
}

// ---------------------------------------------------------------------------
// Jump-to-wavelength dialog
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct JumpDialog {
    input: String,
    error: Option<String>,
}

impl JumpDialog {
    pub fn on_key(&mut self, key: KeyEvent) -> DialogResult<f64> {
        match key.code {
            KeyCode::Esc => return DialogResult::Cancel,
            KeyCode::Enter => match self.input.parse::<f64>() {
                Ok(value) if value >= 0.0 && value.is_finite() => {
                    return DialogResult::Confirm(value);
                }
                _ => self.error = Some("value must be a non-negative number".to_string()),
            },
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => self.input.push(c),
            _ => {}
        }
        DialogResult::Open
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = popup_area(frame.area(), 44, 5);
        frame.render_widget(Clear, area);
        let mut lines = vec![Line::from(format!("> {}", self.input))];
        match &self.error {
            Some(err) => lines.push(Line::from(err.clone()).red()),
            None => lines.push(Line::from("")),
        }
        lines.push(Line::from("enter jump · esc cancel").dim());
        let block = Block::bordered().title(" Jump to wavelength (nm) ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

// ---------------------------------------------------------------------------
// Column-selection dialog
// ---------------------------------------------------------------------------

/// Checkbox list over the 20-column superset. Toggling a column on appends
/// it to the selection, so the display order is the order of selection.
pub struct ColumnsDialog {
    cursor: usize,
    selected: Vec<Column>,
}

impl ColumnsDialog {
    pub fn new(selected: &[Column]) -> Self {
        ColumnsDialog {
            cursor: 0,
            selected: selected.to_vec(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> DialogResult<Vec<Column>> {
        match key.code {
            KeyCode::Esc => return DialogResult::Cancel,
            KeyCode::Enter => return DialogResult::Confirm(self.selected.clone()),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(Column::ALL.len() - 1),
            KeyCode::Char(' ') => {
                let col = Column::ALL[self.cursor];
                match self.selected.iter().position(|&c| c == col) {
                    Some(pos) => {
                        self.selected.remove(pos);
                    }
                    None => self.selected.push(col),
                }
            }
            _ => {}
        }
        DialogResult::Open
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = popup_area(frame.area(), 38, Column::ALL.len() as u16 + 4);
        frame.render_widget(Clear, area);
        let mut lines: Vec<Line> = Column::ALL
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let order = self.selected.iter().position(|c| c == col);
                let mark = if order.is_some() { 'x' } else { ' ' };
                let order_text = order.map(|o| format!("{:>2}", o + 1)).unwrap_or_default();
                let line = Line::from(format!("[{mark}] {:<16} {order_text}", col.name()));
                if i == self.cursor {
                    line.reversed()
                } else {
                    line
                }
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from("space toggle · enter apply · esc cancel").dim());
        let block = Block::bordered().title(" Select columns ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

// ---------------------------------------------------------------------------
// Filter dialog
// ---------------------------------------------------------------------------

/// The numeric fields a range filter can be edited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    SpNum,
    ObsWl,
    Intens,
    Ei,
    Ek,
}

const FIELDS: [Field; 5] = [Field::SpNum, Field::ObsWl, Field::Intens, Field::Ei, Field::Ek];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::SpNum => "Ionization stage",
            Field::ObsWl => "Observed wavelength",
            Field::Intens => "Intensity",
            Field::Ei => "Initial energy",
            Field::Ek => "Final energy",
        }
    }

    /// The ionization stage is an integer field; its bounds are validated
    /// as integers when the dialog is confirmed.
    fn integer(self) -> bool {
        matches!(self, Field::SpNum)
    }

    fn get(self, filters: &DataFilters) -> &RangeFilter {
        match self {
            Field::SpNum => &filters.sp_num,
            Field::ObsWl => &filters.obs_wl,
            Field::Intens => &filters.intens,
            Field::Ei => &filters.ei,
            Field::Ek => &filters.ek,
        }
    }

    fn get_mut(self, filters: &mut DataFilters) -> &mut RangeFilter {
        match self {
            Field::SpNum => &mut filters.sp_num,
            Field::ObsWl => &mut filters.obs_wl,
            Field::Intens => &mut filters.intens,
            Field::Ei => &mut filters.ei,
            Field::Ek => &mut filters.ek,
        }
    }
}

/// One focusable row of the filter dialog.
enum Entry {
    Min(Field, String),
    Max(Field, String),
    ShowMissing(Field, bool),
    Element(String, bool),
}

/// Editable view over the filter set. Text is free-form while the dialog is
/// open; everything is validated on confirm and applied all-or-nothing, so
/// a typo in one bound never half-updates the filters.
pub struct FilterDialog {
    entries: Vec<Entry>,
    cursor: usize,
}

impl FilterDialog {
    pub fn new(filters: &DataFilters, elements: &BTreeSet<String>) -> Self {
        fn text(value: Option<f64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        let mut entries = Vec::new();
        for field in FIELDS {
            let filter = field.get(filters);
            entries.push(Entry::Min(field, text(filter.min)));
            entries.push(Entry::Max(field, text(filter.max)));
            entries.push(Entry::ShowMissing(field, filter.show_missing));
        }
        for element in elements {
            entries.push(Entry::Element(
                element.clone(),
                filters.elements.allowed.contains(element),
            ));
        }
        FilterDialog { entries, cursor: 0 }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> DialogResult<()> {
        match key.code {
            KeyCode::Esc => return DialogResult::Cancel,
            KeyCode::Enter => return DialogResult::Confirm(()),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(self.entries.len() - 1),
            KeyCode::Backspace => {
                if let Entry::Min(_, text) | Entry::Max(_, text) = &mut self.entries[self.cursor] {
                    text.pop();
                }
            }
            KeyCode::Char(c) => self.on_char(c),
            _ => {}
        }
        DialogResult::Open
    }

    fn on_char(&mut self, c: char) {
        if matches!(self.entries[self.cursor], Entry::Element(..)) && matches!(c, 'a' | 'n') {
            self.set_all_elements(c == 'a');
            return;
        }
        match &mut self.entries[self.cursor] {
            Entry::Min(_, text) | Entry::Max(_, text) => {
                if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e') {
                    text.push(c);
                }
            }
            Entry::ShowMissing(_, value) | Entry::Element(_, value) => {
                if c == ' ' {
                    *value = !*value;
                }
            }
        }
    }

    fn set_all_elements(&mut self, selected: bool) {
        for entry in &mut self.entries {
            if let Entry::Element(_, value) = entry {
                *value = selected;
            }
        }
    }

    /// Validate every edited bound and write the whole filter set back.
    /// On a validation error nothing is written and the message names the
    /// offending field.
    pub fn apply(&self, filters: &mut DataFilters) -> Result<(), String> {
        let mut updated = filters.clone();
        updated.elements.allowed = BTreeSet::new();
        for entry in &self.entries {
            match entry {
                Entry::Min(field, text) => {
                    field.get_mut(&mut updated).min = parse_bound(*field, text)?;
                }
                Entry::Max(field, text) => {
                    field.get_mut(&mut updated).max = parse_bound(*field, text)?;
                }
                Entry::ShowMissing(field, value) => {
                    field.get_mut(&mut updated).show_missing = *value;
                }
                Entry::Element(name, true) => {
                    updated.elements.allowed.insert(name.clone());
                }
                Entry::Element(_, false) => {}
            }
        }
        *filters = updated;
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        let height = (self.entries.len() as u16 + 4).min(frame.area().height.saturating_sub(2));
        let area = popup_area(frame.area(), 54, height.max(8));
        frame.render_widget(Clear, area);

        let visible = area.height.saturating_sub(4) as usize;
        let scroll = self.cursor.saturating_sub(visible.saturating_sub(1)) as u16;

        let mut lines: Vec<Line> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let text = match entry {
                    Entry::Min(field, text) => {
                        format!("{:<20} min  [{text}]", field.label())
                    }
                    Entry::Max(field, text) => {
                        format!("{:<20} max  [{text}]", field.label())
                    }
                    Entry::ShowMissing(field, value) => {
                        let mark = if *value { 'x' } else { ' ' };
                        format!("{:<20} [{mark}] show empty", field.label())
                    }
                    Entry::Element(name, value) => {
                        let mark = if *value { 'x' } else { ' ' };
                        format!("element  [{mark}] {name}")
                    }
                };
                let line = Line::from(text);
                if i == self.cursor {
                    line.reversed()
                } else {
                    line
                }
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from("space toggle · a/n all/none · enter apply · esc cancel").dim());

        let block = Block::bordered().title(" Filter data ");
        frame.render_widget(
            Paragraph::new(lines).block(block).scroll((scroll, 0)),
            area,
        );
    }
}

fn parse_bound(field: Field, text: &str) -> Result<Option<f64>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if field.integer() {
        trimmed
            .parse::<i64>()
            .map(|v| Some(v as f64))
            .map_err(|_| format!("{}: '{trimmed}' is not an integer", field.label()))
    } else {
        trimmed
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("{}: '{trimmed}' is not a number", field.label()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn elements(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn entry_index(dialog: &FilterDialog, wanted: &str) -> usize {
        dialog
            .entries
            .iter()
            .position(|e| matches!(e, Entry::Element(name, _) if name == wanted))
            .unwrap()
    }

    #[test]
    fn apply_writes_validated_bounds() {
        let mut filters = DataFilters::default();
        let mut dialog = FilterDialog::new(&filters, &elements(&["Fe", "Na"]));

        // First two entries are the ionization-stage min/max.
        if let Entry::Min(_, text) = &mut dialog.entries[0] {
            text.push('2');
        }
        dialog.cursor = entry_index(&dialog, "Na");
        dialog.on_char(' ');

        dialog.apply(&mut filters).unwrap();
        assert_eq!(filters.sp_num.min, Some(2.0));
        assert!(filters.elements.allowed.contains("Na"));
        assert!(!filters.elements.allowed.contains("Fe"));
    }

    #[test]
    fn invalid_integer_bound_leaves_filters_untouched() {
        let mut filters = DataFilters::default();
        filters.intens.min = Some(10.0);
        let mut dialog = FilterDialog::new(&filters, &elements(&["Fe"]));

        if let Entry::Min(_, text) = &mut dialog.entries[0] {
            text.push_str("2.5"); // not an integer ionization stage
        }
        let err = dialog.apply(&mut filters).unwrap_err();
        assert!(err.contains("Ionization stage"));
        assert_eq!(filters.intens.min, Some(10.0));
        assert_eq!(filters.sp_num.min, None);
    }

    #[test]
    fn select_all_and_none_cover_every_element() {
        let mut filters = DataFilters::default();
        let mut dialog = FilterDialog::new(&filters, &elements(&["Fe", "H", "Na"]));
        dialog.cursor = entry_index(&dialog, "Fe");

        dialog.on_char('a');
        dialog.apply(&mut filters).unwrap();
        assert_eq!(filters.elements.allowed.len(), 3);

        dialog.on_char('n');
        dialog.apply(&mut filters).unwrap();
        assert!(filters.elements.allowed.is_empty());
    }

    #[test]
    fn columns_dialog_appends_in_selection_order() {
        let mut dialog = ColumnsDialog::new(&[]);
        // Toggle element (index 0), then intens (index 6).
        dialog.on_key(KeyEvent::from(KeyCode::Char(' ')));
        for _ in 0..6 {
            dialog.on_key(KeyEvent::from(KeyCode::Down));
        }
        dialog.on_key(KeyEvent::from(KeyCode::Char(' ')));

        match dialog.on_key(KeyEvent::from(KeyCode::Enter)) {
            DialogResult::Confirm(cols) => {
                assert_eq!(cols, vec![Column::Element, Column::Intens]);
            }
            _ => panic!("expected confirm"),
        }
    }

    #[test]
    fn jump_dialog_rejects_garbage_until_valid() {
        let mut dialog = JumpDialog::default();
        for c in "589.0".chars() {
            dialog.on_key(KeyEvent::from(KeyCode::Char(c)));
        }
        match dialog.on_key(KeyEvent::from(KeyCode::Enter)) {
            DialogResult::Confirm(v) => assert_eq!(v, 589.0),
            _ => panic!("expected confirm"),
        }

        let mut dialog = JumpDialog::default();
        for c in "..".chars() {
            dialog.on_key(KeyEvent::from(KeyCode::Char(c)));
        }
        assert!(matches!(
            dialog.on_key(KeyEvent::from(KeyCode::Enter)),
            DialogResult::Open
        ));
        assert!(dialog.error.is_some());
    }
}
