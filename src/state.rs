use std::path::Path;

use crate::color::ColorModel;
use crate::data::filter::DataFilters;
use crate::data::loader;
use crate::data::model::{Column, LineTable, DEFAULT_COLUMNS};
use crate::data::project::{self, DisplayRow};
use crate::data::DataError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
///
/// Owns the loaded table, the mutable filter set, the ordered column
/// selection, and the two caches derived from them: the projected display
/// rows and the ascending wavelength index used by jump-to-wavelength.
/// All mutation happens on the event-loop thread, so every rebuild sees one
/// consistent (table, filters, columns) triple and replaces the caches
/// wholesale, never partially.
pub struct AppState {
    /// Loaded line list (None until the first successful load).
    table: Option<LineTable>,

    /// Per-field filter set, mutated in place by the filter dialog.
    pub filters: DataFilters,

    /// Ordered column selection; order is display order.
    pub columns: Vec<Column>,

    /// Which wavelength→color conversion to use for swatches and the plot.
    pub color_model: ColorModel,

    /// Projected rows under the current table/filters/columns (cached).
    rows: Vec<DisplayRow>,

    /// Ascending display wavelengths of the filtered rows (cached).
    wavelengths: Vec<f64>,

    /// Status / error message shown in the UI.
    pub status: Option<String>,
}

impl AppState {
    pub fn new(color_model: ColorModel) -> Self {
        AppState {
            table: None,
            filters: DataFilters::default(),
            columns: DEFAULT_COLUMNS.to_vec(),
            color_model,
            rows: Vec::new(),
            wavelengths: Vec::new(),
            status: None,
        }
    }

    /// Load a line list, all-or-nothing: on any error the previously loaded
    /// table and both caches stay exactly as they were.
    pub fn load(&mut self, path: &Path) -> Result<(), DataError> {
        let table = loader::load_file(path)?;
        self.table = Some(table);
        self.rebuild();
        Ok(())
    }

    /// Replace the column selection. Only the row cache depends on it; the
    /// wavelength index is column-independent and stays valid.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        if let Some(table) = &self.table {
            self.rows =
                project::display_rows(table, &self.filters, &self.columns, self.color_model);
        }
    }

    /// Recompute both caches after a filter change.
    pub fn refresh(&mut self) -> Result<(), DataError> {
        if self.table.is_none() {
            return Err(DataError::NoData);
        }
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        if let Some(table) = &self.table {
            self.rows =
                project::display_rows(table, &self.filters, &self.columns, self.color_model);
            self.wavelengths = project::sorted_wavelengths(table, &self.filters);
            log::debug!(
                "rebuilt view: {} of {} lines visible",
                self.rows.len(),
                table.len()
            );
        }
    }

    /// The cached display rows.
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// Index of the first visible row whose display wavelength is >= target,
    /// under the currently active filters.
    pub fn jump(&self, target: f64) -> Result<usize, DataError> {
        if self.table.is_none() {
            return Err(DataError::NoData);
        }
        Ok(project::lower_bound(&self.wavelengths, target))
    }

    pub fn table(&self) -> Option<&LineTable> {
        self.table.as_ref()
    }
}
