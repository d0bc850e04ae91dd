use crate::color::{ColorModel, Rgb};

use super::filter::{filtered_indices, DataFilters};
use super::model::{Column, LineTable};

// ---------------------------------------------------------------------------
// Row projection – filtered, column-selected, colorized rows
// ---------------------------------------------------------------------------

/// One table row ready for display: a color swatch plus the selected cells,
/// in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub color: Rgb,
    pub cells: Vec<String>,
}

/// Project the filtered table onto the selected columns.
///
/// Row order follows the table; cell order follows `columns` exactly. The
/// swatch color comes from the row's derived wavelength, so it is the same
/// whether or not any wavelength column is among the selected ones.
pub fn display_rows(
    table: &LineTable,
    filters: &DataFilters,
    columns: &[Column],
    model: ColorModel,
) -> Vec<DisplayRow> {
    filtered_indices(table, filters)
        .into_iter()
        .map(|i| {
            let line = &table.lines[i];
            DisplayRow {
                color: model.to_rgb(line.wavelength),
                cells: columns.iter().map(|&c| line.cell(c)).collect(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Wavelength index – sorted lookup key for jump-to-wavelength
// ---------------------------------------------------------------------------

/// Ascending display wavelengths of the filtered rows. Depends only on the
/// table and filters, never on the column selection, and must be rebuilt
/// whenever either changes.
pub fn sorted_wavelengths(table: &LineTable, filters: &DataFilters) -> Vec<f64> {
    let mut wavelengths: Vec<f64> = filtered_indices(table, filters)
        .into_iter()
        .map(|i| table.lines[i].wavelength)
        .collect();
    wavelengths.sort_by(f64::total_cmp);
    wavelengths
}

/// Insertion index of `target` in an ascending sequence: the first index
/// whose value is >= target (so ties resolve to the first equal entry).
pub fn lower_bound(wavelengths: &[f64], target: f64) -> usize {
    wavelengths.partition_point(|&w| w < target)
}
