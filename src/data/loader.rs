use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Column, LineTable, SpectralLine};
use super::DataError;

/// First maximal unsigned decimal number inside a noisy cell, e.g. the
/// `123.45` in `"123.45nm"` or `"[123.45]"`.
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.?\d*").expect("valid regex"));

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a NIST line list from a tab-separated file.
///
/// The whole file is read in one shot. I/O failures keep their
/// [`std::io::Error`] (`DataError::Io`); everything wrong with the file's
/// content is a `DataError::Malformed`.
pub fn load_file(path: &Path) -> Result<LineTable, DataError> {
    let bytes = std::fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes)
        .map_err(|_| DataError::Malformed("file is not valid UTF-8 text".to_string()))?;
    let table = parse_str(&text)?;
    log::info!(
        "loaded {} spectral lines ({} elements) from {}",
        table.len(),
        table.elements.len(),
        path.display()
    );
    Ok(table)
}

/// Parse line-list text.
///
/// NIST exports sometimes repeat the header block (and append footer notes)
/// partway through the file; only the rows between the first header and the
/// second occurrence of an `element`-prefixed line are real data. Only the
/// first 20 tab-delimited columns are read, and the `obs_wl_vac(nm)` header
/// variant is folded into `obs_wl(nm)`.
pub fn parse_str(text: &str) -> Result<LineTable, DataError> {
    let body = truncate_at_repeated_header(text)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DataError::Malformed(format!("unreadable header row: {e}")))?;
    if headers.len() < 20 {
        return Err(DataError::Malformed(format!(
            "expected at least 20 columns, found {}",
            headers.len()
        )));
    }

    // Map each canonical column to its position among the first 20 fields.
    let mut positions: HashMap<&'static str, usize> = HashMap::new();
    for (idx, raw) in headers.iter().take(20).enumerate() {
        let name = match raw.trim() {
            "obs_wl_vac(nm)" => "obs_wl(nm)",
            other => other,
        };
        if let Some(col) = Column::from_name(name) {
            positions.entry(col.name()).or_insert(idx);
        }
    }
    // `Column::ALL` is in declaration order, so `col as usize` indexes it.
    let at = Column::ALL
        .iter()
        .map(|&c| {
            positions
                .get(c.name())
                .copied()
                .ok_or_else(|| DataError::Malformed(format!("missing column '{}'", c.name())))
        })
        .collect::<Result<Vec<usize>, DataError>>()?;
    let pos = |col: Column| at[col as usize];

    let mut lines = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping unreadable row: {e}");
                dropped += 1;
                continue;
            }
        };
        let cell = |col: Column| record.get(pos(col)).unwrap_or("").trim();

        let obs_wl = parse_f64(cell(Column::ObsWl));
        let ritz_wl = parse_f64(cell(Column::RitzWl));
        // Display and search prefer the observed wavelength and fall back to
        // the Ritz vacuum value. A row with neither carries no position at
        // all and is dropped.
        let wavelength = match obs_wl.or(ritz_wl) {
            Some(wl) => wl,
            None => {
                dropped += 1;
                continue;
            }
        };

        lines.push(SpectralLine {
            element: cell(Column::Element).to_string(),
            sp_num: parse_i64(cell(Column::SpNum)),
            obs_wl,
            unc_obs_wl: parse_f64(cell(Column::UncObsWl)),
            ritz_wl,
            unc_ritz_wl: parse_f64(cell(Column::UncRitzWl)),
            intens: extract_number(cell(Column::Intens)),
            aki: parse_f64(cell(Column::Aki)),
            acc: cell(Column::Acc).to_string(),
            ei: extract_number(cell(Column::Ei)),
            ek: extract_number(cell(Column::Ek)),
            conf_i: cell(Column::ConfI).to_string(),
            term_i: cell(Column::TermI).to_string(),
            j_i: cell(Column::JI).to_string(),
            conf_k: cell(Column::ConfK).to_string(),
            term_k: cell(Column::TermK).to_string(),
            j_k: cell(Column::JK).to_string(),
            line_type: cell(Column::Type).to_string(),
            tp_ref: cell(Column::TpRef).to_string(),
            line_ref: cell(Column::LineRef).to_string(),
            wavelength,
        });
    }

    if dropped > 0 {
        log::warn!("dropped {dropped} rows without a usable wavelength");
    }

    Ok(LineTable::from_lines(lines))
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

/// Cut the text at the second `element`-prefixed line: everything from there
/// to end of file is a repeated header/footer section.
fn truncate_at_repeated_header(text: &str) -> Result<&str, DataError> {
    if !text.starts_with("element") {
        return Err(DataError::Malformed(
            "first row is not a line-list header".to_string(),
        ));
    }
    let mut offset = 0;
    for (i, line) in text.split_inclusive('\n').enumerate() {
        if i > 0 && line.starts_with("element") {
            return Ok(&text[..offset]);
        }
        offset += line.len();
    }
    Ok(text)
}

/// Strict float parse; empty or noisy cells become missing, never errors.
fn parse_f64(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    cell.parse().ok()
}

fn parse_i64(cell: &str) -> Option<i64> {
    if cell.is_empty() {
        return None;
    }
    cell.parse().ok()
}

/// Pull the first number out of an annotated cell (`"4000bl"`, `"(12.5)"`).
/// Cells without any digits become missing.
fn extract_number(cell: &str) -> Option<f64> {
    NUMBER.find(cell).and_then(|m| m.as_str().parse().ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const HEADER: &str = "element\tsp_num\tobs_wl(nm)\tunc_obs_wl\tritz_wl_vac(nm)\tunc_ritz_wl\tintens\tAki(s^-1)\tAcc\tEi(eV)\tEk(eV)\tconf_i\tterm_i\tJ_i\tconf_k\tterm_k\tJ_k\tType\ttp_ref\tline_ref";

    fn row(element: &str, obs: &str, ritz: &str, intens: &str, ei: &str, ek: &str) -> String {
        format!(
            "{element}\t1\t{obs}\t0.001\t{ritz}\t0.001\t{intens}\t1.0e+07\tAAA\t{ei}\t{ek}\t2p\t2P*\t1/2\t3d\t2D\t3/2\t\tT1\tL1"
        )
    }

    #[test]
    fn parses_plain_file() {
        let text = format!(
            "{HEADER}\n{}\n{}\n",
            row("H", "656.279", "656.4522", "500000", "10.19", "12.08"),
            row("Na", "588.995", "589.1583", "80000", "0.0", "2.104")
        );
        let table = parse_str(&text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lines[0].element, "H");
        assert_eq!(table.lines[0].obs_wl, Some(656.279));
        assert_eq!(table.lines[0].wavelength, 656.279);
        assert_eq!(table.lines[1].intens, Some(80000.0));
        let elements: Vec<&str> = table.elements.iter().map(String::as_str).collect();
        assert_eq!(elements, ["H", "Na"]);
    }

    #[test]
    fn drops_everything_after_second_header() {
        let text = format!(
            "{HEADER}\n{}\n{}\n{HEADER}\n{}\nsome footer note\n",
            row("H", "656.279", "656.4522", "500000", "10.19", "12.08"),
            row("Na", "588.995", "589.1583", "80000", "0.0", "2.104"),
            row("Fe", "540.577", "540.711", "100", "0.0", "2.29")
        );
        let table = parse_str(&text).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.elements.contains("Fe"));
    }

    #[test]
    fn renames_vacuum_wavelength_header() {
        let text = format!(
            "{}\n{}\n",
            HEADER.replace("obs_wl(nm)", "obs_wl_vac(nm)"),
            row("H", "121.567", "121.5668", "1000", "0.0", "10.19")
        );
        let table = parse_str(&text).unwrap();
        assert_eq!(table.lines[0].obs_wl, Some(121.567));
    }

    #[test]
    fn noisy_cells_yield_first_number_or_missing() {
        assert_eq!(extract_number("123.45nm"), Some(123.45));
        assert_eq!(extract_number("(12000)"), Some(12000.0));
        assert_eq!(extract_number("500000h"), Some(500000.0));
        assert_eq!(extract_number("*45.1bl"), Some(45.1));
        assert_eq!(extract_number("N/A"), None);
        assert_eq!(extract_number(""), None);
    }

    #[test]
    fn unparsable_cells_become_missing_without_dropping_the_row() {
        let text = format!("{HEADER}\n{}\n", row("Fe", "540.577", "", "bl", "?", "2.29"));
        let table = parse_str(&text).unwrap();
        assert_eq!(table.len(), 1);
        let line = &table.lines[0];
        assert_eq!(line.intens, None);
        assert_eq!(line.ei, None);
        assert_eq!(line.ek, Some(2.29));
        assert_eq!(line.ritz_wl, None);
    }

    #[test]
    fn rows_without_any_wavelength_are_dropped() {
        let text = format!(
            "{HEADER}\n{}\n{}\n",
            row("H", "", "", "1000", "0.0", "10.19"),
            row("Na", "588.995", "", "80000", "0.0", "2.104")
        );
        let table = parse_str(&text).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lines[0].element, "Na");
    }

    #[test]
    fn ritz_fallback_feeds_the_derived_wavelength() {
        let text = format!(
            "{HEADER}\n{}\n",
            row("He", "", "587.6148", "500", "20.96", "23.07")
        );
        let table = parse_str(&text).unwrap();
        assert_eq!(table.lines[0].obs_wl, None);
        assert_eq!(table.lines[0].wavelength, 587.6148);
    }

    #[test]
    fn missing_header_is_malformed() {
        let err = parse_str("not a line list\n1\t2\t3\n").unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
        let err = parse_str("").unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
    }

    #[test]
    fn short_header_is_malformed() {
        let err = parse_str("element\tsp_num\tobs_wl(nm)\nH\t1\t656.279\n").unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/specline.tsv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn undecodable_file_is_malformed() {
        let path = std::env::temp_dir().join("specline-loader-binary.tsv");
        std::fs::write(&path, [0xffu8, 0xfe, 0x00, 0x41]).unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
        std::fs::remove_file(&path).ok();
    }
}
