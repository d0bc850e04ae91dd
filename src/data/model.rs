use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Column – the fixed superset of columns in a NIST line list
// ---------------------------------------------------------------------------

/// One of the 20 columns of a NIST atomic spectra line list.
///
/// `name()` returns the literal header string; the two wavelength header
/// variants (`obs_wl(nm)` / `obs_wl_vac(nm)`) are normalized by the loader
/// before this enum ever sees them, so `ObsWl` always means `obs_wl(nm)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Element,
    SpNum,
    ObsWl,
    UncObsWl,
    RitzWl,
    UncRitzWl,
    Intens,
    Aki,
    Acc,
    Ei,
    Ek,
    ConfI,
    TermI,
    JI,
    ConfK,
    TermK,
    JK,
    Type,
    TpRef,
    LineRef,
}

impl Column {
    /// All columns, in the file's canonical order.
    pub const ALL: [Column; 20] = [
        Column::Element,
        Column::SpNum,
        Column::ObsWl,
        Column::UncObsWl,
        Column::RitzWl,
        Column::UncRitzWl,
        Column::Intens,
        Column::Aki,
        Column::Acc,
        Column::Ei,
        Column::Ek,
        Column::ConfI,
        Column::TermI,
        Column::JI,
        Column::ConfK,
        Column::TermK,
        Column::JK,
        Column::Type,
        Column::TpRef,
        Column::LineRef,
    ];

    /// The literal header name of this column.
    pub fn name(self) -> &'static str {
        match self {
            Column::Element => "element",
            Column::SpNum => "sp_num",
            Column::ObsWl => "obs_wl(nm)",
            Column::UncObsWl => "unc_obs_wl",
            Column::RitzWl => "ritz_wl_vac(nm)",
            Column::UncRitzWl => "unc_ritz_wl",
            Column::Intens => "intens",
            Column::Aki => "Aki(s^-1)",
            Column::Acc => "Acc",
            Column::Ei => "Ei(eV)",
            Column::Ek => "Ek(eV)",
            Column::ConfI => "conf_i",
            Column::TermI => "term_i",
            Column::JI => "J_i",
            Column::ConfK => "conf_k",
            Column::TermK => "term_k",
            Column::JK => "J_k",
            Column::Type => "Type",
            Column::TpRef => "tp_ref",
            Column::LineRef => "line_ref",
        }
    }

    /// Look up a column by its (already normalized) header name.
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Columns shown by default when the application starts.
pub const DEFAULT_COLUMNS: [Column; 9] = [
    Column::Element,
    Column::SpNum,
    Column::ObsWl,
    Column::RitzWl,
    Column::Intens,
    Column::Ei,
    Column::Ek,
    Column::ConfI,
    Column::ConfK,
];

// ---------------------------------------------------------------------------
// SpectralLine – one row of the line list
// ---------------------------------------------------------------------------

/// A single spectral transition.
///
/// Numeric fields that may be absent in the source file are `Option`s.
/// `wavelength` is derived once at load time: the observed wavelength when
/// present, the Ritz vacuum wavelength otherwise. Rows with neither never
/// make it into a [`LineTable`], so this field is always meaningful.
#[derive(Debug, Clone, Default)]
pub struct SpectralLine {
    pub element: String,
    pub sp_num: Option<i64>,
    pub obs_wl: Option<f64>,
    pub unc_obs_wl: Option<f64>,
    pub ritz_wl: Option<f64>,
    pub unc_ritz_wl: Option<f64>,
    pub intens: Option<f64>,
    pub aki: Option<f64>,
    pub acc: String,
    pub ei: Option<f64>,
    pub ek: Option<f64>,
    pub conf_i: String,
    pub term_i: String,
    pub j_i: String,
    pub conf_k: String,
    pub term_k: String,
    pub j_k: String,
    pub line_type: String,
    pub tp_ref: String,
    pub line_ref: String,
    /// Observed wavelength if present, Ritz vacuum wavelength otherwise.
    pub wavelength: f64,
}

impl SpectralLine {
    /// The display text for one cell. Missing values render as an empty
    /// string, never as "NaN".
    pub fn cell(&self, col: Column) -> String {
        fn float(v: Option<f64>) -> String {
            v.map(|f| f.to_string()).unwrap_or_default()
        }
        match col {
            Column::Element => self.element.clone(),
            Column::SpNum => self.sp_num.map(|n| n.to_string()).unwrap_or_default(),
            Column::ObsWl => float(self.obs_wl),
            Column::UncObsWl => float(self.unc_obs_wl),
            Column::RitzWl => float(self.ritz_wl),
            Column::UncRitzWl => float(self.unc_ritz_wl),
            Column::Intens => float(self.intens),
            Column::Aki => float(self.aki),
            Column::Acc => self.acc.clone(),
            Column::Ei => float(self.ei),
            Column::Ek => float(self.ek),
            Column::ConfI => self.conf_i.clone(),
            Column::TermI => self.term_i.clone(),
            Column::JI => self.j_i.clone(),
            Column::ConfK => self.conf_k.clone(),
            Column::TermK => self.term_k.clone(),
            Column::JK => self.j_k.clone(),
            Column::Type => self.line_type.clone(),
            Column::TpRef => self.tp_ref.clone(),
            Column::LineRef => self.line_ref.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// LineTable – the complete loaded line list
// ---------------------------------------------------------------------------

/// The full parsed line list, immutable after load.
#[derive(Debug, Clone)]
pub struct LineTable {
    /// All spectral lines, in file order.
    pub lines: Vec<SpectralLine>,
    /// Sorted set of unique element symbols present in the table.
    pub elements: BTreeSet<String>,
}

impl LineTable {
    /// Build the element index from the loaded lines.
    pub fn from_lines(lines: Vec<SpectralLine>) -> Self {
        let elements = lines.iter().map(|l| l.element.clone()).collect();
        LineTable { lines, elements }
    }

    /// Number of spectral lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_round_trip() {
        for col in Column::ALL {
            assert_eq!(Column::from_name(col.name()), Some(col));
        }
        assert_eq!(Column::from_name("obs_wl_vac(nm)"), None);
    }

    #[test]
    fn missing_cells_render_empty() {
        let line = SpectralLine {
            element: "Fe".to_string(),
            obs_wl: Some(540.577),
            wavelength: 540.577,
            ..Default::default()
        };
        assert_eq!(line.cell(Column::Element), "Fe");
        assert_eq!(line.cell(Column::ObsWl), "540.577");
        assert_eq!(line.cell(Column::Intens), "");
        assert_eq!(line.cell(Column::SpNum), "");
    }

    #[test]
    fn element_index_is_unique_and_sorted() {
        let mk = |el: &str| SpectralLine {
            element: el.to_string(),
            wavelength: 500.0,
            ..Default::default()
        };
        let table = LineTable::from_lines(vec![mk("Na"), mk("Fe"), mk("Na"), mk("H")]);
        let elements: Vec<&str> = table.elements.iter().map(String::as_str).collect();
        assert_eq!(elements, ["Fe", "H", "Na"]);
        assert_eq!(table.len(), 4);
    }
}
