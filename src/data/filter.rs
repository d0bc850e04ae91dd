use std::collections::BTreeSet;

use super::model::{LineTable, SpectralLine};

// ---------------------------------------------------------------------------
// Filter predicates over the line list
// ---------------------------------------------------------------------------

/// Numeric range filter with a missing-value policy.
///
/// Bounds only ever compare against present values; a missing value passes
/// or fails solely on `show_missing`.
#[derive(Debug, Clone)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub show_missing: bool,
}

impl Default for RangeFilter {
    fn default() -> Self {
        RangeFilter {
            min: None,
            max: None,
            show_missing: true,
        }
    }
}

impl RangeFilter {
    pub fn accepts(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => {
                if self.min.is_some_and(|min| v < min) {
                    return false;
                }
                !self.max.is_some_and(|max| v > max)
            }
            None => self.show_missing,
        }
    }
}

/// Element allow-list. An empty set matches nothing, not everything: no
/// rows are shown until at least one element has been picked.
#[derive(Debug, Clone, Default)]
pub struct ElementFilter {
    pub allowed: BTreeSet<String>,
}

impl ElementFilter {
    pub fn accepts(&self, element: &str) -> bool {
        self.allowed.contains(element)
    }
}

/// The complete per-session filter set, one sub-filter per filterable field.
/// All sub-filters are ANDed. Mutated in place by the filter dialog and
/// reused across every re-projection; reset only on restart.
#[derive(Debug, Clone, Default)]
pub struct DataFilters {
    pub sp_num: RangeFilter,
    pub obs_wl: RangeFilter,
    pub intens: RangeFilter,
    pub ei: RangeFilter,
    pub ek: RangeFilter,
    pub elements: ElementFilter,
}

impl DataFilters {
    /// Whether one spectral line passes every active sub-filter.
    ///
    /// The `obs_wl` filter reads only the observed wavelength, not the
    /// derived display wavelength: a row with a Ritz value but no observed
    /// one counts as missing here.
    pub fn matches(&self, line: &SpectralLine) -> bool {
        self.elements.accepts(&line.element)
            && self.sp_num.accepts(line.sp_num.map(|n| n as f64))
            && self.obs_wl.accepts(line.obs_wl)
            && self.intens.accepts(line.intens)
            && self.ei.accepts(line.ei)
            && self.ek.accepts(line.ek)
    }
}

/// Return indices of lines that pass all active filters, in table order.
pub fn filtered_indices(table: &LineTable, filters: &DataFilters) -> Vec<usize> {
    table
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| filters.matches(line))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn line(element: &str, obs_wl: Option<f64>, ritz_wl: Option<f64>) -> SpectralLine {
        SpectralLine {
            element: element.to_string(),
            obs_wl,
            ritz_wl,
            wavelength: obs_wl.or(ritz_wl).unwrap(),
            ..Default::default()
        }
    }

    fn allow(elements: &[&str]) -> ElementFilter {
        ElementFilter {
            allowed: elements.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn range_bounds_only_compare_present_values() {
        let f = RangeFilter {
            min: Some(500.0),
            max: Some(600.0),
            show_missing: true,
        };
        assert!(f.accepts(Some(550.0)));
        assert!(f.accepts(Some(500.0)));
        assert!(f.accepts(Some(600.0)));
        assert!(!f.accepts(Some(499.9)));
        assert!(!f.accepts(Some(600.1)));
        // Missing is never compared against the bounds.
        assert!(f.accepts(None));
    }

    #[test]
    fn hide_missing_excludes_rows_regardless_of_ritz_value() {
        let filters = DataFilters {
            obs_wl: RangeFilter {
                min: Some(500.0),
                max: Some(600.0),
                show_missing: false,
            },
            elements: allow(&["Fe"]),
            ..Default::default()
        };
        // Ritz-only row: obs_wl is missing, so it is filtered out even
        // though its Ritz wavelength sits inside the range.
        assert!(!filters.matches(&line("Fe", None, Some(550.0))));
        assert!(filters.matches(&line("Fe", Some(550.0), None)));
        assert!(!filters.matches(&line("Fe", Some(650.0), Some(550.0))));
    }

    #[test]
    fn empty_element_allow_list_matches_nothing() {
        let table = LineTable::from_lines(vec![
            line("H", Some(656.279), None),
            line("Na", Some(588.995), None),
        ]);
        let filters = DataFilters::default();
        assert_eq!(filtered_indices(&table, &filters), Vec::<usize>::new());
    }

    #[test]
    fn sub_filters_are_anded() {
        let mut l = line("Na", Some(588.995), None);
        l.sp_num = Some(1);
        l.intens = Some(80000.0);
        let table = LineTable::from_lines(vec![l, line("H", Some(656.279), None)]);

        let mut filters = DataFilters {
            elements: allow(&["Na", "H"]),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table, &filters), vec![0, 1]);

        filters.intens.min = Some(1000.0);
        filters.intens.show_missing = false;
        // H has no intensity value and show_missing is off.
        assert_eq!(filtered_indices(&table, &filters), vec![0]);

        filters.sp_num.max = Some(0.0);
        assert_eq!(filtered_indices(&table, &filters), Vec::<usize>::new());
    }
}
