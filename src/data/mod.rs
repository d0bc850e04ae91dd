//! Data layer: core types, loading, filtering, and projection.
//!
//! Architecture:
//! ```text
//!  NIST .tsv line list
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  strip repeated headers, coerce cells → LineTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ LineTable │  Vec<SpectralLine>, element index
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  range + element predicates → boolean mask
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ project   │  colored display rows + sorted wavelength index
//!   └──────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub mod filter;
pub mod loader;
pub mod model;
pub mod project;

/// Errors surfaced by the data layer.
///
/// `Io` and `Malformed` are kept distinct so the UI can tell "the file is
/// not there" apart from "the file is there but is not a NIST line list".
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line list: {0}")]
    Malformed(String),

    #[error("no line list loaded")]
    NoData,
}
