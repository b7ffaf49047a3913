#![doc = include_str!("../README.md")]

use std::num::TryFromIntError;

use thiserror::Error;

pub mod batch;
pub mod collection;
pub mod matrix;
pub mod parser;
pub mod set;
pub mod stats;
pub mod table;

pub use batch::{multi_set_pvalues, multi_set_pvalues_with_rng, BatchConfig};
pub use collection::SetCollection;
pub use set::{GeneSet, Universe};
pub use stats::background::background_pvalue;
pub use stats::hypergeom::{enrichment_pvalue, tail_probability_many, tail_probability_one};
pub use stats::EnrichmentParams;
pub use table::PValueTable;

/// Number of random draws used for the background estimate if not specified otherwise
pub const DEFAULT_REPEATS: u32 = 1000;

/// Suffix appended to a query tag to label its random-background row
pub const RANDOM_SUFFIX: &str = "(random)";

/// Tag prefix for reference sets that are supplied without names
pub const REFERENCE_PREFIX: &str = "ref";

/// Tag prefix for query sets that are supplied without names
pub const QUERY_PREFIX: &str = "que";

/// Main Error type for this crate
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// Inconsistent parameters for the hypergeometric distribution
    /// or the random background sampling
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Failed to open an input or output file
    #[error("cannot open file: {0}")]
    CannotOpenFile(String),
    /// Input data does not have the expected format
    #[error("unable to parse input: {0}")]
    ParseError(String),
    /// Failed to write the result table
    #[error("unable to write table: {0}")]
    WriteError(String),
    /// Failed to convert an integer to or from usize
    #[error("integer conversion failed")]
    TryFromIntError(#[from] TryFromIntError),
}

impl From<csv::Error> for EnrichmentError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            EnrichmentError::WriteError(err.to_string())
        } else {
            EnrichmentError::ParseError(err.to_string())
        }
    }
}

impl From<std::io::Error> for EnrichmentError {
    fn from(err: std::io::Error) -> Self {
        EnrichmentError::WriteError(err.to_string())
    }
}

/// Shortcut for `Result<T, EnrichmentError>`
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;
