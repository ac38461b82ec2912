//! Joining the Abricate report with per-strain ImmeDB results.
//!
//! [`assembler::run_join`] drives a whole run: load the report and the
//! annotation map, resolve every row independently, then write the combined
//! table. Output rows correspond 1:1 with input rows; a strain without an
//! ImmeDB result file only fills its rows with the null marker.

use thiserror::Error;

use crate::matching::ResolveError;
use crate::parsing::ParseError;
use crate::storage::StorageError;

pub mod assembler;
pub mod writer;

pub use assembler::{assemble, run_join, JoinConfig, JoinSummary};

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("Failed to load {what} from {location}: {source}")]
    Load {
        what: &'static str,
        location: String,
        #[source]
        source: ParseError,
    },

    #[error("Row {row} ({file}): {source}")]
    Coordinates {
        row: usize,
        file: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize annotation counts: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{resolutions} resolutions for {rows} rows")]
    RowCount { rows: usize, resolutions: usize },
}
