//! Loaders for the three input tables.
//!
//! - **Abricate report** ([`abricate`]): comma-separated, header row, first 14
//!   columns kept as text, `#FILE` renamed to `FILE`, rows sorted by `FILE`
//! - **ImmeDB annotations** ([`annotations`]): comma-separated
//!   `accession,annotation` pairs, no header handling
//! - **Per-strain BLAST hits** ([`blastn`]): tab-separated, no header, `#`
//!   comment lines skipped, 16 fixed columns
//!
//! ## Example
//!
//! ```rust
//! use immedb_join::parsing::blastn::parse_blastn_text;
//!
//! let text = "# BLASTN 2.14.0+\n\
//!     ctg1\tNZ_NMTU01000006.1:71946-83411\t99.1\t800\t2\t0\t50\t850\t1\t800\t0.0\t1400\t5000\t11466\t7\tStreptococcus suis\n";
//! let hits = parse_blastn_text(text).unwrap();
//! assert_eq!(hits[0].subject(), "NZ_NMTU01000006.1:71946-83411");
//! ```

use thiserror::Error;

use crate::storage::StorageError;

pub mod abricate;
pub mod annotations;
pub mod blastn;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid table format: {0}")]
    InvalidFormat(String),

    #[error("Invalid {column} coordinate: '{value}'")]
    InvalidCoordinate { column: String, value: String },
}
