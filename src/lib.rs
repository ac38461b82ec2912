//! # immedb-join
//!
//! Places antibiotic-resistance genes found by Abricate on the mobile genetic
//! elements (ICEs, IMEs, ...) found by aligning each strain's assembly against
//! ImmeDB.
//!
//! For each resistance-gene hit the strain's ImmeDB BLAST table is read, hits
//! that fully span the gene on the same contig are kept, and the best one is
//! appended to the row together with its ImmeDB name and a count of all
//! containing element names.
//!
//! ## Features
//!
//! - **Containment, not overlap**: `q_start <= START` and `q_end >= END`
//! - **ICE priority**: ICE-family elements win over other elements, then file order
//! - **1:1 join**: exactly one output row per input row
//! - **Local or remote inputs**: paths, `http(s)://`, `s3://` and `gs://` URIs,
//!   gzip handled transparently
//!
//! ## Example
//!
//! ```rust,no_run
//! use immedb_join::join::{run_join, JoinConfig};
//! use immedb_join::storage::{DefaultStorage, Location};
//!
//! let config = JoinConfig {
//!     project_folder: Location::parse("/data/Blast/MITI-MCB"),
//!     ..JoinConfig::default()
//! };
//!
//! let summary = run_join(
//!     &DefaultStorage::new(),
//!     &config,
//!     &Location::parse("abricate_output.csv"),
//!     &Location::parse("Data1_MGE_sequences.annotations.csv"),
//!     &Location::parse("abricate_immedb_output.csv"),
//! )
//! .unwrap();
//!
//! println!("{} of {} rows on a mobile element", summary.rows_with_hit, summary.rows);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Resistance-gene rows, mobile-element hits, annotation maps
//! - [`parsing`]: Loaders for the Abricate, annotation and BLAST tables
//! - [`storage`]: Local and remote byte access
//! - [`matching`]: Per-row resolution and the ICE predicate
//! - [`join`]: Whole-table assembly and CSV output
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod join;
pub mod matching;
pub mod parsing;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::annotation::{AnnotationCounts, AnnotationMap};
pub use crate::core::hit::{MobileElementHit, PrimaryTable, ResistanceHit};
pub use join::{run_join, JoinConfig, JoinError, JoinSummary};
pub use matching::{FamilyPredicate, IceMatcher, Resolution, Resolver};
pub use storage::{DefaultStorage, Location, Storage};
