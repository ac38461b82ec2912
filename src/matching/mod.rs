//! Placing resistance genes on ImmeDB mobile elements.
//!
//! - [`Resolver`]: per-row lookup of a strain's BLAST hits
//! - [`FamilyPredicate`] / [`IceMatcher`]: which annotations count as ICE-family
//!
//! ## Algorithm
//!
//! For one resistance gene on contig `SEQUENCE` spanning `START..=END`:
//!
//! 1. Read `{project_folder}/{strain}/immeDB/{strain}.blastn.tsv`
//! 2. Keep hits with `query == SEQUENCE`, `q_start <= START` and `q_end >= END`
//! 3. Map each kept hit's subject accession to its ImmeDB name
//! 4. Choose the first ICE-family hit in file order, or the first hit if none is ICE
//! 5. Count names over all kept hits
//!
//! ## Example
//!
//! ```rust
//! use immedb_join::core::AnnotationMap;
//! use immedb_join::matching::{GeneQuery, IceMatcher, Resolver};
//! use immedb_join::parsing::blastn::parse_blastn_text;
//! use immedb_join::storage::{DefaultStorage, Location};
//!
//! let annotations: AnnotationMap = [("ACC1", "IME1")].into_iter().collect();
//! let hits = parse_blastn_text(
//!     "ctg1\tACC1\t99\t200\t0\t0\t50\t250\t1\t200\t0\t370\t900\t200\t100\tE. coli\n",
//! )
//! .unwrap();
//!
//! let matcher = IceMatcher::default();
//! let folder = Location::parse("project");
//! let resolver = Resolver::new(&DefaultStorage, &annotations, &matcher, &folder);
//! let query = GeneQuery { strain: "S1", sequence: "ctg1", start: 100, end: 200 };
//!
//! let resolution = resolver.resolve_hits(hits, &query);
//! assert_eq!(resolution.hit().unwrap().annotation.as_deref(), Some("IME1"));
//! ```

pub mod family;
pub mod resolver;

pub use family::{FamilyPredicate, IceMatcher, MatchMode};
pub use resolver::{GeneQuery, Resolution, ResolveError, ResolvedHit, Resolver};
