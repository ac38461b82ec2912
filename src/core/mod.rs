//! Core data types for joining resistance-gene hits with mobile-element hits.
//!
//! - [`ResistanceHit`] / [`PrimaryTable`]: rows of the Abricate report
//! - [`MobileElementHit`]: one BLAST alignment of a strain contig against ImmeDB
//! - [`AnnotationMap`]: ImmeDB accession to element name
//! - [`AnnotationCounts`]: per-row frequency of resolved element names
//!
//! ## Containment
//!
//! A mobile-element hit is kept for a resistance gene only when it lies on the
//! same contig and spans the gene completely:
//!
//! ```text
//! q_start <= START  and  q_end >= END
//! ```
//!
//! Partial overlaps are never reported.

pub mod annotation;
pub mod hit;

pub use annotation::{AnnotationCounts, AnnotationMap};
pub use hit::{MobileElementHit, PrimaryColumns, PrimaryTable, ResistanceHit};
