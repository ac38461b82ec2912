
use crate::parsing::ParseError;
use crate::utils::validation::{parse_coordinate, strain_from_file};

/// Number of leading Abricate columns carried into the output
pub const PRIMARY_COLUMN_LIMIT: usize = 14;

/// Column holding the strain's source file, after renaming from `#FILE`
pub const FILE_COLUMN: &str = "FILE";

/// Raw name of the file column as Abricate writes it
pub const RAW_FILE_COLUMN: &str = "#FILE";

pub const SEQUENCE_COLUMN: &str = "SEQUENCE";
pub const START_COLUMN: &str = "START";
pub const END_COLUMN: &str = "END";

/// Output names of the 16 BLAST tabular fields in a mobile-element hit
pub const MOBILE_ELEMENT_COLUMNS: [&str; 16] = [
    "query",
    "subject",
    "perc_identity",
    "alignment_length",
    "mismatches",
    "gap_opens",
    "q_start",
    "q_end",
    "s_start",
    "s_end",
    "evalue",
    "bit_score",
    "query_length",
    "subject_length",
    "perc_query_coverage_per_subject",
    "subject sci names",
];

/// Columns derived from the annotation map
pub const ANNOTATION_COLUMNS: [&str; 2] = ["ImmeDB_values", "All_immeDB_annotations"];

/// One alignment of a strain contig against the ImmeDB element database.
///
/// All fields are kept as the text found on disk so they can be written back
/// verbatim; only the query coordinates are parsed, since containment needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileElementHit {
    /// The 16 fields in [`MOBILE_ELEMENT_COLUMNS`] order
    fields: Vec<String>,

    /// Parsed `q_start`
    pub q_start: u64,

    /// Parsed `q_end`
    pub q_end: u64,
}

impl MobileElementHit {
    pub const QUERY: usize = 0;
    pub const SUBJECT: usize = 1;
    pub const Q_START: usize = 6;
    pub const Q_END: usize = 7;

    /// Build a hit from exactly 16 raw fields.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` on a wrong field count, or
    /// `ParseError::InvalidCoordinate` if `q_start`/`q_end` are not integers.
    pub fn from_fields(fields: Vec<String>) -> Result<Self, ParseError> {
        if fields.len() != MOBILE_ELEMENT_COLUMNS.len() {
            return Err(ParseError::InvalidFormat(format!(
                "expected {} fields in mobile-element hit, found {}",
                MOBILE_ELEMENT_COLUMNS.len(),
                fields.len()
            )));
        }

        let q_start = parse_coordinate(MOBILE_ELEMENT_COLUMNS[Self::Q_START], &fields[Self::Q_START])?;
        let q_end = parse_coordinate(MOBILE_ELEMENT_COLUMNS[Self::Q_END], &fields[Self::Q_END])?;

        Ok(Self {
            fields,
            q_start,
            q_end,
        })
    }

    /// Contig name of the strain assembly
    pub fn query(&self) -> &str {
        &self.fields[Self::QUERY]
    }

    /// Accession of the ImmeDB element, e.g. `NZ_NMTU01000006.1:71946-83411`
    pub fn subject(&self) -> &str {
        &self.fields[Self::SUBJECT]
    }

    /// All fields in output column order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// True if this hit lies on `sequence` and spans `[start, end]` completely
    pub fn contains(&self, sequence: &str, start: u64, end: u64) -> bool {
        self.query() == sequence && self.q_start <= start && self.q_end >= end
    }
}

/// One row of the Abricate resistance-gene report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResistanceHit {
    /// Position of the row in the input file, zero-based
    pub index: usize,

    /// Values of the kept primary columns, in header order
    pub values: Vec<String>,
}

/// Positions of the columns the resolver needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryColumns {
    pub file: usize,
    pub sequence: usize,
    pub start: usize,
    pub end: usize,
}

/// The loaded Abricate report, already truncated, renamed and sorted
#[derive(Debug, Clone)]
pub struct PrimaryTable {
    pub header: Vec<String>,
    pub columns: PrimaryColumns,
    pub rows: Vec<ResistanceHit>,
}

impl PrimaryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn file<'a>(&self, row: &'a ResistanceHit) -> &'a str {
        &row.values[self.columns.file]
    }

    pub fn sequence<'a>(&self, row: &'a ResistanceHit) -> &'a str {
        &row.values[self.columns.sequence]
    }

    /// Strain identifier derived from the `FILE` value
    pub fn strain<'a>(&self, row: &'a ResistanceHit) -> &'a str {
        strain_from_file(self.file(row))
    }

    /// Parse the `START`/`END` pair of a row.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidCoordinate` if either value is not a
    /// non-negative integer.
    pub fn coordinates(&self, row: &ResistanceHit) -> Result<(u64, u64), ParseError> {
        let start = parse_coordinate(START_COLUMN, &row.values[self.columns.start])?;
        let end = parse_coordinate(END_COLUMN, &row.values[self.columns.end])?;
        Ok((start, end))
    }
}
