use crate::core::hit::{MobileElementHit, MOBILE_ELEMENT_COLUMNS};
use crate::parsing::ParseError;
use crate::storage::{Location, Storage};

/// Load one strain's BLAST results against ImmeDB.
///
/// # Errors
///
/// Returns `ParseError::Storage` if the file cannot be read (including
/// `StorageError::NotFound` when it does not exist), or the errors of
/// [`parse_blastn_text`].
pub fn load_blastn<S: Storage + ?Sized>(
    storage: &S,
    location: &Location,
) -> Result<Vec<MobileElementHit>, ParseError> {
    let text = storage.read_text(location)?;
    parse_blastn_text(&text)
}

/// Parse tab-separated BLAST output with the 16 ImmeDB columns, in file order.
///
/// Lines starting with `#` and blank lines are skipped. Every field is kept
/// verbatim, so accessions such as `NZ_NMTU01000006.1:71946-83411` are never
/// reinterpreted.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line does not have 16 fields, or
/// `ParseError::InvalidCoordinate` if `q_start`/`q_end` are not integers.
pub fn parse_blastn_text(text: &str) -> Result<Vec<MobileElementHit>, ParseError> {
    let mut hits = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        if fields.len() != MOBILE_ELEMENT_COLUMNS.len() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {}",
                fields.len(),
                MOBILE_ELEMENT_COLUMNS.len()
            )));
        }

        let hit = MobileElementHit::from_fields(fields).map_err(|e| match e {
            ParseError::InvalidCoordinate { column, value } => ParseError::InvalidCoordinate {
                column: format!("{column} (line {line_num})"),
                value,
            },
            other => other,
        })?;
        hits.push(hit);
    }

    Ok(hits)
}
