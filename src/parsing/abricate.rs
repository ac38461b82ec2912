use tracing::debug;

use crate::core::hit::{
    PrimaryColumns, PrimaryTable, ResistanceHit, END_COLUMN, FILE_COLUMN, PRIMARY_COLUMN_LIMIT,
    RAW_FILE_COLUMN, SEQUENCE_COLUMN, START_COLUMN,
};
use crate::parsing::ParseError;
use crate::storage::{Location, Storage};

/// Load an Abricate report from `location`.
///
/// # Errors
///
/// Returns `ParseError::Storage` if the file cannot be read, or the errors of
/// [`parse_abricate_text`].
pub fn load_abricate<S: Storage + ?Sized>(
    storage: &S,
    location: &Location,
) -> Result<PrimaryTable, ParseError> {
    let text = storage.read_text(location)?;
    parse_abricate_text(&text)
}

/// Parse a comma-separated Abricate report.
///
/// Only the first 14 columns are kept and every value stays text. The `#FILE`
/// column is renamed to `FILE` and rows are stably sorted by it.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header has fewer than 14
/// columns, a required column is missing, or a row's field count differs from
/// the header's; `ParseError::Csv` on malformed quoting.
pub fn parse_abricate_text(text: &str) -> Result<PrimaryTable, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let raw_header = reader.headers()?.clone();
    if raw_header.len() < PRIMARY_COLUMN_LIMIT {
        return Err(ParseError::InvalidFormat(format!(
            "expected at least {PRIMARY_COLUMN_LIMIT} columns, found {}",
            raw_header.len()
        )));
    }

    let header: Vec<String> = raw_header
        .iter()
        .take(PRIMARY_COLUMN_LIMIT)
        .map(|name| {
            if name == RAW_FILE_COLUMN {
                FILE_COLUMN.to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let columns = PrimaryColumns {
        file: find_column(&header, FILE_COLUMN)?,
        sequence: find_column(&header, SEQUENCE_COLUMN)?,
        start: find_column(&header, START_COLUMN)?,
        end: find_column(&header, END_COLUMN)?,
    };

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != raw_header.len() {
            // Header is line 1
            let line_num = record.position().map_or(index + 2, |p| p.line() as usize);
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {}",
                record.len(),
                raw_header.len()
            )));
        }

        rows.push(ResistanceHit {
            index,
            values: record
                .iter()
                .take(PRIMARY_COLUMN_LIMIT)
                .map(str::to_string)
                .collect(),
        });
    }

    // Vec::sort_by is stable, so rows of the same strain keep file order
    rows.sort_by(|a, b| a.values[columns.file].cmp(&b.values[columns.file]));

    debug!(
        "Parsed {} resistance-gene hits with columns {:?}",
        rows.len(),
        header
    );

    Ok(PrimaryTable {
        header,
        columns,
        rows,
    })
}

fn find_column(header: &[String], name: &str) -> Result<usize, ParseError> {
    header.iter().position(|h| h == name).ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "missing column '{name}' in the first {PRIMARY_COLUMN_LIMIT} columns"
        ))
    })
}
