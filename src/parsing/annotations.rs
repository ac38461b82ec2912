use crate::core::annotation::AnnotationMap;
use crate::parsing::ParseError;
use crate::storage::{Location, Storage};

/// Load the ImmeDB accession -> annotation mapping from `location`.
///
/// # Errors
///
/// Returns `ParseError::Storage` if the file cannot be read, or the errors of
/// [`parse_annotations_text`].
pub fn load_annotations<S: Storage + ?Sized>(
    storage: &S,
    location: &Location,
) -> Result<AnnotationMap, ParseError> {
    let text = storage.read_text(location)?;
    parse_annotations_text(&text)
}

/// Parse `accession,annotation` rows.
///
/// Every row is data, including a first row that looks like a header. When an
/// accession repeats, its last annotation wins.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row does not have exactly two
/// fields, or `ParseError::Csv` on malformed quoting.
pub fn parse_annotations_text(text: &str) -> Result<AnnotationMap, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut map = AnnotationMap::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != 2 {
            let line_num = record.position().map_or(0, csv::Position::line);
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected 2 (accession, annotation)",
                record.len()
            )));
        }
        map.insert(&record[0], &record[1]);
    }

    Ok(map)
}
