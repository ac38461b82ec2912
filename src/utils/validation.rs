//! Centralized validation and helper functions.

use crate::parsing::ParseError;

/// Derive a strain identifier from an Abricate `FILE` value.
///
/// Takes the last non-empty `/`-separated component as a POSIX path stem:
/// trailing slashes and `.` components are ignored, and the final extension
/// is stripped unless the dot leads or ends the name. `\` is an ordinary
/// character. `assemblies/SH0001342-00095.fna` becomes `SH0001342-00095`.
///
/// # Examples
///
/// ```
/// use immedb_join::utils::validation::strain_from_file;
///
/// assert_eq!(strain_from_file("S1.tab"), "S1");
/// assert_eq!(strain_from_file("s3://bucket/run/S2.fasta"), "S2");
/// assert_eq!(strain_from_file("dir/S3.contigs.fa"), "S3.contigs");
/// assert_eq!(strain_from_file("results/S4/"), "S4");
/// ```
#[must_use]
pub fn strain_from_file(file: &str) -> &str {
    let name = file
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .next_back()
        .unwrap_or("");

    // A leading dot marks a hidden file and a trailing one is no extension
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => &name[..pos],
        _ => name,
    }
}

/// Parse a genomic coordinate held as text.
///
/// # Errors
///
/// Returns `ParseError::InvalidCoordinate` if the value is not a non-negative
/// integer.
pub fn parse_coordinate(column: &str, value: &str) -> Result<u64, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidCoordinate {
            column: column.to_string(),
            value: value.to_string(),
        })
}
