use std::io::Write;

use crate::core::hit::{PrimaryTable, ANNOTATION_COLUMNS, MOBILE_ELEMENT_COLUMNS};
use crate::join::JoinError;
use crate::matching::Resolution;

/// Header of the combined table: primary columns, hit columns, annotation columns
pub fn output_header(table: &PrimaryTable) -> Vec<String> {
    table
        .header
        .iter()
        .cloned()
        .chain(MOBILE_ELEMENT_COLUMNS.iter().map(|c| (*c).to_string()))
        .chain(ANNOTATION_COLUMNS.iter().map(|c| (*c).to_string()))
        .collect()
}

/// The 18 appended fields for one row; every field is `na_value` without a hit.
///
/// # Errors
///
/// Returns `JoinError::Json` if the annotation counts cannot be serialized.
pub fn resolution_fields(resolution: &Resolution, na_value: &str) -> Result<Vec<String>, JoinError> {
    let width = MOBILE_ELEMENT_COLUMNS.len() + ANNOTATION_COLUMNS.len();

    let Resolution::Hit(resolved) = resolution else {
        return Ok(vec![na_value.to_string(); width]);
    };

    let mut fields = Vec::with_capacity(width);
    fields.extend(resolved.hit.fields().iter().cloned());
    fields.push(
        resolved
            .annotation
            .clone()
            .unwrap_or_else(|| na_value.to_string()),
    );
    fields.push(resolved.all_annotations.to_json(na_value)?);
    Ok(fields)
}

/// Write the combined table as CSV with a header and no index column.
///
/// `resolutions[i]` belongs to `table.rows[i]`.
///
/// # Errors
///
/// Returns `JoinError::Csv` if writing fails, or `JoinError::RowCount` if the
/// number of resolutions does not match the number of rows.
pub fn write_joined<W: Write>(
    writer: W,
    table: &PrimaryTable,
    resolutions: &[Resolution],
    na_value: &str,
) -> Result<(), JoinError> {
    if resolutions.len() != table.len() {
        return Err(JoinError::RowCount {
            rows: table.len(),
            resolutions: resolutions.len(),
        });
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(output_header(table))?;

    for (row, resolution) in table.rows.iter().zip(resolutions) {
        let extra = resolution_fields(resolution, na_value)?;
        csv_writer.write_record(row.values.iter().chain(extra.iter()))?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::annotation::AnnotationCounts;
    use crate::core::hit::MobileElementHit;
    use crate::matching::ResolvedHit;
    use crate::parsing::abricate::parse_abricate_text;

    const ABRICATE: &str = "#FILE,SEQUENCE,START,END,STRAND,GENE,COVERAGE,COVERAGE_MAP,GAPS,%COVERAGE,%IDENTITY,DATABASE,ACCESSION,PRODUCT\n\
        S1.tab,ctg1,100,200,+,tetM,1-100/100,===,0/0,100.00,99.50,card,AB1,\"tet, ribosomal\"\n";

    fn resolved() -> Resolution {
        let mut fields: Vec<String> = (0..16).map(|i| format!("v{i}")).collect();
        fields[6] = "50".into();
        fields[7] = "250".into();
        let mut counts = AnnotationCounts::new();
        counts.add(Some("IME1"));
        counts.add(None);
        Resolution::Hit(ResolvedHit {
            hit: MobileElementHit::from_fields(fields).unwrap(),
            annotation: None,
            all_annotations: counts,
        })
    }

    #[test]
    fn test_header_order() {
        let table = parse_abricate_text(ABRICATE).unwrap();
        let header = output_header(&table);
        assert_eq!(header.len(), 14 + 16 + 2);
        assert_eq!(header[0], "FILE");
        assert_eq!(header[14], "query");
        assert_eq!(header[29], "subject sci names");
        assert_eq!(header[30], "ImmeDB_values");
        assert_eq!(header[31], "All_immeDB_annotations");
    }

    #[test]
    fn test_no_hit_fields_are_na() {
        let fields = resolution_fields(&Resolution::NoContainingHit, "na").unwrap();
        assert_eq!(fields.len(), 18);
        assert!(fields.iter().all(|f| f == "na"));
    }

    #[test]
    fn test_unmapped_top_hit() {
        let fields = resolution_fields(&resolved(), "na").unwrap();
        assert_eq!(fields[0], "v0");
        assert_eq!(fields[6], "50");
        assert_eq!(fields[16], "na");
        assert_eq!(fields[17], r#"{"IME1":1,"na":1}"#);
    }

    #[test]
    fn test_write_joined_quotes_fields() {
        let table = parse_abricate_text(ABRICATE).unwrap();
        let mut out = Vec::new();
        write_joined(&mut out, &table, &[resolved()], "na").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("FILE,SEQUENCE,START,END,"));
        assert!(lines[1].contains("\"tet, ribosomal\""));
        assert!(lines[1].ends_with(r#",na,"{""IME1"":1,""na"":1}""#));
    }

    #[test]
    fn test_row_count_mismatch() {
        let table = parse_abricate_text(ABRICATE).unwrap();
        let result = write_joined(Vec::<u8>::new(), &table, &[], "na");
        assert!(matches!(result, Err(JoinError::RowCount { .. })));
    }
}
