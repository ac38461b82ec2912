use tracing::{info, warn};

use crate::core::hit::PrimaryTable;
use crate::join::writer::write_joined;
use crate::join::JoinError;
use crate::matching::family::{FamilyPredicate, IceMatcher};
use crate::matching::resolver::{GeneQuery, Resolution, Resolver};
use crate::parsing::abricate::load_abricate;
use crate::parsing::annotations::load_annotations;
use crate::storage::{Location, Storage};

/// Default root holding one folder per strain
pub const DEFAULT_PROJECT_FOLDER: &str = "s3://genomics-workflow-core/Results/Blast/MITI-MCB";

/// Default ImmeDB accession -> annotation table
pub const DEFAULT_ANNOTATIONS: &str =
    "s3://genomics-workflow-core/scratch/sunitj/daisy/immeDB/Data1_MGE_sequences.annotations.csv";

/// Default marker for empty output cells
pub const DEFAULT_NA_VALUE: &str = "na";

/// Settings for one join run
#[derive(Debug, Clone)]
pub struct JoinConfig {
    pub project_folder: Location,
    pub ice: IceMatcher,
    /// Written in place of every missing value
    pub na_value: String,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            project_folder: Location::parse(DEFAULT_PROJECT_FOLDER),
            ice: IceMatcher::default(),
            na_value: DEFAULT_NA_VALUE.to_string(),
        }
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinSummary {
    pub rows: usize,
    pub rows_with_hit: usize,
    /// Rows whose strain had no ImmeDB result file
    pub missing_strain_files: usize,
}

/// Resolve every row of `table`, in order.
///
/// A missing per-strain file yields [`Resolution::NoContainingHit`] for that
/// row; every other failure aborts.
///
/// # Errors
///
/// Returns `JoinError::Coordinates` if a row's `START`/`END` are not integers,
/// or `JoinError::Resolve` if a strain file exists but cannot be used.
pub fn assemble<S, P>(
    table: &PrimaryTable,
    resolver: &Resolver<'_, S, P>,
) -> Result<(Vec<Resolution>, JoinSummary), JoinError>
where
    S: Storage + ?Sized,
    P: FamilyPredicate + ?Sized,
{
    let mut resolutions = Vec::with_capacity(table.len());
    let mut summary = JoinSummary {
        rows: table.len(),
        ..JoinSummary::default()
    };

    for row in &table.rows {
        let (start, end) = table
            .coordinates(row)
            .map_err(|source| JoinError::Coordinates {
                row: row.index + 1,
                file: table.file(row).to_string(),
                source,
            })?;

        let query = GeneQuery {
            strain: table.strain(row),
            sequence: table.sequence(row),
            start,
            end,
        };

        let resolution = match resolver.resolve(&query) {
            Ok(resolution) => resolution,
            Err(e) if e.is_lookup() => {
                warn!("{e}; filling row with nulls");
                summary.missing_strain_files += 1;
                Resolution::NoContainingHit
            }
            Err(e) => return Err(e.into()),
        };

        if resolution.hit().is_some() {
            summary.rows_with_hit += 1;
        }
        resolutions.push(resolution);
    }

    Ok((resolutions, summary))
}

/// Run a complete join and write the combined table to `output`.
///
/// # Errors
///
/// Returns `JoinError::Load` if either input table cannot be read or parsed,
/// the errors of [`assemble`], or a storage/CSV error while writing.
pub fn run_join<S: Storage + ?Sized>(
    storage: &S,
    config: &JoinConfig,
    abricate: &Location,
    annotations: &Location,
    output: &Location,
) -> Result<JoinSummary, JoinError> {
    info!("Reading abricate results file: {abricate}");
    let table = load_abricate(storage, abricate).map_err(|source| JoinError::Load {
        what: "abricate results",
        location: abricate.to_string(),
        source,
    })?;

    info!("Reading immedb annotations file: {annotations}");
    let annotation_map =
        load_annotations(storage, annotations).map_err(|source| JoinError::Load {
            what: "immedb annotations",
            location: annotations.to_string(),
            source,
        })?;
    info!(
        "Loaded {} resistance-gene hits and {} annotations",
        table.len(),
        annotation_map.len()
    );
    if annotation_map.is_empty() {
        warn!("Annotation table {annotations} is empty; every ImmeDB hit will be unmapped");
    }

    let resolver = Resolver::new(storage, &annotation_map, &config.ice, &config.project_folder);
    let (resolutions, summary) = assemble(&table, &resolver)?;

    // Open the destination only once every row has resolved
    info!("Writing combined table to {output}");
    let writer = storage.create_writer(output)?;
    write_joined(writer, &table, &resolutions, &config.na_value)?;

    info!(
        "Done: {} rows, {} with a containing mobile element, {} without strain results",
        summary.rows, summary.rows_with_hit, summary.missing_strain_files
    );

    Ok(summary)
}
