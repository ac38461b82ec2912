use thiserror::Error;
use tracing::{debug, info};

use crate::core::annotation::{AnnotationCounts, AnnotationMap};
use crate::core::hit::MobileElementHit;
use crate::matching::family::FamilyPredicate;
use crate::parsing::blastn::load_blastn;
use crate::parsing::ParseError;
use crate::storage::{Location, Storage, StorageError};

/// Name of the per-strain subdirectory holding ImmeDB results
pub const IMMEDB_DIR: &str = "immeDB";

/// Suffix of a strain's BLAST result file
pub const BLASTN_SUFFIX: &str = ".blastn.tsv";

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No ImmeDB results for strain '{strain}' at {location}")]
    Lookup { strain: String, location: String },

    #[error("Failed to read ImmeDB results for strain '{strain}': {source}")]
    Parse {
        strain: String,
        #[source]
        source: ParseError,
    },
}

impl ResolveError {
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}

/// One resistance gene to place on a mobile element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneQuery<'a> {
    pub strain: &'a str,
    pub sequence: &'a str,
    pub start: u64,
    pub end: u64,
}

/// The chosen containing hit for one resistance gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHit {
    /// Best containing hit
    pub hit: MobileElementHit,

    /// Annotation of the best hit's subject, `None` if unmapped
    pub annotation: Option<String>,

    /// Annotations over every containing hit, the best one included
    pub all_annotations: AnnotationCounts,
}

/// Outcome of resolving one resistance gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No mobile-element hit spans the gene
    NoContainingHit,
    Hit(ResolvedHit),
}

impl Resolution {
    pub fn hit(&self) -> Option<&ResolvedHit> {
        match self {
            Self::Hit(resolved) => Some(resolved),
            Self::NoContainingHit => None,
        }
    }
}

/// Location of a strain's ImmeDB results:
/// `{project_folder}/{strain}/immeDB/{strain}.blastn.tsv`
pub fn strain_results_location(project_folder: &Location, strain: &str) -> Location {
    project_folder.join([
        strain.to_string(),
        IMMEDB_DIR.to_string(),
        format!("{strain}{BLASTN_SUFFIX}"),
    ])
}

/// Resolves resistance genes against per-strain ImmeDB results.
///
/// Each call to [`Resolver::resolve`] reads the strain's result file afresh;
/// nothing is cached between rows.
pub struct Resolver<'a, S: Storage + ?Sized, P: FamilyPredicate + ?Sized> {
    storage: &'a S,
    annotations: &'a AnnotationMap,
    predicate: &'a P,
    project_folder: &'a Location,
}

impl<'a, S: Storage + ?Sized, P: FamilyPredicate + ?Sized> Resolver<'a, S, P> {
    pub fn new(
        storage: &'a S,
        annotations: &'a AnnotationMap,
        predicate: &'a P,
        project_folder: &'a Location,
    ) -> Self {
        Self {
            storage,
            annotations,
            predicate,
            project_folder,
        }
    }

    /// Find the best mobile-element hit containing `query`.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Lookup` if the strain has no result file, or
    /// `ResolveError::Parse` if the file exists but cannot be read or parsed.
    pub fn resolve(&self, query: &GeneQuery<'_>) -> Result<Resolution, ResolveError> {
        let location = strain_results_location(self.project_folder, query.strain);
        if query.strain.is_empty() {
            return Err(ResolveError::Lookup {
                strain: String::new(),
                location: location.to_string(),
            });
        }

        info!(
            "Applying filters to immedb results for '{}' from '{}'",
            query.strain, location
        );

        let hits = match load_blastn(self.storage, &location) {
            Ok(hits) => hits,
            Err(ParseError::Storage(StorageError::NotFound(_))) => {
                return Err(ResolveError::Lookup {
                    strain: query.strain.to_string(),
                    location: location.to_string(),
                });
            }
            Err(source) => {
                return Err(ResolveError::Parse {
                    strain: query.strain.to_string(),
                    source,
                });
            }
        };

        Ok(self.resolve_hits(hits, query))
    }

    /// Filter `hits` (in file order) to those containing `query` and pick the best.
    pub fn resolve_hits(&self, hits: Vec<MobileElementHit>, query: &GeneQuery<'_>) -> Resolution {
        let mut candidates: Vec<(MobileElementHit, Option<String>)> = hits
            .into_iter()
            .filter(|hit| hit.contains(query.sequence, query.start, query.end))
            .map(|hit| {
                let annotation = self.annotations.get(hit.subject()).map(str::to_string);
                (hit, annotation)
            })
            .collect();

        let mut all_annotations = AnnotationCounts::new();
        for (_, annotation) in &candidates {
            all_annotations.add(annotation.as_deref());
        }

        let Some(best) = select_best(&candidates, self.predicate) else {
            debug!(
                "No containing hit for {}:{}-{} in strain '{}'",
                query.sequence, query.start, query.end, query.strain
            );
            return Resolution::NoContainingHit;
        };

        let (hit, annotation) = candidates.swap_remove(best);

        debug!(
            "{} containing hit(s) for {}:{}-{} in strain '{}'; chose {} ({})",
            all_annotations.total(),
            query.sequence,
            query.start,
            query.end,
            query.strain,
            hit.subject(),
            annotation.as_deref().unwrap_or("unmapped")
        );

        Resolution::Hit(ResolvedHit {
            hit,
            annotation,
            all_annotations,
        })
    }
}

/// Index of the best candidate: the first ICE-family hit if any, else the first hit.
///
/// Unmapped candidates are never ICE-family.
pub fn select_best<P: FamilyPredicate + ?Sized>(
    candidates: &[(MobileElementHit, Option<String>)],
    predicate: &P,
) -> Option<usize> {
    candidates
        .iter()
        .position(|(_, annotation)| {
            annotation
                .as_deref()
                .is_some_and(|name| predicate.is_ice_family(name))
        })
        .or_else(|| (!candidates.is_empty()).then_some(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::family::IceMatcher;

    fn hit(query: &str, subject: &str, q_start: u64, q_end: u64) -> MobileElementHit {
        let mut fields: Vec<String> = (0..16).map(|i| format!("f{i}")).collect();
        fields[MobileElementHit::QUERY] = query.to_string();
        fields[MobileElementHit::SUBJECT] = subject.to_string();
        fields[MobileElementHit::Q_START] = q_start.to_string();
        fields[MobileElementHit::Q_END] = q_end.to_string();
        MobileElementHit::from_fields(fields).unwrap()
    }

    fn gene(start: u64, end: u64) -> GeneQuery<'static> {
        GeneQuery {
            strain: "S1",
            sequence: "ctg1",
            start,
            end,
        }
    }

    fn annotations() -> AnnotationMap {
        [
            ("ACC1", "IME1"),
            ("ACC2", "ICESa2603"),
            ("ACC3", "IMEs459"),
            ("ACC4", "ICEBs1"),
            ("NZ_NMTU01000006.1:71946-83411", "IMEs459"),
        ]
        .into_iter()
        .collect()
    }

    fn resolve(hits: Vec<MobileElementHit>, query: &GeneQuery<'_>) -> Resolution {
        let annotations = annotations();
        let matcher = IceMatcher::default();
        let folder = Location::parse("/unused");
        let storage = crate::storage::DefaultStorage::new();
        Resolver::new(&storage, &annotations, &matcher, &folder).resolve_hits(hits, query)
    }

    #[test]
    fn test_single_containing_hit() {
        let resolution = resolve(vec![hit("ctg1", "ACC1", 50, 250)], &gene(100, 200));
        let resolved = resolution.hit().unwrap();

        assert_eq!(resolved.hit.subject(), "ACC1");
        assert_eq!(resolved.annotation.as_deref(), Some("IME1"));
        assert_eq!(resolved.all_annotations.get(Some("IME1")), 1);
        assert_eq!(resolved.all_annotations.total(), 1);
    }

    #[test]
    fn test_start_after_gene_is_not_containing() {
        let resolution = resolve(vec![hit("ctg1", "ACC1", 150, 250)], &gene(100, 200));
        assert_eq!(resolution, Resolution::NoContainingHit);
    }

    #[test]
    fn test_other_sequence_ignored() {
        let resolution = resolve(vec![hit("ctg2", "ACC1", 1, 1000)], &gene(100, 200));
        assert_eq!(resolution, Resolution::NoContainingHit);
    }

    #[test]
    fn test_ice_hit_preferred_over_earlier_hits() {
        let hits = vec![
            hit("ctg1", "ACC1", 50, 250),
            hit("ctg1", "ACC3", 10, 300),
            hit("ctg1", "ACC2", 0, 900),
            hit("ctg1", "ACC4", 0, 900),
        ];
        let resolution = resolve(hits, &gene(100, 200));
        let resolved = resolution.hit().unwrap();

        // First ICE on disk wins among ICE hits
        assert_eq!(resolved.hit.subject(), "ACC2");
        assert_eq!(resolved.annotation.as_deref(), Some("ICESa2603"));
        assert_eq!(resolved.all_annotations.total(), 4);
    }

    #[test]
    fn test_first_on_disk_without_ice() {
        let hits = vec![
            hit("ctg1", "ACC9", 0, 900),
            hit("ctg1", "ACC3", 50, 250),
            hit("ctg1", "ACC1", 50, 250),
        ];
        let resolution = resolve(hits, &gene(100, 200));
        let resolved = resolution.hit().unwrap();

        assert_eq!(resolved.hit.subject(), "ACC9");
        assert_eq!(resolved.annotation, None);
        assert_eq!(resolved.all_annotations.get(None), 1);
        assert_eq!(resolved.all_annotations.get(Some("IMEs459")), 1);
        assert_eq!(resolved.all_annotations.total(), 3);
    }

    #[test]
    fn test_counts_exclude_non_containing_hits() {
        let hits = vec![
            hit("ctg1", "ACC1", 50, 250),
            hit("ctg1", "ACC1", 120, 250),
            hit("ctg1", "ACC1", 60, 190),
            hit("ctg1", "ACC1", 90, 201),
        ];
        let resolution = resolve(hits, &gene(100, 200));
        assert_eq!(resolution.hit().unwrap().all_annotations.get(Some("IME1")), 2);
    }

    #[test]
    fn test_accession_verbatim() {
        let resolution = resolve(
            vec![hit("ctg1", "NZ_NMTU01000006.1:71946-83411", 50, 250)],
            &gene(100, 200),
        );
        let resolved = resolution.hit().unwrap();
        assert_eq!(resolved.hit.subject(), "NZ_NMTU01000006.1:71946-83411");
        assert_eq!(resolved.annotation.as_deref(), Some("IMEs459"));
    }

    #[test]
    fn test_select_best_empty() {
        assert_eq!(select_best(&[], &IceMatcher::default()), None);
    }

    #[test]
    fn test_strain_results_location() {
        let folder = Location::parse("/data/MITI-MCB");
        assert_eq!(
            strain_results_location(&folder, "SH0001342-00095"),
            Location::parse("/data/MITI-MCB/SH0001342-00095/immeDB/SH0001342-00095.blastn.tsv")
        );
    }

    #[test]
    fn test_missing_strain_file_is_lookup_error() {
        let dir = tempfile::tempdir().unwrap();
        let folder = Location::Local(dir.path().to_path_buf());
        let annotations = annotations();
        let matcher = IceMatcher::default();
        let storage = crate::storage::DefaultStorage::new();
        let resolver = Resolver::new(&storage, &annotations, &matcher, &folder);

        let err = resolver.resolve(&gene(100, 200)).unwrap_err();
        assert!(err.is_lookup());
    }

    #[test]
    fn test_resolve_reads_strain_file() {
        let dir = tempfile::tempdir().unwrap();
        let strain_dir = dir.path().join("S1").join(IMMEDB_DIR);
        std::fs::create_dir_all(&strain_dir).unwrap();
        let mut line: Vec<String> = (0..16).map(|i| format!("f{i}")).collect();
        line[0] = "ctg1".into();
        line[1] = "ACC1".into();
        line[6] = "50".into();
        line[7] = "250".into();
        std::fs::write(
            strain_dir.join("S1.blastn.tsv"),
            format!("# header\n{}\n", line.join("\t")),
        )
        .unwrap();

        let folder = Location::Local(dir.path().to_path_buf());
        let annotations = annotations();
        let matcher = IceMatcher::default();
        let storage = crate::storage::DefaultStorage::new();
        let resolver = Resolver::new(&storage, &annotations, &matcher, &folder);

        let resolution = resolver.resolve(&gene(100, 200)).unwrap();
        assert_eq!(
            resolution.hit().unwrap().annotation.as_deref(),
            Some("IME1")
        );
    }
}
