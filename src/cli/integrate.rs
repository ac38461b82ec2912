use clap::Args;

use crate::join::assembler::{
    run_join, JoinConfig, DEFAULT_ANNOTATIONS, DEFAULT_NA_VALUE, DEFAULT_PROJECT_FOLDER,
};
use crate::matching::family::{IceMatcher, MatchMode, DEFAULT_ICE_PATTERN};
use crate::storage::{DefaultStorage, Location};

#[derive(Args, Debug)]
pub struct IntegrateArgs {
    /// Abricate result file (CSV)
    #[arg(long, required = true)]
    pub abricate: String,

    /// ImmeDB annotations file (accession,annotation CSV)
    #[arg(
        long = "immedb_annotations",
        visible_alias = "immedb-annotations",
        default_value = DEFAULT_ANNOTATIONS
    )]
    pub immedb_annotations: String,

    /// Output file, or '-' for stdout
    #[arg(long, required = true)]
    pub output: String,

    /// Folder containing {strain}/immeDB/{strain}.blastn.tsv
    #[arg(
        long = "project_folder",
        visible_alias = "project-folder",
        default_value = DEFAULT_PROJECT_FOLDER
    )]
    pub project_folder: String,

    /// Annotation pattern marking an ICE element (repeatable)
    #[arg(long = "ice-pattern", default_value = DEFAULT_ICE_PATTERN)]
    pub ice_patterns: Vec<String>,

    /// How ICE patterns are matched against annotation names
    #[arg(long, value_enum, default_value = "prefix")]
    pub ice_match: MatchMode,

    /// Match ICE patterns case-insensitively
    #[arg(long)]
    pub ice_ignore_case: bool,

    /// Marker written for empty output cells
    #[arg(long, default_value = DEFAULT_NA_VALUE)]
    pub na_value: String,
}

impl IntegrateArgs {
    /// Settings for the join, built from the command line
    pub fn config(&self) -> JoinConfig {
        JoinConfig {
            project_folder: Location::parse(&self.project_folder),
            ice: IceMatcher::new(self.ice_patterns.clone(), self.ice_match, self.ice_ignore_case),
            na_value: self.na_value.clone(),
        }
    }
}

/// Execute the join
///
/// # Errors
///
/// Returns an error if an input cannot be loaded, a row cannot be resolved,
/// or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IntegrateArgs, verbose: bool) -> anyhow::Result<()> {
    let config = args.config();

    if verbose {
        eprintln!(
            "ICE patterns: {:?} ({:?}{})",
            config.ice.patterns,
            config.ice.mode,
            if config.ice.ignore_case {
                ", ignoring case"
            } else {
                ""
            }
        );
    }

    let summary = run_join(
        &DefaultStorage::new(),
        &config,
        &Location::parse(&args.abricate),
        &Location::parse(&args.immedb_annotations),
        &Location::parse(&args.output),
    )?;

    if summary.rows == 0 {
        eprintln!("Warning: Abricate file has no rows; wrote header only.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["immedb-join", "--abricate", "a.csv", "--output", "o.csv"])
            .unwrap();
        assert_eq!(cli.args.immedb_annotations, DEFAULT_ANNOTATIONS);
        assert_eq!(cli.args.project_folder, DEFAULT_PROJECT_FOLDER);

        let config = cli.args.config();
        assert_eq!(config.ice, IceMatcher::default());
        assert_eq!(config.na_value, "na");
    }

    #[test]
    fn test_underscore_and_hyphen_flags() {
        let cli = Cli::try_parse_from([
            "immedb-join",
            "--abricate",
            "a.csv",
            "--output",
            "o.csv",
            "--immedb_annotations",
            "ann.csv",
            "--project-folder",
            "/data/project",
        ])
        .unwrap();
        assert_eq!(cli.args.immedb_annotations, "ann.csv");
        assert_eq!(
            cli.args.config().project_folder,
            Location::parse("/data/project")
        );
    }

    #[test]
    fn test_ice_options() {
        let cli = Cli::try_parse_from([
            "immedb-join",
            "--abricate",
            "a.csv",
            "--output",
            "o.csv",
            "--ice-pattern",
            "ice",
            "--ice-pattern",
            "tn916",
            "--ice-match",
            "contains",
            "--ice-ignore-case",
        ])
        .unwrap();
        let ice = cli.args.config().ice;
        assert_eq!(ice.patterns, vec!["ice", "tn916"]);
        assert_eq!(ice.mode, MatchMode::Contains);
        assert!(ice.ignore_case);
    }

    #[test]
    fn test_required_flags() {
        assert!(Cli::try_parse_from(["immedb-join", "--abricate", "a.csv"]).is_err());
        assert!(Cli::try_parse_from(["immedb-join", "--output", "o.csv"]).is_err());
    }
}
