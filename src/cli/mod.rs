//! Command-line interface for immedb-join.
//!
//! A single command annotates every Abricate resistance-gene hit with the
//! ImmeDB mobile element that contains it.
//!
//! ## Usage
//!
//! ```text
//! # Local project folder, default annotation table
//! immedb-join --abricate abricate_output.csv --output abricate_immedb_output.csv \
//!     --project_folder /data/Blast/MITI-MCB
//!
//! # Everything on S3, result to stdout
//! immedb-join --abricate s3://bucket/abricate.csv --output -
//!
//! # Treat Tn916-like names as ICE as well
//! immedb-join --abricate in.csv --output out.csv --ice-pattern ICE --ice-pattern Tn916
//! ```

use clap::Parser;

pub mod integrate;

#[derive(Parser)]
#[command(name = "immedb-join")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Integrate Abricate and ImmeDB results")]
#[command(
    long_about = "immedb-join places antibiotic-resistance genes on mobile genetic elements.\n\nFor each Abricate hit it reads the strain's ImmeDB BLAST results, keeps the alignments that fully span the gene on the same contig, and appends the best one (ICE elements first, then file order) together with its ImmeDB name and a count of all containing element names."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: integrate::IntegrateArgs,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
