// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Uses the `clap` crate
// to parse command line arguments; all business logic is
// delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `index`       — scan and partition the image tree
//   2. `warm`        — fill the bottleneck cache
//   3. `fetch-model` — download the pretrained model bundle
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, FetchArgs, IndexArgs, WarmArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "bottleneck-cache",
    version = "0.1.0",
    about = "Partition a labelled image tree and cache frozen-model bottleneck features."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Index(args)      => Self::run_index(args),
            Commands::Warm(args)       => Self::run_warm(args),
            Commands::FetchModel(args) => Self::run_fetch(args),
        }
    }

    /// Handles the `index` subcommand.
    fn run_index(args: IndexArgs) -> Result<()> {
        use crate::application::index_use_case::IndexUseCase;

        let use_case = IndexUseCase::new(args.into());
        let index = use_case.execute()?;

        println!("Indexed {} labels. Manifest and summary written.", index.len());
        Ok(())
    }

    /// Handles the `warm` subcommand.
    fn run_warm(args: WarmArgs) -> Result<()> {
        use crate::application::warm_use_case::WarmUseCase;

        tracing::info!("Warming bottleneck cache from '{}'", args.image_dir.display());

        let use_case = WarmUseCase::new(args.into());
        let visited = use_case.execute()?;

        println!("Cache warm complete: {visited} bottleneck files ready.");
        Ok(())
    }

    /// Handles the `fetch-model` subcommand.
    fn run_fetch(args: FetchArgs) -> Result<()> {
        use crate::application::fetch_use_case::FetchUseCase;

        let use_case = FetchUseCase::new(args.into());
        let graph = use_case.execute()?;

        println!("Model graph ready at '{}'.", graph.display());
        Ok(())
    }
}
