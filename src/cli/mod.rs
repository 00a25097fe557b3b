//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod run;
mod teams;
mod validate;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::loader::{load_config, merge_cli_overrides, CliOverrides, ConfigError};
use crate::config::RecolorConfig;
use crate::recolor::SubstitutionPolicy;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Recolor - swap base uniform colors in player sprites for team colors
#[derive(Parser)]
#[command(name = "recolor")]
#[command(about = "Recolor player sprite images with team uniform colors")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Input document locations shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct DocumentArgs {
    /// Config file (default: nearest recolor.toml, if any)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file mapping player names to primary/secondary teams and base images
    #[arg(short = 't', long)]
    pub teams_file: Option<PathBuf>,

    /// JSON file defining the uniform colors of every team, including "Base"
    #[arg(short = 'c', long)]
    pub colors_file: Option<PathBuf>,

    /// Directory containing the base-colored player images
    #[arg(short = 'i', long)]
    pub base_images_dir: Option<PathBuf>,

    /// Strict mode: reject palette channels outside 0-255 instead of clamping
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recolor player images with their teams' uniform colors
    Run {
        #[command(flatten)]
        documents: DocumentArgs,

        /// Directory to write recolored images to
        #[arg(short, long = "output-images-dir", visible_alias = "output-dir")]
        output: Option<PathBuf>,

        /// Recolor only these players (default: every player in the teams file)
        #[arg(short, long, num_args = 1..)]
        names: Option<Vec<String>>,

        /// How substitutions within one pass interact
        #[arg(long, value_enum)]
        policy: Option<SubstitutionPolicy>,

        /// Output image extension, which selects the encoder (default: png)
        #[arg(long)]
        format: Option<String>,

        /// Number of players to recolor in parallel
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Stop starting new players after the first failure
        #[arg(long)]
        fail_fast: bool,

        /// Report progress as JSON lines
        #[arg(long)]
        json: bool,

        /// Log more detail for each player
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check palette and player documents without writing images
    Validate {
        #[command(flatten)]
        documents: DocumentArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the teams and uniform colors in a palette document
    Teams {
        #[command(flatten)]
        documents: DocumentArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Load configuration and apply document overrides.
///
/// Prints the error and returns the exit code on failure.
pub(crate) fn resolve_config(
    documents: &DocumentArgs,
    mut overrides: CliOverrides,
) -> Result<RecolorConfig, ExitCode> {
    let mut config = match load_config(documents.config.as_deref()) {
        Ok(config) => config,
        Err(e @ ConfigError::Validation(_)) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    overrides.teams = documents.teams_file.clone();
    overrides.colors = documents.colors_file.clone();
    overrides.images = documents.base_images_dir.clone();
    if documents.strict {
        overrides.strict = Some(true);
    }
    merge_cli_overrides(&mut config, &overrides);
    Ok(config)
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            documents,
            output,
            names,
            policy,
            format,
            jobs,
            fail_fast,
            json,
            verbose,
        } => {
            let overrides = CliOverrides {
                out: output,
                policy,
                extension: format,
                jobs,
                fail_fast: fail_fast.then_some(true),
                ..Default::default()
            };
            run::run_recolor(&documents, overrides, names.as_deref(), json, verbose)
        }
        Commands::Validate { documents, json } => validate::run_validate(&documents, json),
        Commands::Teams { documents, json } => teams::run_teams(&documents, json),
    }
}
