//! Recolor orchestration
//!
//! Runs the two-pass recolor for a selection of players: decode each source
//! image, swap the base uniform for the player's primary and secondary team
//! colors, and write `<out>/<player>.<ext>`.
//!
//! Players are independent, so they are recolored in parallel on a rayon
//! pool. The palette catalog is shared by reference.
//!
//! # Example
//!
//! ```ignore
//! use recolor::build::{ConsoleProgress, RecolorRun};
//!
//! let run = RecolorRun::new(&catalog, images_dir, out_dir).with_jobs(4);
//! let result = run.run(&roster.select(None), &ConsoleProgress::new())?;
//! println!("{}", result.summary());
//! ```

pub mod progress;
pub mod result;

pub use progress::*;
pub use result::*;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use thiserror::Error;

use crate::catalog::{PaletteCatalog, PaletteError};
use crate::config::RecolorConfig;
use crate::models::PlayerAssignment;
use crate::output::{generate_output_path, load_rgba, save_image, source_image_path, OutputError};
use crate::recolor::{recolor_player, RecolorError, SubstitutionPolicy};
use crate::roster::RosterError;

/// Error during a recolor run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("{0}")]
    Palette(#[from] PaletteError),
    #[error("{0}")]
    Roster(#[from] RosterError),
    #[error("{0}")]
    Recolor(#[from] RecolorError),
    #[error("{0}")]
    Output(#[from] OutputError),
    /// Worker pool could not be created
    #[error("Failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// A player selected for recoloring, or the reason it could not be selected.
pub type PlayerSelection<'a> = Result<(&'a str, &'a PlayerAssignment), RosterError>;

/// Default number of parallel jobs (uses available parallelism).
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Settings and shared state for recoloring a batch of players.
#[derive(Debug, Clone)]
pub struct RecolorRun<'a> {
    catalog: &'a PaletteCatalog,
    images_dir: PathBuf,
    out_dir: PathBuf,
    extension: String,
    policy: SubstitutionPolicy,
    jobs: usize,
    fail_fast: bool,
}

impl<'a> RecolorRun<'a> {
    pub fn new(catalog: &'a PaletteCatalog, images_dir: PathBuf, out_dir: PathBuf) -> Self {
        Self {
            catalog,
            images_dir,
            out_dir,
            extension: crate::output::DEFAULT_EXTENSION.to_string(),
            policy: SubstitutionPolicy::default(),
            jobs: default_jobs(),
            fail_fast: false,
        }
    }

    /// Create a run from resolved configuration.
    pub fn from_config(catalog: &'a PaletteCatalog, config: &RecolorConfig) -> Self {
        let run = Self::new(catalog, config.paths.images.clone(), config.paths.out.clone())
            .with_extension(&config.recolor.extension)
            .with_policy(config.recolor.policy)
            .with_fail_fast(config.recolor.fail_fast);
        match config.recolor.jobs {
            Some(jobs) => run.with_jobs(jobs),
            None => run,
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_policy(mut self, policy: SubstitutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the number of parallel jobs.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Set fail-fast mode (skip players not yet started after a failure).
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Recolor a single player and write the result.
    ///
    /// Returns the path written. Nothing is written unless the whole raster
    /// was recolored successfully.
    pub fn recolor_one(
        &self,
        player: &str,
        assignment: &PlayerAssignment,
        reporter: &dyn ProgressReporter,
    ) -> Result<PathBuf, BuildError> {
        let output_path = generate_output_path(&self.out_dir, player, &self.extension)?;
        let source_path = source_image_path(&self.images_dir, &assignment.image_filename);
        let source = load_rgba(&source_path)?;

        if reporter.is_verbose() {
            reporter.report(ProgressEvent::Detail {
                player: player.to_string(),
                message: format!(
                    "Replacing base colors with primary colors: {} and secondary colors: {}",
                    assignment.primary, assignment.secondary
                ),
            });
        }
        let recolored = recolor_player(&source, self.catalog, assignment, self.policy)?;

        if reporter.is_verbose() {
            reporter.report(ProgressEvent::Detail {
                player: player.to_string(),
                message: format!("Saving recolored image to file {}", output_path.display()),
            });
        }
        save_image(&recolored, &output_path)?;
        Ok(output_path)
    }

    /// Recolor every selected player.
    ///
    /// Per-player failures (including unknown players in the selection) are
    /// recorded in the result; only setup failures return `Err`.
    pub fn run(
        &self,
        selection: &[PlayerSelection<'_>],
        reporter: &dyn ProgressReporter,
    ) -> Result<RunResult, BuildError> {
        let start = Instant::now();

        // The base team is a precondition for every player
        self.catalog.base()?;
        std::fs::create_dir_all(&self.out_dir).map_err(OutputError::from)?;

        reporter.report(ProgressEvent::RunStarted { total_players: selection.len() });

        let pool = rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build()?;
        let failed = AtomicBool::new(false);
        let players: Vec<PlayerResult> = pool.install(|| {
            selection
                .par_iter()
                .map(|selected| self.run_selected(selected, &failed, reporter))
                .collect()
        });

        let mut result = RunResult::new();
        for player in players {
            result.add_result(player);
        }
        result.total_duration = start.elapsed();

        reporter.report(ProgressEvent::RunCompleted {
            success: result.is_success(),
            duration_ms: result.total_duration.as_millis() as u64,
            succeeded: result.success_count(),
            skipped: result.skipped_count(),
            failed: result.failed_count(),
        });

        Ok(result)
    }

    fn run_selected(
        &self,
        selected: &PlayerSelection<'_>,
        failed: &AtomicBool,
        reporter: &dyn ProgressReporter,
    ) -> PlayerResult {
        let start = Instant::now();
        let (player, assignment) = match selected {
            Ok(selected) => *selected,
            Err(e) => {
                let player = match e {
                    RosterError::UnknownPlayer(name) => name.clone(),
                    _ => "<unknown>".to_string(),
                };
                failed.store(true, Ordering::SeqCst);
                let result = PlayerResult::failed(player, e.to_string(), start.elapsed());
                self.report_completed(&result, reporter);
                return result;
            }
        };

        if self.fail_fast && failed.load(Ordering::SeqCst) {
            let result = PlayerResult::skipped(player.to_string());
            self.report_completed(&result, reporter);
            return result;
        }

        reporter.report(ProgressEvent::PlayerStarted { player: player.to_string() });
        let result = match self.recolor_one(player, assignment, reporter) {
            Ok(output) => PlayerResult::success(player.to_string(), output, start.elapsed()),
            Err(e) => {
                failed.store(true, Ordering::SeqCst);
                PlayerResult::failed(player.to_string(), e.to_string(), start.elapsed())
            }
        };
        self.report_completed(&result, reporter);
        result
    }

    fn report_completed(&self, result: &PlayerResult, reporter: &dyn ProgressReporter) {
        reporter.report(ProgressEvent::PlayerCompleted {
            player: result.player.clone(),
            status: result.status.clone(),
            duration_ms: result.duration.as_millis() as u64,
        });
    }
}
