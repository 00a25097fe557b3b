//! Run command implementation

use std::process::ExitCode;

use crate::build::{ConsoleProgress, JsonProgress, ProgressEvent, ProgressReporter, RecolorRun};
use crate::catalog::PaletteCatalog;
use crate::config::loader::CliOverrides;
use crate::palette_parser::ParseMode;
use crate::roster::Roster;

use super::{resolve_config, DocumentArgs, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the run command
pub fn run_recolor(
    documents: &DocumentArgs,
    overrides: CliOverrides,
    names: Option<&[String]>,
    json: bool,
    verbose: bool,
) -> ExitCode {
    let config = match resolve_config(documents, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let reporter: Box<dyn ProgressReporter> = if json {
        Box::new(JsonProgress::new().with_verbose(verbose))
    } else {
        Box::new(ConsoleProgress::new().with_verbose(verbose))
    };

    let mode = ParseMode::from_strict(config.recolor.strict);
    let parsed = match PaletteCatalog::load(&config.paths.colors, mode) {
        Ok(parsed) => parsed,
        Err(e) => {
            reporter.report(ProgressEvent::Error {
                message: format!("{}: {}", config.paths.colors.display(), e),
            });
            return ExitCode::from(EXIT_ERROR);
        }
    };
    for warning in &parsed.warnings {
        reporter.report(ProgressEvent::Warning { message: warning.to_string() });
    }

    let roster = match Roster::load(&config.paths.teams) {
        Ok(roster) => roster,
        Err(e) => {
            reporter.report(ProgressEvent::Error {
                message: format!("{}: {}", config.paths.teams.display(), e),
            });
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let selection = roster.select(names);
    let run = RecolorRun::from_config(&parsed.catalog, &config);
    let result = match run.run(&selection, reporter.as_ref()) {
        Ok(result) => result,
        Err(e) => {
            reporter.report(ProgressEvent::Error { message: e.to_string() });
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if result.failed_count() > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
