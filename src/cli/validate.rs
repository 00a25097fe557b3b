//! Validate command implementation
//!
//! Checks the palette and player documents the way a run would consume them,
//! without decoding or writing any image.

use serde::Serialize;
use std::collections::BTreeSet;
use std::process::ExitCode;

use crate::catalog::PaletteCatalog;
use crate::config::loader::CliOverrides;
use crate::config::RecolorConfig;
use crate::models::{GarmentGroup, BASE_TEAM_NAME};
use crate::output::{generate_output_path, source_image_path};
use crate::palette_parser::ParseMode;
use crate::recolor::{chained_conflicts, substitution_pairs, SubstitutionPolicy};
use crate::roster::Roster;

use super::{resolve_config, DocumentArgs, EXIT_ERROR, EXIT_SUCCESS};

/// Findings from validating one set of documents.
#[derive(Debug, Default, Serialize)]
pub(crate) struct ValidationReport {
    pub valid: bool,
    pub teams: usize,
    pub players: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Policy differences that do not affect the configured policy
    pub notes: Vec<String>,
}

/// Execute the validate command
pub fn run_validate(documents: &DocumentArgs, json: bool) -> ExitCode {
    let config = match resolve_config(documents, CliOverrides::default()) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let report = validate_documents(&config);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: Failed to serialize report: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for error in &report.errors {
            eprintln!("Error: {}", error);
        }
        for warning in &report.warnings {
            eprintln!("Warning: {}", warning);
        }
        for note in &report.notes {
            eprintln!("Note: {}", note);
        }
        if report.valid {
            println!(
                "Validated {} team{} and {} player{}: no errors",
                report.teams,
                if report.teams == 1 { "" } else { "s" },
                report.players,
                if report.players == 1 { "" } else { "s" }
            );
        }
    }

    if report.valid {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Validate the documents named by `config`.
///
/// In strict mode warnings also make the report invalid. Chained hazards are
/// warnings only under the chained policy and notes otherwise.
pub(crate) fn validate_documents(config: &RecolorConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mode = ParseMode::from_strict(config.recolor.strict);

    let catalog = match PaletteCatalog::load(&config.paths.colors, mode) {
        Ok(parsed) => {
            report.warnings.extend(parsed.warnings.iter().map(|w| w.to_string()));
            Some(parsed.catalog)
        }
        Err(e) => {
            report.errors.push(format!("{}: {}", config.paths.colors.display(), e));
            None
        }
    };

    if let Some(ref catalog) = catalog {
        report.teams = catalog.len();
        if let Err(e) = catalog.base() {
            report.errors.push(e.to_string());
        }
    }

    match Roster::load(&config.paths.teams) {
        Ok(roster) => {
            report.players = roster.len();
            if let Some(ref catalog) = catalog {
                check_roster(&roster, catalog, config, &mut report);
            }
        }
        Err(e) => report.errors.push(format!("{}: {}", config.paths.teams.display(), e)),
    }

    report.valid =
        report.errors.is_empty() && !(config.recolor.strict && !report.warnings.is_empty());
    report
}

fn check_roster(
    roster: &Roster,
    catalog: &PaletteCatalog,
    config: &RecolorConfig,
    report: &mut ValidationReport,
) {
    let mut hazard_checked = BTreeSet::new();

    for (player, assignment) in roster.iter() {
        for team in [&assignment.primary, &assignment.secondary] {
            if !catalog.contains(team) {
                report.errors.push(format!("{}: team '{}' not found in palette", player, team));
            }
        }

        if let Err(e) = generate_output_path(&config.paths.out, player, &config.recolor.extension) {
            report.errors.push(e.to_string());
        }

        let image = source_image_path(&config.paths.images, &assignment.image_filename);
        if !image.is_file() {
            report.errors.push(format!("{}: base image {} not found", player, image.display()));
        }

        let passes = [
            (&assignment.primary, &GarmentGroup::PRIMARY[..]),
            (&assignment.secondary, &GarmentGroup::SECONDARY[..]),
        ];
        for (team, groups) in passes {
            if !hazard_checked.insert((team.clone(), groups[0])) {
                continue;
            }
            let hazards = chained_hazards(catalog, team, groups);
            match config.recolor.policy {
                SubstitutionPolicy::Chained => report.warnings.extend(hazards),
                SubstitutionPolicy::Snapshot => report.notes.extend(hazards),
            }
        }
    }
}

/// Describe pairs whose output differs between the snapshot and chained policies.
fn chained_hazards(catalog: &PaletteCatalog, team: &str, groups: &[GarmentGroup]) -> Vec<String> {
    let (Ok(base), Ok(target)) = (catalog.get(BASE_TEAM_NAME), catalog.get(team)) else {
        return Vec::new();
    };
    let pairs = substitution_pairs(&base.uniform, &target.uniform, groups);
    chained_conflicts(&pairs)
        .into_iter()
        .map(|conflict| {
            let earlier = &pairs[conflict.earlier];
            let later = &pairs[conflict.later];
            format!(
                "{}: {} pixels become {} via {}.{}, but {}.{} recolors them again with --policy chained",
                team,
                earlier.old,
                earlier.new,
                earlier.group,
                earlier.label,
                later.group,
                later.label
            )
        })
        .collect()
}
