//! Teams command implementation

use std::fmt::Write as _;
use std::process::ExitCode;

use serde_json::{Map, Value};

use crate::catalog::PaletteCatalog;
use crate::config::loader::CliOverrides;
use crate::models::{GarmentGroup, Team};
use crate::palette_parser::ParseMode;

use super::{resolve_config, DocumentArgs, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the teams command
pub fn run_teams(documents: &DocumentArgs, json: bool) -> ExitCode {
    let config = match resolve_config(documents, CliOverrides::default()) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let mode = ParseMode::from_strict(config.recolor.strict);
    let parsed = match PaletteCatalog::load(&config.paths.colors, mode) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}: {}", config.paths.colors.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    for warning in &parsed.warnings {
        eprintln!("Warning: {}", warning);
    }

    if json {
        match serde_json::to_string_pretty(&teams_json(&parsed.catalog)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: Failed to serialize teams: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", format_teams(&parsed.catalog));
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Catalog keyed by team, sorted by key.
fn teams_json(catalog: &PaletteCatalog) -> Value {
    let mut teams = Map::new();
    for key in catalog.names() {
        if let Ok(team) = catalog.get(key) {
            teams.insert(key.to_string(), serde_json::to_value(team).unwrap_or(Value::Null));
        }
    }
    Value::Object(teams)
}

/// Human-readable listing, one block per team.
fn format_teams(catalog: &PaletteCatalog) -> String {
    let mut out = String::new();
    for key in catalog.names() {
        let Ok(team) = catalog.get(key) else { continue };
        if team.name == key {
            let _ = writeln!(out, "{}", key);
        } else {
            let _ = writeln!(out, "{} ({})", key, team.name);
        }
        format_uniform(&mut out, team);
    }
    out
}

fn format_uniform(out: &mut String, team: &Team) {
    for group in GarmentGroup::ALL {
        let slots: Vec<String> = team
            .uniform
            .garment(group)
            .slots()
            .iter()
            .map(|slot| match slot.color {
                Some(color) => format!("{} {}", slot.label, color),
                None => format!("{} -", slot.label),
            })
            .collect();
        let _ = writeln!(out, "  {}: {}", group, slots.join(", "));
    }
}
