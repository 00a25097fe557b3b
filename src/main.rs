//! Recolor - Command-line tool for recoloring player sprites with team uniform colors

use std::process::ExitCode;

use recolor::cli;

fn main() -> ExitCode {
    cli::run()
}
