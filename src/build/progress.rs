//! Recolor progress reporting.
//!
//! Progress goes to stderr, either as human-readable console lines (with
//! colors when stderr is a terminal) or as one JSON object per line.
//!
//! # Example
//!
//! ```ignore
//! use recolor::build::{ConsoleProgress, PlayerStatus, ProgressEvent, ProgressReporter};
//!
//! let reporter = ConsoleProgress::new();
//! reporter.report(ProgressEvent::RunStarted { total_players: 2 });
//! reporter.report(ProgressEvent::PlayerCompleted {
//!     player: "Pablo Sanchez".to_string(),
//!     status: PlayerStatus::Success,
//!     duration_ms: 12,
//! });
//! ```

use serde_json::json;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::result::PlayerStatus;

/// Events that can be reported during a recolor run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started
    RunStarted {
        /// Number of players selected
        total_players: usize,
    },
    /// Recoloring of one player started
    PlayerStarted { player: String },
    /// Extra detail about a player, shown in verbose mode only
    Detail { player: String, message: String },
    /// Recoloring of one player finished
    PlayerCompleted {
        player: String,
        status: PlayerStatus,
        /// Duration in milliseconds
        duration_ms: u64,
    },
    /// Run finished
    RunCompleted {
        /// Whether every player succeeded
        success: bool,
        /// Total duration in milliseconds
        duration_ms: u64,
        succeeded: usize,
        skipped: usize,
        failed: usize,
    },
    /// A warning not tied to a single player (e.g. palette clamping)
    Warning { message: String },
    /// An error not tied to a single player
    Error { message: String },
}

/// Trait for progress reporters.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);

    /// Check if this reporter wants verbose output.
    fn is_verbose(&self) -> bool {
        false
    }
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Console progress reporter with optional colors.
pub struct ConsoleProgress {
    use_colors: bool,
    verbose: bool,
    current: AtomicUsize,
    total: AtomicUsize,
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("use_colors", &self.use_colors)
            .field("verbose", &self.verbose)
            .field("current", &self.current)
            .field("total", &self.total)
            .finish()
    }
}

impl ConsoleProgress {
    /// Create a console reporter writing to stderr.
    ///
    /// Colors are enabled when stderr is a terminal.
    pub fn new() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr),
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Create a console progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            use_colors: false,
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(output)),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.color(text, "\x1b[32m")
    }

    fn yellow(&self, text: &str) -> String {
        self.color(text, "\x1b[33m")
    }

    fn red(&self, text: &str) -> String {
        self.color(text, "\x1b[31m")
    }

    fn cyan(&self, text: &str) -> String {
        self.color(text, "\x1b[36m")
    }

    fn writeln(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::RunStarted { total_players } => {
                self.total.store(total_players, Ordering::SeqCst);
                self.current.store(0, Ordering::SeqCst);
                self.writeln(&format!(
                    "{} Recoloring {} player image{}",
                    self.cyan("[recolor]"),
                    total_players,
                    if total_players == 1 { "" } else { "s" }
                ));
            }
            ProgressEvent::PlayerStarted { player } => {
                if self.verbose {
                    self.writeln(&format!(
                        "{} Recoloring player image: {}",
                        self.cyan("[recolor]"),
                        player
                    ));
                }
            }
            ProgressEvent::Detail { player, message } => {
                if self.verbose {
                    self.writeln(&format!("{} {}: {}", self.cyan("[debug]"), player, message));
                }
            }
            ProgressEvent::PlayerCompleted { player, status, duration_ms } => {
                let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
                let total = self.total.load(Ordering::SeqCst);

                let status_str = match &status {
                    PlayerStatus::Success => self.green("ok"),
                    PlayerStatus::Skipped => self.yellow("skipped"),
                    PlayerStatus::Failed(_) => self.red("FAILED"),
                };

                self.writeln(&format!(
                    "{} [{}/{}] {} {} ({})",
                    self.cyan("[recolor]"),
                    current,
                    total,
                    status_str,
                    player,
                    format_duration(duration_ms)
                ));

                if let PlayerStatus::Failed(err) = status {
                    self.writeln(&format!("        {}", self.red(&err)));
                }
            }
            ProgressEvent::RunCompleted { success, duration_ms, succeeded, skipped, failed } => {
                let duration_str = format_duration(duration_ms);
                if success {
                    self.writeln(&format!(
                        "{} {} recolored, {} skipped in {}",
                        self.green("[done]"),
                        succeeded,
                        skipped,
                        duration_str
                    ));
                } else {
                    self.writeln(&format!(
                        "{} Recolor failed: {} succeeded, {} skipped, {} {} in {}",
                        self.red("[error]"),
                        succeeded,
                        skipped,
                        failed,
                        if failed == 1 { "failure" } else { "failures" },
                        duration_str
                    ));
                }
            }
            ProgressEvent::Warning { message } => {
                self.writeln(&format!("{} {}", self.yellow("[warn]"), message));
            }
            ProgressEvent::Error { message } => {
                self.writeln(&format!("{} {}", self.red("[error]"), message));
            }
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// JSON-lines progress reporter for machine-readable output.
pub struct JsonProgress {
    verbose: bool,
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for JsonProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonProgress").field("verbose", &self.verbose).finish()
    }
}

impl JsonProgress {
    /// Create a new JSON progress reporter writing to stderr.
    pub fn new() -> Self {
        Self { verbose: false, output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a JSON progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { verbose: false, output: Mutex::new(Box::new(output)) }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", value);
        }
    }
}

impl Default for JsonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let value = match event {
            ProgressEvent::RunStarted { total_players } => {
                json!({"event": "run_started", "total_players": total_players})
            }
            ProgressEvent::PlayerStarted { player } => {
                json!({"event": "player_started", "player": player})
            }
            ProgressEvent::Detail { player, message } => {
                if !self.verbose {
                    return;
                }
                json!({"event": "detail", "player": player, "message": message})
            }
            ProgressEvent::PlayerCompleted { player, status, duration_ms } => {
                let mut value = json!({
                    "event": "player_completed",
                    "player": player,
                    "status": status.label(),
                    "duration_ms": duration_ms,
                });
                if let PlayerStatus::Failed(error) = status {
                    value["error"] = json!(error);
                }
                value
            }
            ProgressEvent::RunCompleted { success, duration_ms, succeeded, skipped, failed } => {
                json!({
                    "event": "run_completed",
                    "success": success,
                    "duration_ms": duration_ms,
                    "succeeded": succeeded,
                    "skipped": skipped,
                    "failed": failed,
                })
            }
            ProgressEvent::Warning { message } => json!({"event": "warning", "message": message}),
            ProgressEvent::Error { message } => json!({"event": "error", "message": message}),
        };
        self.write_json(value);
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Format a duration in milliseconds to a human-readable string.
fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1000;
        format!("{}m {}s", minutes, seconds)
    }
}
