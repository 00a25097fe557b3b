//! Recolor result types.
//!
//! Contains types for representing the outcome of a recolor run.

use std::path::PathBuf;
use std::time::Duration;

/// Status of a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Image recolored and written
    Success,
    /// Not attempted (an earlier player failed in fail-fast mode)
    Skipped,
    /// Recolor failed with error
    Failed(String),
}

impl PlayerStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, PlayerStatus::Success)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PlayerStatus::Failed(_))
    }

    /// Short machine-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerStatus::Success => "success",
            PlayerStatus::Skipped => "skipped",
            PlayerStatus::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerStatus::Failed(err) => write!(f, "failed: {}", err),
            other => f.write_str(other.label()),
        }
    }
}

/// Result of recoloring a single player.
#[derive(Debug, Clone)]
pub struct PlayerResult {
    pub player: String,
    pub status: PlayerStatus,
    /// Written image, on success
    pub output: Option<PathBuf>,
    pub duration: Duration,
}

impl PlayerResult {
    pub fn success(player: String, output: PathBuf, duration: Duration) -> Self {
        Self { player, status: PlayerStatus::Success, output: Some(output), duration }
    }

    pub fn skipped(player: String) -> Self {
        Self { player, status: PlayerStatus::Skipped, output: None, duration: Duration::ZERO }
    }

    pub fn failed(player: String, error: String, duration: Duration) -> Self {
        Self { player, status: PlayerStatus::Failed(error), output: None, duration }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Result of a complete recolor run.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Results for each selected player, in selection order
    pub players: Vec<PlayerResult>,
    pub total_duration: Duration,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: PlayerResult) {
        self.players.push(result);
    }

    pub fn success_count(&self) -> usize {
        self.players.iter().filter(|r| r.status.is_success()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.players.iter().filter(|r| matches!(r.status, PlayerStatus::Skipped)).count()
    }

    pub fn failed_count(&self) -> usize {
        self.players.iter().filter(|r| r.status.is_failure()).count()
    }

    /// Check if the run succeeded (no failures, nothing skipped).
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0 && self.skipped_count() == 0
    }

    /// All images written.
    pub fn all_outputs(&self) -> Vec<&PathBuf> {
        self.players.iter().filter_map(|r| r.output.as_ref()).collect()
    }

    pub fn failures(&self) -> Vec<&PlayerResult> {
        self.players.iter().filter(|r| r.status.is_failure()).collect()
    }

    /// Format a summary of the run.
    pub fn summary(&self) -> String {
        let success = self.success_count();
        let skipped = self.skipped_count();
        let failed = self.failed_count();
        let total = self.players.len();

        if failed == 0 {
            return format!(
                "Recolor succeeded: {} recolored, {} skipped ({} total) in {:?}",
                success, skipped, total, self.total_duration
            );
        }

        let mut lines = vec![format!(
            "Recolor failed: {} succeeded, {} skipped, {} failed ({} total)",
            success, skipped, failed, total
        )];
        for player in self.failures() {
            lines.push(format!("  - {}: {}", player.player, player.status));
        }
        lines.join("\n")
    }
}
