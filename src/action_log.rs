use crate::grid::Direction;
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Action phase - whether the action is starting, finishing or was abandoned
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
    /// Started but never completed, e.g. the service call errored
    Failed,
}

/// Things that happen during a game session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Maze requested from the service
    CreateMaze { width: usize, height: usize, player: String },
    /// Arrow key pressed; `accepted` is false when a wall was in the way
    Move { direction: Direction, accepted: bool },
    /// New state fetched from the service
    Refresh { pony: usize, domokun: usize, end_point: usize },
    /// Cheat mode switched on or off
    ToggleCheat { enabled: bool },
    /// Solver run for the cheat overlay
    CalculatePath { from: usize, to: usize, path_length: usize, success: bool },
    /// Pony reached the end-point (won) or the domokun (lost)
    Completed { won: bool },
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
    pub phase: ActionPhase,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
        });
    }

    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start);
    }

    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish);
    }

    pub fn log_failure(&mut self, action: Action) {
        self.log(action, ActionPhase::Failed);
    }

    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Dump the log through the logger
    pub fn print(&self) {
        info!("=== Action Log ({} events) ===", self.actions.len());
        for (i, logged) in self.actions.iter().enumerate() {
            let phase_str = match logged.phase {
                ActionPhase::Start => "START ",
                ActionPhase::Finish => "FINISH",
                ActionPhase::Failed => "FAILED",
            };
            info!("[{:6}ms] #{:3} {} {:?}", logged.timestamp_ms, i + 1, phase_str, logged.action);
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut moves = 0;
        let mut bumps = 0;
        let mut refreshes = 0;
        let mut solves = 0;
        let mut unsolved = 0;
        let failed = self
            .actions
            .iter()
            .filter(|a| a.phase == ActionPhase::Failed)
            .count();

        // Only finish events count as completed actions
        for logged in self.actions.iter().filter(|a| a.phase == ActionPhase::Finish) {
            match &logged.action {
                Action::Move { accepted: true, .. } => moves += 1,
                Action::Move { accepted: false, .. } => bumps += 1,
                Action::Refresh { .. } => refreshes += 1,
                Action::CalculatePath { success, .. } => {
                    solves += 1;
                    if !success {
                        unsolved += 1;
                    }
                }
                _ => {}
            }
        }

        let outcome = self.actions.iter().rev().find_map(|logged| match logged.action {
            Action::Completed { won: true } => Some("won"),
            Action::Completed { won: false } => Some("lost"),
            _ => None,
        });

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Moves: {} accepted, {} into walls, {} failed\n\
             Refreshes: {}, paths solved: {} ({} unreachable)\n\
             Outcome: {}",
            duration,
            self.actions.len(),
            moves,
            bumps,
            failed,
            refreshes,
            solves,
            unsolved,
            outcome.unwrap_or("in progress")
        )
    }
}
