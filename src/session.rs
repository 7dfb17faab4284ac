use crate::action_log::{Action, ActionLog};
use crate::error::{MazeError, Result};
use crate::grid::{Direction, Grid};
use crate::pathfinding::{find_path, Path};
use crate::service::{MazeParams, MazeService};
use log::{debug, info, warn};
use std::fs;

/// How the current game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    /// Pony reached the end-point
    Won,
    /// Pony ran into the domokun
    Lost,
}

impl Outcome {
    pub fn is_complete(self) -> bool {
        self != Outcome::InProgress
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            Outcome::InProgress => None,
            Outcome::Won => Some("Hurrah, Your pony escaped unharmed!"),
            Outcome::Lost => Some("Your pony got eaten by Dōmo-kun :-("),
        }
    }
}

/// One game against a maze service.
///
/// Owns the only grid for the game; every state refresh goes through it.
pub struct GameSession<S: MazeService> {
    service: S,
    maze_id: String,
    grid: Grid,
    cheating: bool,
    overlay: Path,
    outcome: Outcome,
    log: ActionLog,
}

impl<S: MazeService> GameSession<S> {
    /// Create a maze on the service and load its first state
    pub fn start(mut service: S, params: &MazeParams) -> Result<Self> {
        params.validate()?;

        let mut log = ActionLog::new();
        let create = Action::CreateMaze {
            width: params.width,
            height: params.height,
            player: params.player_name.clone(),
        };
        log.log_start(create.clone());
        let maze_id = service.create_maze(params)?;
        let grid = service
            .fetch_state(&maze_id)?
            .to_grid(Some((params.width, params.height)))?;
        log.log_finish(create);

        let mut session = GameSession {
            service,
            maze_id,
            grid,
            cheating: false,
            overlay: Vec::new(),
            outcome: Outcome::InProgress,
            log,
        };
        session.settle();
        Ok(session)
    }

    pub fn maze_id(&self) -> &str {
        &self.maze_id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn cheating(&self) -> bool {
        self.cheating
    }

    /// Cells to highlight as the way out; empty unless cheating
    pub fn overlay(&self) -> &[usize] {
        &self.overlay
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Fetch the latest state and bring the grid, outcome and overlay up to date
    pub fn refresh(&mut self) -> Result<()> {
        let state = self.service.fetch_state(&self.maze_id)?;
        state.apply_to(&mut self.grid)?;
        self.settle();
        Ok(())
    }

    /// Handle a direction key.
    ///
    /// Returns `Ok(false)` without contacting the service when the game is
    /// over or a wall blocks the move.
    pub fn press(&mut self, direction: Direction) -> Result<bool> {
        if self.outcome.is_complete() {
            return Ok(false);
        }
        if !self.grid.can_move(self.grid.pony(), direction)? {
            debug!("Ignoring {} from cell {}: wall", direction.as_str(), self.grid.pony());
            self.log.log_finish(Action::Move {
                direction,
                accepted: false,
            });
            return Ok(false);
        }

        let action = Action::Move {
            direction,
            accepted: true,
        };
        self.log.log_start(action.clone());
        let sent = self
            .service
            .submit_move(&self.maze_id, direction)
            .and_then(|()| self.refresh());
        match sent {
            Ok(()) => {
                self.log.log_finish(action);
                Ok(true)
            }
            Err(e) => {
                self.log.log_failure(action);
                Err(e)
            }
        }
    }

    /// Switch cheat mode; the overlay is only recomputed on an actual change
    pub fn set_cheating(&mut self, enabled: bool) {
        if enabled == self.cheating {
            return;
        }
        self.cheating = enabled;
        self.log.log_finish(Action::ToggleCheat { enabled });
        self.update_overlay();
    }

    fn settle(&mut self) {
        let (pony, domokun, end_point) = (self.grid.pony(), self.grid.domokun(), self.grid.end_point());
        self.log.log_finish(Action::Refresh {
            pony,
            domokun,
            end_point,
        });

        let outcome = if pony == end_point {
            Outcome::Won
        } else if pony == domokun {
            Outcome::Lost
        } else {
            Outcome::InProgress
        };
        if outcome != self.outcome && outcome.is_complete() {
            info!("Maze {} finished: {:?}", self.maze_id, outcome);
            self.log.log_finish(Action::Completed {
                won: outcome == Outcome::Won,
            });
        }
        self.outcome = outcome;
        self.update_overlay();
    }

    fn update_overlay(&mut self) {
        self.overlay.clear();
        if !self.cheating {
            return;
        }

        let (from, to) = (self.grid.pony(), self.grid.end_point());
        let (path_length, success) = match find_path(&self.grid, from, to) {
            Ok(path) => {
                let domokun = self.grid.domokun();
                self.overlay = path.into_iter().filter(|&cell| cell != domokun).collect();
                (self.overlay.len(), true)
            }
            Err(MazeError::UnreachableTarget { .. }) => {
                warn!("No path from cell {} to the end-point {}", from, to);
                (0, false)
            }
            Err(e) => {
                warn!("Path calculation failed: {}", e);
                (0, false)
            }
        };
        self.log.log_finish(Action::CalculatePath {
            from,
            to,
            path_length,
            success,
        });
    }
}

/// Read the persisted cheat toggle; anything unreadable counts as off
pub fn load_cheat_flag(path: &str) -> bool {
    match fs::read_to_string(path) {
        Ok(contents) => contents.trim() == "true",
        Err(_) => false,
    }
}

pub fn save_cheat_flag(path: &str, enabled: bool) -> Result<()> {
    fs::write(path, if enabled { "true" } else { "false" })?;
    Ok(())
}
