use crate::error::{MazeError, Result};
use crate::grid::Direction;
use crate::state::{GameState, MazeState};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub const MIN_SIDE: usize = 15;
pub const MAX_SIDE: usize = 25;

/// Player names the maze service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pony {
    TwilightSparkle,
    Spike,
    RainbowDash,
    PinkiePie,
    Applejack,
    Rarity,
    Fluttershy,
}

impl Pony {
    pub const ALL: [Pony; 7] = [
        Pony::TwilightSparkle,
        Pony::Spike,
        Pony::RainbowDash,
        Pony::PinkiePie,
        Pony::Applejack,
        Pony::Rarity,
        Pony::Fluttershy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Pony::TwilightSparkle => "Twilight Sparkle",
            Pony::Spike => "Spike",
            Pony::RainbowDash => "Rainbow Dash",
            Pony::PinkiePie => "Pinkie Pie",
            Pony::Applejack => "Applejack",
            Pony::Rarity => "Rarity",
            Pony::Fluttershy => "Fluttershy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Pony::ALL.into_iter().find(|pony| pony.as_str() == name)
    }
}

/// Body of a maze creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeParams {
    #[serde(rename = "maze-width")]
    pub width: usize,
    #[serde(rename = "maze-height")]
    pub height: usize,
    #[serde(rename = "maze-player-name")]
    pub player_name: String,
    pub difficulty: u8,
}

impl MazeParams {
    pub fn new(width: usize, height: usize, pony: Pony) -> Self {
        MazeParams {
            width,
            height,
            player_name: pony.as_str().to_string(),
            difficulty: 0,
        }
    }

    /// Reject requests the service would refuse
    pub fn validate(&self) -> Result<()> {
        let side = MIN_SIDE..=MAX_SIDE;
        if !side.contains(&self.width) || !side.contains(&self.height) {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
                min: MIN_SIDE,
                max: MAX_SIDE,
            });
        }
        if Pony::from_name(&self.player_name).is_none() {
            return Err(MazeError::UnknownPony(self.player_name.clone()));
        }
        Ok(())
    }
}

/// The remote maze game as seen by a client
pub trait MazeService {
    /// Create a maze and return its id
    fn create_maze(&mut self, params: &MazeParams) -> Result<String>;

    fn fetch_state(&mut self, maze_id: &str) -> Result<MazeState>;

    fn submit_move(&mut self, maze_id: &str, direction: Direction) -> Result<()>;
}

/// In-process stand-in for the maze service.
///
/// Serves a single maze seeded from a saved state response. Only the pony
/// moves; the domokun stays where the template put it.
pub struct LocalService {
    template: MazeState,
    current: Option<(String, MazeState)>,
    created: usize,
}

impl LocalService {
    pub fn new(template: MazeState) -> Self {
        LocalService {
            template,
            current: None,
            created: 0,
        }
    }

    fn maze_mut(&mut self, maze_id: &str) -> Result<&mut MazeState> {
        match &mut self.current {
            Some((id, state)) if id.as_str() == maze_id => Ok(state),
            _ => Err(MazeError::UnknownMaze(maze_id.to_string())),
        }
    }
}

impl MazeService for LocalService {
    fn create_maze(&mut self, params: &MazeParams) -> Result<String> {
        params.validate()?;
        let dimensions = (params.width, params.height);
        // Template must decode at the requested size
        self.template.to_grid(Some(dimensions))?;

        self.created += 1;
        let maze_id = format!("local-{}", self.created);
        let mut state = self.template.clone();
        state.size = Some([params.width, params.height]);
        state.maze_id = Some(maze_id.clone());
        state.game_state = Some(GameState {
            state: "Active".to_string(),
            state_result: "Successfully created".to_string(),
        });

        info!(
            "Created maze {} ({}x{}) for {}",
            maze_id, params.width, params.height, params.player_name
        );
        self.current = Some((maze_id.clone(), state));
        Ok(maze_id)
    }

    fn fetch_state(&mut self, maze_id: &str) -> Result<MazeState> {
        Ok(self.maze_mut(maze_id)?.clone())
    }

    fn submit_move(&mut self, maze_id: &str, direction: Direction) -> Result<()> {
        let state = self.maze_mut(maze_id)?;
        let grid = state.to_grid(None)?;
        if grid.pony() == grid.end_point() || grid.pony() == grid.domokun() {
            return Err(MazeError::GameOver);
        }

        let Some(target) = grid.neighbor(grid.pony(), direction)? else {
            warn!("Move {} from cell {} runs into a wall", direction.as_str(), grid.pony());
            state.game_state = Some(GameState {
                state: "Active".to_string(),
                state_result: "Can't walk in there".to_string(),
            });
            return Ok(());
        };
        debug!("Pony moved {} to cell {}", direction.as_str(), target);

        let (state_name, result) = if target == grid.end_point() {
            ("won", "You won. Game ended")
        } else if target == grid.domokun() {
            ("over", "You lost. Killed by monster")
        } else {
            ("Active", "Move accepted")
        };
        state.pony = target.into();
        state.game_state = Some(GameState {
            state: state_name.to_string(),
            state_result: result.to_string(),
        });
        Ok(())
    }
}
