pub mod action_log;
pub mod config;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod render;
pub mod service;
pub mod session;
pub mod state;

pub use error::{MazeError, Result};
pub use grid::{Direction, Grid, Walls};
pub use pathfinding::{find_path, Path};
pub use session::{GameSession, Outcome};
pub use state::MazeState;
