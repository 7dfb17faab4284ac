use thiserror::Error;

/// Errors raised by the maze model, the solver and the session plumbing
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("cell data holds {actual} cells, expected {expected} ({width}x{height})")]
    InvalidShape {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cell index {index} is outside the grid (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no path from cell {start} to cell {end}")]
    UnreachableTarget { start: usize, end: usize },
    #[error("maze dimensions {width}x{height} outside the accepted range {min}..={max}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        min: usize,
        max: usize,
    },
    #[error("unknown wall tag {0:?}")]
    InvalidWallTag(String),
    #[error("malformed maze state: {0}")]
    InvalidState(String),
    #[error("{0:?} is not a known pony")]
    UnknownPony(String),
    #[error("no maze with id {0:?}")]
    UnknownMaze(String),
    #[error("the game is already over")]
    GameOver,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
