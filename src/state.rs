use crate::error::{MazeError, Result};
use crate::grid::{Grid, Walls};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A cell index as the maze service reports it.
///
/// The live service wraps indices in one-element arrays (`"pony": [42]`),
/// hand-written fixtures use bare integers, and older payloads carried
/// numeric strings. All three decode to the same index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CellRef {
    Index(usize),
    Wrapped(Vec<usize>),
    Text(String),
}

impl CellRef {
    pub fn index(&self) -> Result<usize> {
        match self {
            CellRef::Index(index) => Ok(*index),
            CellRef::Wrapped(values) => match values.as_slice() {
                [index] => Ok(*index),
                _ => Err(MazeError::InvalidState(format!(
                    "expected a single cell index, got {:?}",
                    values
                ))),
            },
            CellRef::Text(text) => text.trim().parse().map_err(|_| {
                MazeError::InvalidState(format!("{:?} is not a cell index", text))
            }),
        }
    }
}

impl From<usize> for CellRef {
    fn from(index: usize) -> Self {
        CellRef::Wrapped(vec![index])
    }
}

/// Progress report the service attaches to a state response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameState {
    pub state: String,
    #[serde(rename = "state-result", default)]
    pub state_result: String,
}

/// State response of the maze service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MazeState {
    pub pony: CellRef,
    pub domokun: CellRef,
    #[serde(rename = "end-point")]
    pub end_point: CellRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[usize; 2]>,
    pub data: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maze_id: Option<String>,
    #[serde(rename = "game-state", default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
}

impl MazeState {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a state response saved to disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Snapshot a grid in the service's response shape
    pub fn from_grid(grid: &Grid) -> Self {
        MazeState {
            pony: grid.pony().into(),
            domokun: grid.domokun().into(),
            end_point: grid.end_point().into(),
            size: Some([grid.width(), grid.height()]),
            data: grid.cells().iter().map(|walls| walls.to_tags()).collect(),
            maze_id: None,
            game_state: None,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Grid dimensions; explicitly supplied dimensions win over `size`
    pub fn dimensions(&self, supplied: Option<(usize, usize)>) -> Result<(usize, usize)> {
        supplied
            .or(self.size.map(|[width, height]| (width, height)))
            .ok_or_else(|| MazeError::InvalidState("maze dimensions are unknown".to_string()))
    }

    pub fn markers(&self) -> Result<(usize, usize, usize)> {
        Ok((
            self.pony.index()?,
            self.domokun.index()?,
            self.end_point.index()?,
        ))
    }

    pub fn walls(&self) -> Result<Vec<Walls>> {
        self.data.iter().map(|tags| Walls::from_tags(tags)).collect()
    }

    /// Validate the response and build a fresh grid from it
    pub fn to_grid(&self, dimensions: Option<(usize, usize)>) -> Result<Grid> {
        let (width, height) = self.dimensions(dimensions)?;
        let mut grid = Grid::new(width, height, self.walls()?)?;
        let (pony, domokun, end_point) = self.markers()?;
        grid.place_markers(pony, domokun, end_point)?;
        Ok(grid)
    }

    /// Refresh an existing grid in place; the grid is untouched on error
    pub fn apply_to(&self, grid: &mut Grid) -> Result<()> {
        if let Some([width, height]) = self.size {
            if (width, height) != (grid.width(), grid.height()) {
                return Err(MazeError::InvalidShape {
                    width: grid.width(),
                    height: grid.height(),
                    expected: grid.len(),
                    actual: width.saturating_mul(height),
                });
            }
        }
        let (pony, domokun, end_point) = self.markers()?;
        grid.update(self.walls()?, pony, domokun, end_point)
    }
}
