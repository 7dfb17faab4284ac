use crate::error::{MazeError, Result};
use serde::{Deserialize, Serialize};

/// A move direction, spelled the way the maze service spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Neighbor expansion order used by the solver. Changing it changes which
    /// of several equally short paths gets returned.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::South,
        Direction::North,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "north" => Some(Direction::North),
            "east" => Some(Direction::East),
            "south" => Some(Direction::South),
            "west" => Some(Direction::West),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Walls recorded by a single cell.
///
/// Only the north and west sides are stored; a cell's south wall is the
/// north wall of the cell below it, and its east wall is the west wall of the
/// cell to its right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Walls {
    pub north: bool,
    pub west: bool,
}

impl Walls {
    pub const OPEN: Walls = Walls { north: false, west: false };

    pub fn new(north: bool, west: bool) -> Self {
        Walls { north, west }
    }

    /// Decode the service's tag list (`["north", "west"]`, `["west"]`, `[]`)
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Result<Self> {
        let mut walls = Walls::OPEN;
        for tag in tags {
            match tag.as_ref() {
                "north" => walls.north = true,
                "west" => walls.west = true,
                other => return Err(MazeError::InvalidWallTag(other.to_string())),
            }
        }
        Ok(walls)
    }

    pub fn to_tags(self) -> Vec<String> {
        let mut tags = Vec::with_capacity(2);
        if self.west {
            tags.push("west".to_string());
        }
        if self.north {
            tags.push("north".to_string());
        }
        tags
    }
}

/// Maze grid: wall data plus the three markers the service reports.
/// Cell `(column, row)` lives at index `row * width + column`.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Walls>,
    pony: usize,
    domokun: usize,
    end_point: usize,
    /// Revision number - incremented on every successful update
    revision: u64,
}

impl Grid {
    /// Build a grid from a flat cell sequence. Markers start at cell 0.
    pub fn new(width: usize, height: usize, cells: Vec<Walls>) -> Result<Self> {
        check_shape(width, height, cells.len())?;
        Ok(Grid {
            width,
            height,
            cells,
            pony: 0,
            domokun: 0,
            end_point: 0,
            revision: 0,
        })
    }

    /// Create a grid with no walls at all
    pub fn open(width: usize, height: usize) -> Result<Self> {
        let len = cell_count(width, height).unwrap_or(0);
        Self::new(width, height, vec![Walls::OPEN; len])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Walls] {
        &self.cells
    }

    /// Current pony position
    pub fn pony(&self) -> usize {
        self.pony
    }

    pub fn domokun(&self) -> usize {
        self.domokun
    }

    pub fn end_point(&self) -> usize {
        self.end_point
    }

    /// Move the markers without touching the wall data
    pub fn place_markers(&mut self, pony: usize, domokun: usize, end_point: usize) -> Result<()> {
        check_markers(self.cells.len(), pony, domokun, end_point)?;
        self.pony = pony;
        self.domokun = domokun;
        self.end_point = end_point;
        self.revision += 1;
        Ok(())
    }

    pub fn is_on_grid(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    /// Convert (column, row) coordinates to a cell index
    pub fn get_id(&self, column: usize, row: usize) -> usize {
        row * self.width + column
    }

    /// Convert a cell index to (column, row) coordinates
    pub fn get_coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    pub fn walls(&self, index: usize) -> Result<Walls> {
        self.check_index(index)?;
        Ok(self.cells[index])
    }

    /// Whether a move from `index` in `direction` is legal.
    ///
    /// Boundary checks come first so that flat-index arithmetic never wraps
    /// into the neighboring row or off either end of the grid.
    pub fn can_move(&self, index: usize, direction: Direction) -> Result<bool> {
        self.check_index(index)?;
        let (column, row) = self.get_coords(index);
        let open = match direction {
            Direction::West => column > 0 && !self.cells[index].west,
            Direction::North => row > 0 && !self.cells[index].north,
            Direction::East => column + 1 < self.width && !self.cells[index + 1].west,
            Direction::South => row + 1 < self.height && !self.cells[index + self.width].north,
        };
        Ok(open)
    }

    /// Target cell of a legal move, `None` if the move is blocked
    pub fn neighbor(&self, index: usize, direction: Direction) -> Result<Option<usize>> {
        if !self.can_move(index, direction)? {
            return Ok(None);
        }
        let target = match direction {
            Direction::West => index - 1,
            Direction::East => index + 1,
            Direction::North => index - self.width,
            Direction::South => index + self.width,
        };
        Ok(Some(target))
    }

    /// Replace wall data and markers in one step.
    ///
    /// Everything is validated before anything is written, so a failed update
    /// leaves the grid exactly as it was.
    pub fn update(
        &mut self,
        cells: Vec<Walls>,
        pony: usize,
        domokun: usize,
        end_point: usize,
    ) -> Result<()> {
        check_shape(self.width, self.height, cells.len())?;
        check_markers(cells.len(), pony, domokun, end_point)?;

        self.cells = cells;
        self.pony = pony;
        self.domokun = domokun;
        self.end_point = end_point;
        self.revision += 1;
        Ok(())
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if self.is_on_grid(index) {
            Ok(())
        } else {
            Err(MazeError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
        }
    }
}

/// Number of cells in a `width` x `height` grid; `None` for an empty or
/// unrepresentable size
fn cell_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height).filter(|&count| count > 0)
}

fn check_shape(width: usize, height: usize, actual: usize) -> Result<()> {
    if cell_count(width, height) != Some(actual) {
        return Err(MazeError::InvalidShape {
            width,
            height,
            expected: width.saturating_mul(height),
            actual,
        });
    }
    Ok(())
}

fn check_markers(len: usize, pony: usize, domokun: usize, end_point: usize) -> Result<()> {
    for index in [pony, domokun, end_point] {
        if index >= len {
            return Err(MazeError::IndexOutOfRange { index, len });
        }
    }
    Ok(())
}
