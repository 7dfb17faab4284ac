#![allow(dead_code)]

use ponymaze::{Grid, MazeState, Walls};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// JSON fixture: a service state response and the path the solver must find
#[derive(Debug, Deserialize)]
pub struct PathTestData {
    #[serde(rename = "testName")]
    pub test_name: String,
    pub state: MazeState,
    /// `null` when the end-point cannot be reached
    #[serde(rename = "expectedPath")]
    pub expected_path: Option<Vec<usize>>,
}

/// Load a test from JSON file
pub fn load_test(path: &Path) -> Result<PathTestData, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let test_data: PathTestData = serde_json::from_str(&contents)?;
    Ok(test_data)
}

/// All fixture files in `dir` with the given extension, sorted by name
pub fn fixture_files(dir: &str, extension: &str) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(extension))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

/// A standard format maze and the cells marked as its expected path
#[derive(Clone)]
pub struct StandardMaze {
    pub grid: Grid,
    pub expected: HashSet<usize>,
}

/// Parse a standard format test file
/// Format (one character per cell, one per wall segment):
/// - `-` above a cell: north wall
/// - `|` left of a cell: west wall
/// - P: pony, D: domokun, E: end-point
/// - `*`: cell on the expected path
pub fn parse_standard_test(path: &Path) -> Result<StandardMaze, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    parse_standard(&contents)
}

pub fn parse_standard(contents: &str) -> Result<StandardMaze, Box<dyn std::error::Error>> {
    let lines: Vec<Vec<char>> = contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect())
        .collect();

    if lines.len() < 3 || lines.len() % 2 == 0 {
        return Err("expected an odd number of at least 3 maze lines".into());
    }
    let width = (lines[0].len() - 1) / 2;
    let height = (lines.len() - 1) / 2;
    if lines.iter().any(|line| line.len() != 2 * width + 1) {
        return Err("maze lines differ in width".into());
    }

    let mut cells = Vec::with_capacity(width * height);
    let mut expected = HashSet::new();
    let (mut pony, mut domokun, mut end_point) = (None, None, None);

    for row in 0..height {
        let top = &lines[2 * row];
        let middle = &lines[2 * row + 1];
        for column in 0..width {
            let index = row * width + column;
            cells.push(Walls::new(top[2 * column + 1] == '-', middle[2 * column] == '|'));
            match middle[2 * column + 1] {
                'P' => pony = Some(index),
                'D' => domokun = Some(index),
                'E' => end_point = Some(index),
                '*' => {
                    expected.insert(index);
                }
                ' ' => {}
                other => return Err(format!("unexpected cell glyph {:?}", other).into()),
            }
        }
    }

    let mut grid = Grid::new(width, height, cells)?;
    grid.place_markers(
        pony.ok_or("no pony 'P' found")?,
        domokun.ok_or("no domokun 'D' found")?,
        end_point.ok_or("no end-point 'E' found")?,
    )?;
    Ok(StandardMaze { grid, expected })
}

/// Rebuild a maze with every cell moved by `place`. The moved cell's north
/// and west walls are whichever old sides `north_of` and `west_of` pick.
fn remap(
    maze: &StandardMaze,
    place: impl Fn(usize, usize) -> (usize, usize),
    north_of: impl Fn(&Grid, usize, usize) -> bool,
    west_of: impl Fn(&Grid, usize, usize) -> bool,
) -> StandardMaze {
    let grid = &maze.grid;
    let (width, height) = (grid.width(), grid.height());
    let mut cells = vec![Walls::OPEN; grid.len()];
    let moved = |index: usize| {
        let (column, row) = grid.get_coords(index);
        let (column, row) = place(column, row);
        row * width + column
    };

    for row in 0..height {
        for column in 0..width {
            let (new_column, new_row) = place(column, row);
            cells[new_row * width + new_column] =
                Walls::new(north_of(grid, column, row), west_of(grid, column, row));
        }
    }

    let mut flipped = Grid::new(width, height, cells).unwrap();
    flipped
        .place_markers(moved(grid.pony()), moved(grid.domokun()), moved(grid.end_point()))
        .unwrap();
    StandardMaze {
        grid: flipped,
        expected: maze.expected.iter().map(|&index| moved(index)).collect(),
    }
}

fn north(grid: &Grid, column: usize, row: usize) -> bool {
    row == 0 || grid.cells()[grid.get_id(column, row)].north
}

fn west(grid: &Grid, column: usize, row: usize) -> bool {
    column == 0 || grid.cells()[grid.get_id(column, row)].west
}

fn south(grid: &Grid, column: usize, row: usize) -> bool {
    row + 1 == grid.height() || grid.cells()[grid.get_id(column, row + 1)].north
}

fn east(grid: &Grid, column: usize, row: usize) -> bool {
    column + 1 == grid.width() || grid.cells()[grid.get_id(column + 1, row)].west
}

/// Flip maze horizontally (mirror left-right)
pub fn flip_horizontal(maze: &StandardMaze) -> StandardMaze {
    let width = maze.grid.width();
    remap(maze, |column, row| (width - 1 - column, row), north, east)
}

/// Flip maze vertically (mirror top-bottom)
pub fn flip_vertical(maze: &StandardMaze) -> StandardMaze {
    let height = maze.grid.height();
    remap(maze, |column, row| (column, height - 1 - row), south, west)
}

/// Flip maze both horizontally and vertically
pub fn flip_both(maze: &StandardMaze) -> StandardMaze {
    flip_vertical(&flip_horizontal(maze))
}

/// Whether two cells share an open side, read straight from the wall data
pub fn open_between(grid: &Grid, a: usize, b: usize) -> bool {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    let (low_column, low_row) = grid.get_coords(low);
    let (high_column, high_row) = grid.get_coords(high);
    if high_row == low_row && high_column == low_column + 1 {
        !grid.cells()[high].west
    } else if high_column == low_column && high_row == low_row + 1 {
        !grid.cells()[high].north
    } else {
        false
    }
}

/// Check that start, path and end form a chain of legal single steps
pub fn assert_walkable(grid: &Grid, start: usize, path: &[usize], end: usize) {
    let mut chain = vec![start];
    chain.extend_from_slice(path);
    chain.push(end);
    for step in chain.windows(2) {
        assert!(
            open_between(grid, step[0], step[1]),
            "step {} -> {} is not a legal move",
            step[0],
            step[1]
        );
    }
}

/// Graph distance by repeated relaxation over raw wall data.
/// Shares no code with the solver under test.
pub fn reference_distance(grid: &Grid, start: usize, end: usize) -> Option<usize> {
    let len = grid.len();
    let mut distance = vec![usize::MAX; len];
    distance[start] = 0;

    let mut changed = true;
    while changed {
        changed = false;
        for a in 0..len {
            if distance[a] == usize::MAX {
                continue;
            }
            let candidates = [a + 1, a + grid.width(), a.wrapping_sub(1), a.wrapping_sub(grid.width())];
            for b in candidates {
                if b < len && open_between(grid, a, b) && distance[a] + 1 < distance[b] {
                    distance[b] = distance[a] + 1;
                    changed = true;
                }
            }
        }
    }

    (distance[end] != usize::MAX).then_some(distance[end])
}
