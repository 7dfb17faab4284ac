use crate::error::{MazeError, Result};
use crate::grid::{Direction, Grid};
use log::{debug, trace};
use std::collections::VecDeque;

/// Cells strictly between start and end, in walking order
pub type Path = Vec<usize>;

const NO_PARENT: usize = usize::MAX;

/// Shortest move sequence from `start` to `end` by breadth-first search.
///
/// Neighbors are expanded in `Direction::SEARCH_ORDER`, so among several
/// shortest routes the same one is returned every time. The returned path
/// excludes both endpoints, so it is empty when `start == end` or when the two
/// cells are directly connected. A missing route is `UnreachableTarget`,
/// never an empty path.
pub fn find_path(grid: &Grid, start: usize, end: usize) -> Result<Path> {
    for index in [start, end] {
        if !grid.is_on_grid(index) {
            return Err(MazeError::IndexOutOfRange {
                index,
                len: grid.len(),
            });
        }
    }

    trace!("[find_path] START: {} -> {} on {}x{}", start, end, grid.width(), grid.height());

    if start == end {
        return Ok(Vec::new());
    }

    let mut visited = vec![false; grid.len()];
    let mut parent = vec![NO_PARENT; grid.len()];
    let mut frontier = VecDeque::with_capacity(grid.len());

    visited[start] = true;
    frontier.push_back(start);

    let mut expanded = 0usize;
    while let Some(current) = frontier.pop_front() {
        if current == end {
            let path = reconstruct(&parent, start, end);
            debug!(
                "[find_path] {} -> {}: {} intermediate cells, {} expanded",
                start,
                end,
                path.len(),
                expanded
            );
            return Ok(path);
        }
        expanded += 1;

        for direction in Direction::SEARCH_ORDER {
            let Some(next) = grid.neighbor(current, direction)? else {
                continue;
            };
            if visited[next] {
                continue;
            }
            visited[next] = true;
            parent[next] = current;
            frontier.push_back(next);
        }
    }

    debug!("[find_path] NO PATH from {} to {} after {} expansions", start, end, expanded);
    Err(MazeError::UnreachableTarget { start, end })
}

/// Walk parent links back from `end`, then drop both endpoints
fn reconstruct(parent: &[usize], start: usize, end: usize) -> Path {
    let mut path = Vec::new();
    let mut node = parent[end];
    while node != start && node != NO_PARENT {
        path.push(node);
        node = parent[node];
    }
    path.reverse();
    path
}

/// Format path for display
pub fn format_path(path: &[usize]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|index| index.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Walls;

    #[test]
    fn adjacent_cells_have_an_empty_path() {
        let grid = Grid::open(3, 3).unwrap();
        assert_eq!(find_path(&grid, 4, 5).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn off_grid_endpoints_are_rejected() {
        let grid = Grid::open(3, 3).unwrap();
        assert!(matches!(
            find_path(&grid, 0, 9),
            Err(MazeError::IndexOutOfRange { index: 9, len: 9 })
        ));
    }

    #[test]
    fn ties_prefer_east_before_south() {
        // 0 -> 4 on an open 3x3: both 1 and 3 are one step away; east wins
        let grid = Grid::open(3, 3).unwrap();
        assert_eq!(find_path(&grid, 0, 4).unwrap(), vec![1]);

        let mut cells = vec![Walls::OPEN; 9];
        cells[1].west = true;
        let walled = Grid::new(3, 3, cells).unwrap();
        assert_eq!(find_path(&walled, 0, 4).unwrap(), vec![3]);
    }

    #[test]
    fn format_path_joins_indices() {
        assert_eq!(format_path(&[]), "No path");
        assert_eq!(format_path(&[3, 4, 7]), "3 -> 4 -> 7");
    }
}
