use crate::grid::Grid;

pub const PONY: char = 'P';
pub const DOMOKUN: char = 'D';
pub const END_POINT: char = 'E';
pub const PATH: char = '*';
pub const EMPTY: char = ' ';

/// Draw the maze as text, one character per cell.
///
/// ```text
/// +-+-+-+
/// |P  |E|
/// + +-+ +
/// |  *  |
/// +-+-+-+
/// ```
///
/// The outer border is always drawn, whatever the border cells record.
pub fn render_ascii(grid: &Grid, overlay: &[usize]) -> String {
    let width = grid.width();
    let mut marked = vec![false; grid.len()];
    for &index in overlay.iter().filter(|&&index| grid.is_on_grid(index)) {
        marked[index] = true;
    }
    let mut result = String::with_capacity((2 * width + 2) * (2 * grid.height() + 1));

    for row in 0..grid.height() {
        for column in 0..width {
            let walls = grid.cells()[grid.get_id(column, row)];
            result.push('+');
            result.push(if row == 0 || walls.north { '-' } else { ' ' });
        }
        result.push_str("+\n");

        for column in 0..width {
            let index = grid.get_id(column, row);
            let walls = grid.cells()[index];
            result.push(if column == 0 || walls.west { '|' } else { ' ' });
            result.push(glyph(grid, &marked, index));
        }
        result.push_str("|\n");
    }

    for _ in 0..width {
        result.push_str("+-");
    }
    result.push_str("+\n");
    result
}

fn glyph(grid: &Grid, marked: &[bool], index: usize) -> char {
    if index == grid.pony() {
        PONY
    } else if index == grid.domokun() {
        DOMOKUN
    } else if index == grid.end_point() {
        END_POINT
    } else if marked[index] {
        PATH
    } else {
        EMPTY
    }
}
