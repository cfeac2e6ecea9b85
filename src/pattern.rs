use crate::{
    error::{Error, Result},
    pos, Grid, LiveSet, Pos,
};

/// Cells of `#`-art text relative to its top-left corner. Any character
/// other than `#` and newline is a dead cell.
fn cells(text: &str) -> Vec<Pos> {
    let mut result = vec![];
    let mut pos = pos!(0, 0);
    for c in text.chars() {
        match c {
            '#' => {
                result.push(pos);
                pos.x += 1
            }
            '\n' => pos = pos!(0, pos.y + 1),
            '\r' => (),
            _ => pos.x += 1,
        }
    }
    result
}

/// Parses a pattern and places its top-left corner at `origin`.
pub fn parse_pattern(grid: &Grid, text: &str, origin: Pos) -> Result<LiveSet> {
    cells(text)
        .into_iter()
        .map(|cell| origin + cell)
        .map(|pos| {
            if grid.contains(pos) {
                Ok(pos)
            } else {
                Err(Error::PatternOutOfBounds { x: pos.x, y: pos.y })
            }
        })
        .collect()
}

/// Origin that puts the centre of the pattern's bounding box on the grid centre.
pub fn centered_origin(grid: &Grid, text: &str) -> Pos {
    let cells = cells(text);
    let width = cells.iter().map(|p| p.x + 1).max().unwrap_or(0);
    let height = cells.iter().map(|p| p.y + 1).max().unwrap_or(0);
    grid.center() - pos!(width / 2, height / 2)
}
