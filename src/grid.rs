use crate::{
    error::{Error, Result},
    pos, Pos,
};

pub const DEFAULT_WIDTH: i32 = 200;
pub const DEFAULT_HEIGHT: i32 = 125;

/// Fixed-size bounded board. Cells outside `0..width` x `0..height` do not
/// exist; there is no wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, Pos { x, y }: Pos) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    pub fn center(&self) -> Pos {
        pos!(self.width / 2, self.height / 2)
    }

    /// The up to 8 cells touching `pos`, clipped to the board.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        (-1..=1)
            .flat_map(|x| (-1..=1).map(move |y| pos!(x, y)))
            .filter(|offset| *offset != pos!(0, 0))
            .map(move |offset| pos + offset)
            .filter(move |p| self.contains(*p))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}
