use std::{
    fmt,
    ops::{Add, Sub},
};

/// A cell coordinate. Grid cells live in `0..width` x `0..height`, but the type
/// itself is signed so that neighbour offsets and view scrolling can step
/// below zero before being clipped.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        $crate::Pos { x: $x, y: $y }
    };
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[test]
fn test_pos_arithmetic() {
    assert_eq!(pos!(3, 4) + pos!(-1, 1), pos!(2, 5));
    assert_eq!(pos!(3, 4) - pos!(3, 4), pos!(0, 0));
    assert_eq!(pos!(-2, 7).to_string(), "(-2, 7)");
}
