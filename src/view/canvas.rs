use std::io::{self, stdout, Write};

use crate::{pos, Pos};

/// A character buffer the size of the terminal, minus one row kept for the
/// status line.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height.saturating_sub(1) as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        let lines = (0..height).map(|_| vec![' '; width]).collect();
        Self {
            height,
            lines,
            width,
        }
    }

    /// Paints every screen position for which `f` returns a character.
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for (y, line) in self.lines.iter_mut().enumerate() {
            for (x, slot) in line.iter_mut().enumerate() {
                if let Some(char) = f(pos!(x as i32, y as i32)) {
                    *slot = char;
                }
            }
        }
    }

    pub fn line(&self, y: usize) -> String {
        self.lines[y].iter().collect()
    }

    pub fn display(&self, status: &str) -> io::Result<()> {
        let mut out = stdout().lock();
        write!(out, "{}", termion::clear::All)?;
        for index in 0..self.height {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            write!(out, "{goto}{}", self.line(index))?;
        }
        let goto = termion::cursor::Goto(1, self.height as u16 + 1);
        let status: String = status.chars().take(self.width).collect();
        write!(out, "{goto}{status}")?;
        out.flush()
    }
}

#[test]
fn test_layers_stack() {
    let mut canvas = Canvas::new(4, 2);
    canvas.layer(|_| Some('.'));
    canvas.layer(|p| (p.x == p.y).then_some('#'));
    assert_eq!(canvas.line(0), "#...");
    assert_eq!(canvas.line(1), ".#..");
}
