use std::{
    io::{stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use termion::{event::Key, input::TermRead, raw::IntoRawMode};
use tracing::{error, info};

use crate::{
    error::Result,
    pos,
    seed::parse_seed,
    sim::{Frame, Phase, Reset, SimCmd, Status},
    Cell, Grid, LiveSet, Pos, SimHandle,
};

pub use canvas::Canvas;
mod canvas;

pub struct View {
    thread: JoinHandle<Result<()>>,
}

impl View {
    pub fn spawn(
        handle: SimHandle,
        frames: mpsc::Receiver<Frame>,
        grid: Grid,
        rng_seed: u64,
    ) -> Self {
        let thread = thread::spawn(move || view_loop(handle, frames, grid, rng_seed));
        Self { thread }
    }

    pub fn join(self) -> Result<()> {
        match self.thread.join() {
            Ok(result) => result,
            Err(_) => {
                error!("view thread panicked");
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    Char(char),
    Backspace,
    Enter,
    Cancel,
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for c in stdin().keys() {
        let command = match c {
            Ok(Key::Char('q')) | Ok(Key::Ctrl('c')) | Err(_) => InputCmd::Exit,
            Ok(Key::Char('\n')) => InputCmd::Enter,
            Ok(Key::Char(c)) => InputCmd::Char(c),
            Ok(Key::Backspace) => InputCmd::Backspace,
            Ok(Key::Esc) => InputCmd::Cancel,
            Ok(Key::Up) => InputCmd::Move(Dir::Up),
            Ok(Key::Down) => InputCmd::Move(Dir::Down),
            Ok(Key::Left) => InputCmd::Move(Dir::Left),
            Ok(Key::Right) => InputCmd::Move(Dir::Right),
            _ => continue,
        };

        let exit = command == InputCmd::Exit;
        if sender.send(command).is_err() || exit {
            break;
        }
    }
}

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(30);
const SCROLL_STEP: i32 = 4;

fn view_loop(
    handle: SimHandle,
    frames: mpsc::Receiver<Frame>,
    grid: Grid,
    rng_seed: u64,
) -> Result<()> {
    // dropped on every return path, which puts the terminal back in cooked mode
    let raw = stdout().into_raw_mode()?;
    let (sender, inputs) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let result = handle.snapshot().and_then(|board| {
        let screen = Screen::new(grid, board, rng_seed);
        run_screen(screen, &handle, &frames, &inputs, |screen, status| {
            let canvas = screen.render(Canvas::from_screen()?);
            canvas.display(&screen.status_line(status))?;
            Ok(())
        })
    });

    let mut out = stdout();
    write!(out, "{}{}", termion::clear::All, termion::cursor::Goto(1, 1))?;
    out.flush()?;
    drop(raw);
    result
}

/// Input, frame and redraw cycle. Returns once the user quits or the
/// simulation can no longer be reached.
fn run_screen(
    mut screen: Screen,
    handle: &SimHandle,
    frames: &mpsc::Receiver<Frame>,
    inputs: &mpsc::Receiver<InputCmd>,
    mut draw: impl FnMut(&Screen, Status) -> Result<()>,
) -> Result<()> {
    loop {
        for cmd in inputs.try_iter() {
            if let Flow::Exit = screen.handle_input(cmd, handle)? {
                return handle.send(SimCmd::Exit);
            }
        }
        for frame in frames.try_iter() {
            screen.apply(&frame);
        }
        let status = handle.status()?;
        draw(&screen, status)?;
        thread::sleep(VIEW_REFRESH_INTERVAL);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Everything the terminal shows. The board mirrors the simulation's live set
/// and is only ever changed by applying frames.
struct Screen {
    grid: Grid,
    board: LiveSet,
    generation: u64,
    view_origin: Pos,
    rng_seed: u64,
    seed_entry: Option<String>,
    message: Option<String>,
}

impl Screen {
    fn new(grid: Grid, board: LiveSet, rng_seed: u64) -> Self {
        // start with the seeded region on screen
        let center = grid.center();
        let view_origin = pos!((center.x - 40).max(0), (center.y - 20).max(0));
        Self {
            grid,
            board,
            generation: 0,
            view_origin,
            rng_seed,
            seed_entry: None,
            message: None,
        }
    }

    fn apply(&mut self, frame: &Frame) {
        for pos in frame.diff.deactivated.iter() {
            self.board.set(pos, Cell::inactive());
        }
        for pos in frame.diff.activated.iter() {
            self.board.set(pos, Cell::active());
        }
        self.generation = frame.generation;
    }

    fn handle_input(&mut self, cmd: InputCmd, handle: &SimHandle) -> Result<Flow> {
        if cmd == InputCmd::Exit {
            return Ok(Flow::Exit);
        }
        if let InputCmd::Move(direction) = cmd {
            self.view_origin = self.view_origin
                + match direction {
                    Dir::Up => pos!(0, -SCROLL_STEP),
                    Dir::Down => pos!(0, SCROLL_STEP),
                    Dir::Left => pos!(-SCROLL_STEP, 0),
                    Dir::Right => pos!(SCROLL_STEP, 0),
                };
            return Ok(Flow::Continue);
        }

        match self.seed_entry.take() {
            Some(entry) => self.handle_seed_entry(cmd, entry, handle)?,
            None => match cmd {
                InputCmd::Char('n') => handle.send(SimCmd::Next)?,
                InputCmd::Char('r') => handle.send(SimCmd::Run)?,
                InputCmd::Char('s') => handle.send(SimCmd::Stop)?,
                InputCmd::Char('x') => {
                    handle.send(SimCmd::Reset(Reset::Seed(self.rng_seed)))?;
                    self.message = Some(format!("reset with seed {}", self.rng_seed));
                }
                InputCmd::Char('e') => {
                    self.seed_entry = Some(String::new());
                    self.message = None;
                }
                _ => (),
            },
        }
        Ok(Flow::Continue)
    }

    fn handle_seed_entry(
        &mut self,
        cmd: InputCmd,
        mut entry: String,
        handle: &SimHandle,
    ) -> Result<()> {
        match cmd {
            InputCmd::Char(c) => {
                entry.push(c);
                self.seed_entry = Some(entry);
            }
            InputCmd::Backspace => {
                entry.pop();
                self.seed_entry = Some(entry);
            }
            InputCmd::Enter => match parse_seed(&entry) {
                Ok(rng_seed) => {
                    info!(rng_seed, "new seed");
                    self.rng_seed = rng_seed;
                    handle.send(SimCmd::Reset(Reset::Seed(rng_seed)))?;
                    self.message = Some(format!("reset with seed {rng_seed}"));
                }
                Err(err) => {
                    // ask again, the simulation is left alone
                    self.message = Some(err.to_string());
                    self.seed_entry = Some(String::new());
                }
            },
            InputCmd::Cancel => self.message = None,
            InputCmd::Exit | InputCmd::Move(_) => self.seed_entry = Some(entry),
        }
        Ok(())
    }

    fn render(&self, mut canvas: Canvas) -> Canvas {
        canvas.layer(|p| {
            let pos = self.view_origin + p;
            if !self.grid.contains(pos) {
                Some('.')
            } else if self.board.is_alive(pos) {
                Some('#')
            } else {
                None
            }
        });
        canvas
    }

    fn status_line(&self, status: Status) -> String {
        let phase = match status.phase {
            Phase::Idle => "stopped",
            Phase::Running => "running",
            Phase::ResetPending => "resetting",
        };
        let mut line = format!(
            "step {} | {phase} | alive {} | seed {}",
            self.generation, status.alive, self.rng_seed
        );
        if let Some(message) = &self.message {
            line += &format!(" | {message}");
        }
        match &self.seed_entry {
            Some(entry) => line += &format!(" | seed> {entry}_"),
            None => line += " | n:next r:run s:stop x:reset e:seed q:quit",
        }
        line
    }
}
