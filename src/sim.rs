use std::{
    mem,
    sync::mpsc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::{debug, error, info};

use crate::{
    error::{Error, Result},
    seed::seed,
    step::step,
    Diff, Grid, LiveSet,
};

/// What a reset replaces the board with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reset {
    Seed(u64),
    Pattern(LiveSet),
}

impl Reset {
    fn into_live_set(self, grid: &Grid) -> LiveSet {
        match self {
            Reset::Seed(rng_seed) => seed(grid, rng_seed),
            Reset::Pattern(live_set) => live_set,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    /// A reset waiting for the next tick boundary.
    ResetPending(Reset),
}

impl RunState {
    pub fn phase(&self) -> Phase {
        match self {
            RunState::Idle => Phase::Idle,
            RunState::Running => Phase::Running,
            RunState::ResetPending(_) => Phase::ResetPending,
        }
    }
}

/// `RunState` without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    ResetPending,
}

/// One settled transition, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub generation: u64,
    pub diff: Diff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub generation: u64,
    pub phase: Phase,
    pub alive: usize,
}

#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    live_set: LiveSet,
    generation: u64,
    state: RunState,
}

impl Simulation {
    pub fn new(grid: Grid, live_set: LiveSet) -> Self {
        Self {
            grid,
            live_set,
            generation: 0,
            state: RunState::Idle,
        }
    }

    pub fn seeded(grid: Grid, rng_seed: u64) -> Self {
        let live_set = seed(&grid, rng_seed);
        Self::new(grid, live_set)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn live_set(&self) -> &LiveSet {
        &self.live_set
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn status(&self) -> Status {
        Status {
            generation: self.generation,
            phase: self.state.phase(),
            alive: self.live_set.len(),
        }
    }

    fn advance(&mut self) -> Frame {
        let (next, diff) = step(&self.grid, &self.live_set);
        self.live_set = next;
        self.generation += 1;
        Frame {
            generation: self.generation,
            diff,
        }
    }

    /// Single step, only allowed while idle.
    pub fn next(&mut self) -> Option<Frame> {
        match self.state {
            RunState::Idle => Some(self.advance()),
            _ => None,
        }
    }

    pub fn start(&mut self) -> bool {
        if self.state != RunState::Idle {
            return false;
        }
        info!(generation = self.generation, "running");
        self.state = RunState::Running;
        true
    }

    /// Takes effect at the next tick boundary. A pending reset is kept.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            info!(generation = self.generation, "stopped");
            self.state = RunState::Idle;
        }
    }

    /// Nothing changes until the next `tick`, so a step in progress always
    /// settles first.
    pub fn request_reset(&mut self, reset: Reset) {
        debug!(?reset, "reset requested");
        self.state = RunState::ResetPending(reset);
    }

    /// Tick boundary: runs one generation, applies a pending reset, or does
    /// nothing when idle.
    pub fn tick(&mut self) -> Option<Frame> {
        match mem::replace(&mut self.state, RunState::Idle) {
            RunState::Idle => None,
            RunState::Running => {
                let frame = self.advance();
                if self.live_set.is_empty() {
                    info!(generation = self.generation, "population extinct, stopping");
                } else {
                    self.state = RunState::Running;
                }
                Some(frame)
            }
            RunState::ResetPending(reset) => {
                let live_set = reset.into_live_set(&self.grid);
                let diff = Diff::between(&self.live_set, &live_set);
                self.live_set = live_set;
                self.generation = 0;
                info!(alive = self.live_set.len(), "reset applied");
                Some(Frame {
                    generation: self.generation,
                    diff,
                })
            }
        }
    }
}

#[derive(Debug)]
pub enum SimCmd {
    Next,
    Run,
    Stop,
    Reset(Reset),
    Snapshot(mpsc::Sender<LiveSet>),
    Status(mpsc::Sender<Status>),
    Exit,
}

#[derive(Debug, Clone)]
pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    pub fn new(sender: mpsc::Sender<SimCmd>) -> Self {
        Self { sender }
    }

    pub fn send(&self, cmd: SimCmd) -> Result<()> {
        self.sender.send(cmd).map_err(|_| Error::Disconnected)
    }

    pub fn snapshot(&self) -> Result<LiveSet> {
        let (sender, receiver) = mpsc::channel();
        self.send(SimCmd::Snapshot(sender))?;
        receiver.recv().map_err(|_| Error::Disconnected)
    }

    pub fn status(&self) -> Result<Status> {
        let (sender, receiver) = mpsc::channel();
        self.send(SimCmd::Status(sender))?;
        receiver.recv().map_err(|_| Error::Disconnected)
    }
}

/// Owns a `Simulation` on its own thread and paces its ticks. Frames are
/// pushed to `frames` as they settle.
#[derive(Debug)]
pub struct Sim {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    pub fn spawn(
        simulation: Simulation,
        tick_interval: Duration,
        frames: mpsc::Sender<Frame>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || sim_loop(receiver, frames, simulation, tick_interval));

        Self { sender, thread }
    }

    pub fn handle(&self) -> SimHandle {
        let sender = self.sender.clone();
        SimHandle { sender }
    }

    pub fn join(self) {
        if self.thread.join().is_err() {
            error!("simulation thread panicked");
        }
    }
}

const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(2);

fn sim_loop(
    receiver: mpsc::Receiver<SimCmd>,
    frames: mpsc::Sender<Frame>,
    mut simulation: Simulation,
    tick_interval: Duration,
) {
    let mut last_tick = Instant::now();

    loop {
        while let Ok(cmd) = receiver.try_recv() {
            let frame = match cmd {
                SimCmd::Next => simulation.next(),
                SimCmd::Run => {
                    simulation.start();
                    None
                }
                SimCmd::Stop => {
                    simulation.stop();
                    None
                }
                SimCmd::Reset(reset) => {
                    simulation.request_reset(reset);
                    None
                }
                SimCmd::Snapshot(sender) => {
                    let _ = sender.send(simulation.live_set().clone());
                    None
                }
                SimCmd::Status(sender) => {
                    let _ = sender.send(simulation.status());
                    None
                }
                SimCmd::Exit => return,
            };
            if let Some(frame) = frame {
                if frames.send(frame).is_err() {
                    debug!("frame receiver dropped, leaving sim loop");
                    return;
                }
            }
        }

        let due = last_tick.elapsed() >= tick_interval;
        let reset_pending = simulation.state().phase() == Phase::ResetPending;
        if due || reset_pending {
            if let Some(frame) = simulation.tick() {
                if frames.send(frame).is_err() {
                    debug!("frame receiver dropped, leaving sim loop");
                    return;
                }
            }
            last_tick = Instant::now();
        }

        thread::sleep(EVT_CHECK_TIMEOUT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;

    fn blinker() -> LiveSet {
        [pos!(4, 5), pos!(5, 5), pos!(6, 5)].into_iter().collect()
    }

    fn simulation() -> Simulation {
        Simulation::new(Grid::new(11, 11).unwrap(), blinker())
    }

    #[test]
    fn test_next_only_when_idle() {
        let mut sim = simulation();
        let frame = sim.next().unwrap();
        assert_eq!(frame.generation, 1);
        assert_eq!(sim.generation(), 1);
        assert_eq!(frame.diff.apply(&blinker()), *sim.live_set());

        assert!(sim.start());
        assert!(!sim.start());
        assert!(sim.next().is_none());
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_tick_runs_only_while_running() {
        let mut sim = simulation();
        assert!(sim.tick().is_none());
        sim.start();
        assert_eq!(sim.tick().unwrap().generation, 1);
        assert_eq!(sim.tick().unwrap().generation, 2);
        assert_eq!(*sim.live_set(), blinker());
        sim.stop();
        assert!(sim.tick().is_none());
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_reset_waits_for_tick_boundary() {
        let mut sim = simulation();
        sim.start();
        sim.tick();
        let before = sim.live_set().clone();

        let block: LiveSet = [pos!(0, 0), pos!(1, 0), pos!(0, 1), pos!(1, 1)].into_iter().collect();
        sim.request_reset(Reset::Pattern(block.clone()));
        assert_eq!(sim.state().phase(), Phase::ResetPending);
        assert_eq!(*sim.live_set(), before);
        assert!(sim.next().is_none());

        // stop does not drop the pending reset
        sim.stop();
        assert_eq!(sim.state().phase(), Phase::ResetPending);

        let frame = sim.tick().unwrap();
        assert_eq!(frame.generation, 0);
        assert_eq!(frame.diff.deactivated, before);
        assert_eq!(frame.diff.activated, block);
        assert_eq!(*sim.live_set(), block);
        assert_eq!(*sim.state(), RunState::Idle);
    }

    #[test]
    fn test_reset_diff_is_minimal() {
        let grid = Grid::new(60, 60).unwrap();
        let mut sim = Simulation::seeded(grid, 7);
        let original = sim.live_set().clone();
        sim.next();
        let stepped = sim.live_set().clone();

        sim.request_reset(Reset::Seed(7));
        let frame = sim.tick().unwrap();
        assert_eq!(*sim.live_set(), original);
        assert!(frame.diff.activated.is_disjoint(&frame.diff.deactivated));
        assert!(frame.diff.deactivated.is_subset(&stepped));
        assert_eq!(frame.diff.apply(&stepped), original);
    }

    #[test]
    fn test_extinction_stops_running() {
        let single: LiveSet = [pos!(3, 3)].into_iter().collect();
        let mut sim = Simulation::new(Grid::new(8, 8).unwrap(), single);
        sim.start();
        let frame = sim.tick().unwrap();
        assert!(sim.live_set().is_empty());
        assert_eq!(frame.diff.deactivated.len(), 1);
        assert_eq!(sim.status().phase, Phase::Idle);
        assert!(sim.tick().is_none());
    }

    #[test]
    fn test_threaded_sim_delivers_frames() {
        let (frames_sender, frames) = mpsc::channel();
        let sim = Sim::spawn(simulation(), Duration::from_millis(1), frames_sender);
        let handle = sim.handle();
        let timeout = Duration::from_secs(5);

        handle.send(SimCmd::Next).unwrap();
        let frame = frames.recv_timeout(timeout).unwrap();
        assert_eq!(frame.generation, 1);

        handle.send(SimCmd::Run).unwrap();
        let mut mirror = frame.diff.apply(&blinker());
        for generation in 2..=6 {
            let frame = frames.recv_timeout(timeout).unwrap();
            assert_eq!(frame.generation, generation);
            mirror = frame.diff.apply(&mirror);
        }
        handle.send(SimCmd::Stop).unwrap();
        let status = handle.status().unwrap();
        assert_eq!(status.phase, Phase::Idle);

        // drain whatever settled before the stop landed
        while let Ok(frame) = frames.try_recv() {
            mirror = frame.diff.apply(&mirror);
        }
        assert_eq!(handle.snapshot().unwrap(), mirror);

        handle.send(SimCmd::Exit).unwrap();
        sim.join();
        assert!(matches!(handle.status(), Err(Error::Disconnected)));
    }
}
