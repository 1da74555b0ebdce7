//! Randomized recursive-backtracker maze generation.
//!
//! The generator walls off the whole grid, then carves passages between
//! cells at odd coordinates, two steps at a time, backtracking along an
//! explicit stack when a cell has no uncarved neighbours left. The result is
//! a perfect maze: every open cell is reachable and there are no cycles.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;
use pathviz_core::{Context, Grid, GridError, MazeEvent, Point};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Candidate moves from a carved cell: right, down, left, up.
const STEPS: [(i32, i32); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// Tuning for [`MazeGen`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    /// Pause after each carving step. Zero disables pacing.
    pub step_delay: Duration,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(5),
        }
    }
}

impl MazeConfig {
    /// No pause between carving steps.
    pub fn unpaced() -> Self {
        Self {
            step_delay: Duration::ZERO,
        }
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }
}

/// How a generation run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MazeOutcome {
    /// The maze is complete; `carved` cells were opened.
    Completed { carved: usize },
    /// The context was cancelled. The grid holds a partial maze without
    /// endpoints.
    Cancelled,
}

/// Maze generator owning its random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub config: MazeConfig,
}

impl MazeGen<ThreadRng> {
    /// A generator using the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for MazeGen<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MazeGen<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            config: MazeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MazeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the layout of `grid` with a new maze, reporting every change
    /// to `sink`.
    ///
    /// Both dimensions must be odd, at least 3, and leave room for distinct
    /// endpoints; otherwise the grid is left untouched. On completion Start
    /// is at (1, 1) and End at (rows - 2, cols - 2).
    pub fn backtracker<F: FnMut(MazeEvent)>(
        &mut self,
        grid: &mut Grid,
        ctx: &Context,
        mut sink: F,
    ) -> Result<MazeOutcome, GridError> {
        let (rows, cols) = (grid.rows(), grid.cols());
        check_dimensions(rows, cols)?;
        debug!("generating a {rows}x{cols} maze");

        grid.reset_all();
        grid.fill_walls();
        sink(MazeEvent::Filled);

        let bounds = grid.bounds();
        let start = Point::new(1, 1);
        carve(grid, start, &mut sink);
        let mut carved = 1usize;
        let mut stack = vec![start];
        let mut candidates = Vec::with_capacity(STEPS.len());

        while let Some(&cur) = stack.last() {
            if ctx.is_done() {
                debug!("maze generation cancelled after {carved} cells");
                sink(MazeEvent::Cancelled);
                return Ok(MazeOutcome::Cancelled);
            }
            candidates.clear();
            candidates.extend(
                STEPS
                    .iter()
                    .map(|&(dr, dc)| cur.shift(dr, dc))
                    .filter(|&n| bounds.interior_contains(n) && grid.is_wall(n)),
            );
            if candidates.is_empty() {
                stack.pop();
                continue;
            }
            let next = candidates[self.rng.random_range(0..candidates.len())];
            carve(grid, cur.midpoint(next), &mut sink);
            carve(grid, next, &mut sink);
            carved += 2;
            stack.push(next);
            ctx.pause(self.config.step_delay);
        }

        let end = Point::new(rows - 2, cols - 2);
        grid.move_start(start)?;
        grid.move_end(end)?;
        sink(MazeEvent::Done { start, end });
        debug!("maze complete: {carved} open cells");
        Ok(MazeOutcome::Completed { carved })
    }
}

fn carve<F: FnMut(MazeEvent)>(grid: &mut Grid, p: Point, sink: &mut F) {
    grid.reset(p);
    sink(MazeEvent::Carve(p));
}

/// Whether a `rows` x `cols` grid can hold a maze: both dimensions odd, at
/// least 3, and not 3 x 3, where Start and End would coincide.
pub fn check_dimensions(rows: i32, cols: i32) -> Result<(), GridError> {
    let fits = rows >= 3 && cols >= 3 && rows % 2 == 1 && cols % 2 == 1 && (rows, cols) != (3, 3);
    if fits {
        Ok(())
    } else {
        Err(GridError::InvalidDimensions { rows, cols })
    }
}

/// Replace the layout of `grid` with a new maze, without pacing.
pub fn generate_maze(grid: &mut Grid) -> Result<(), GridError> {
    MazeGen::new()
        .with_config(MazeConfig::unpaced())
        .backtracker(grid, &Context::new(), |_| {})
        .map(|_| ())
}

/// Generate a maze over an owned copy of the grid on a new thread. The
/// caller replays the events with [`Grid::apply_maze`].
pub fn spawn_maze<F>(
    mut grid: Grid,
    config: MazeConfig,
    ctx: Context,
    sink: F,
) -> JoinHandle<Result<MazeOutcome, GridError>>
where
    F: FnMut(MazeEvent) + Send + 'static,
{
    thread::spawn(move || {
        MazeGen::new()
            .with_config(config)
            .backtracker(&mut grid, &ctx, sink)
    })
}
