//! The search driver: endpoint checks, stale-mark cleanup, dispatch, and the
//! terminal grid state of a run.
//!
//! [`run`] works on a grid in place. [`run_detached`] and [`spawn_search`]
//! are for workers: they search an owned copy and report every visible
//! change as a [`SearchEvent`], to be applied to the displayed grid with
//! [`Grid::apply_search`].

use std::thread::{self, JoinHandle};
use log::{debug, trace};
use pathviz_core::{Context, Grid, PathResult, Point, SearchError, SearchEvent};

use crate::config::SearchConfig;
use crate::run::{Pacing, StepObserver};

/// Run the configured search on `grid`.
///
/// Each examined cell is marked on `grid` before `on_step` sees it. On
/// success the path cells are marked as well. The algorithm reads walls from
/// a snapshot taken before the first step.
pub fn run<O: StepObserver>(
    grid: &mut Grid,
    config: &SearchConfig,
    on_step: &mut O,
    ctx: &Context,
) -> Result<PathResult, SearchError> {
    let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
        debug!("search refused: missing start or end");
        return Err(SearchError::MissingEndpoints);
    };

    grid.clear_search();
    let snapshot = grid.clone();
    let pacing = Pacing::new(ctx.clone(), config.step_delay);
    debug!(
        "{} search from {start} to {end}, {:?} per step",
        config.algorithm, config.step_delay
    );

    let mut steps = 0usize;
    let result = {
        let mut observer = |p: Point| {
            steps += 1;
            trace!("step {steps}: examining {p}");
            grid.mark_examining(p);
            on_step.on_step(p);
        };
        config
            .algorithm
            .find_path(&snapshot, start, end, &mut observer, &pacing)
    };

    if let PathResult::Found(path) = &result {
        for &p in path {
            grid.mark_path(p);
        }
    }

    match &result {
        PathResult::Found(path) => debug!(
            "{} found a path of {} steps after {steps} examined cells",
            config.algorithm,
            path.len().saturating_sub(1)
        ),
        PathResult::NotFound => debug!("{} found no path after {steps} cells", config.algorithm),
        PathResult::Cancelled => debug!("{} cancelled after {steps} cells", config.algorithm),
    }
    Ok(result)
}

/// Run the search named `algorithm` (exact match) with the given step delay.
pub fn run_search<F: FnMut(Point)>(
    grid: &mut Grid,
    algorithm: &str,
    step_delay_ms: u64,
    mut on_step: F,
    ctx: &Context,
) -> Result<PathResult, SearchError> {
    let config = SearchConfig::from_name(algorithm, step_delay_ms)?;
    run(grid, &config, &mut on_step, ctx)
}

/// Search an owned copy of the grid on the current thread, reporting every
/// step and finally the outcome to `sink`.
pub fn run_detached<F: FnMut(SearchEvent)>(
    mut grid: Grid,
    config: &SearchConfig,
    ctx: &Context,
    mut sink: F,
) -> Result<PathResult, SearchError> {
    let result = run(
        &mut grid,
        config,
        &mut |p: Point| sink(SearchEvent::Step(p)),
        ctx,
    );
    sink(SearchEvent::Finished(result.clone()));
    result
}

/// [`run_detached`] on a new thread.
pub fn spawn_search<F>(
    grid: Grid,
    config: SearchConfig,
    ctx: Context,
    sink: F,
) -> JoinHandle<Result<PathResult, SearchError>>
where
    F: FnMut(SearchEvent) + Send + 'static,
{
    thread::spawn(move || run_detached(grid, &config, &ctx, sink))
}
