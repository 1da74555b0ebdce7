use pathviz_core::{PathResult, Point};

use crate::dijkstra::UNREACHABLE;
use crate::frontier::MinQueue;
use crate::run::{Pacing, SearchRun, StepObserver};
use crate::traits::HeuristicPather;

/// A* search from `from` to `to` with unit step cost.
///
/// The frontier is ordered by `g + h`, where `g` is the accumulated cost and
/// `h` the pather's estimate. Relaxation compares `g` only. With an
/// admissible estimate the returned path is a shortest one.
pub fn astar_path<P: HeuristicPather, O: StepObserver>(
    pather: &P,
    from: Point,
    to: Point,
    observer: &mut O,
    pacing: &Pacing,
) -> PathResult {
    let mut run = SearchRun::new(pather.bounds(), observer, pacing);
    let (Some(start_idx), Some(goal_idx)) = (run.idx(from), run.idx(to)) else {
        return PathResult::NotFound;
    };

    let mut g = vec![UNREACHABLE; run.len()];
    let mut open = MinQueue::default();
    g[start_idx] = 0;
    open.push(start_idx, pather.estimate(from, to));

    loop {
        if run.cancelled() {
            return PathResult::Cancelled;
        }
        let Some(ci) = open.pop() else {
            return PathResult::NotFound;
        };

        run.examine(ci);
        if ci == goal_idx {
            return PathResult::Found(run.path(start_idx, goal_idx));
        }

        let tentative_g = g[ci] + 1;
        for ni in run.expand(pather, ci) {
            if tentative_g >= g[ni] {
                continue;
            }
            g[ni] = tentative_g;
            run.set_parent(ni, ci);
            open.push(ni, tentative_g + pather.estimate(run.point(ni), to));
        }

        run.pause();
    }
}
