use pathviz_core::{PathResult, Point};

use crate::run::{Pacing, SearchRun, StepObserver};
use crate::traits::Pather;

/// Depth-first search from `from` to `to`.
///
/// The frontier is a LIFO stack; a cell is pushed at most once, the first
/// time it is discovered. The returned path is not necessarily the shortest.
pub fn dfs_path<P: Pather, O: StepObserver>(
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

    let mut discovered = vec![false; run.len()];
    let mut stack: Vec<usize> = vec![start_idx];
    discovered[start_idx] = true;

    loop {
        if run.cancelled() {
            return PathResult::Cancelled;
        }
        let Some(ci) = stack.pop() else {
            return PathResult::NotFound;
        };

        run.examine(ci);
        if ci == goal_idx {
            return PathResult::Found(run.path(start_idx, goal_idx));
        }

        for ni in run.expand(pather, ci) {
            if discovered[ni] {
                continue;
            }
            discovered[ni] = true;
            run.set_parent(ni, ci);
            stack.push(ni);
        }

        run.pause();
    }
}
