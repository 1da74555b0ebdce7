use pathviz_core::{PathResult, Point};

use crate::frontier::MinQueue;
use crate::run::{Pacing, SearchRun, StepObserver};
use crate::traits::HeuristicPather;

/// Greedy best-first search from `from` to `to`.
///
/// The frontier is ordered by the heuristic estimate to `to` alone. Cells are
/// never re-expanded, so the returned path may be longer than the shortest.
pub fn greedy_path<P: HeuristicPather, O: StepObserver>(
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
    let mut open = MinQueue::default();
    discovered[start_idx] = true;
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

        for ni in run.expand(pather, ci) {
            if discovered[ni] {
                continue;
            }
            discovered[ni] = true;
            run.set_parent(ni, ci);
            open.push(ni, pather.estimate(run.point(ni), to));
        }

        run.pause();
    }
}
