use std::collections::VecDeque;

use pathviz_core::{PathResult, Point};

use crate::run::{Pacing, SearchRun, StepObserver};
use crate::traits::Pather;

/// Breadth-first search from `from` to `to`.
///
/// The frontier is a FIFO queue; a cell is enqueued at most once, the first
/// time it is discovered. Every popped cell is reported to `observer`.
pub fn bfs_path<P: Pather, O: StepObserver>(
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
    let mut queue: VecDeque<usize> = VecDeque::new();
    discovered[start_idx] = true;
    queue.push_back(start_idx);

    loop {
        if run.cancelled() {
            return PathResult::Cancelled;
        }
        let Some(ci) = queue.pop_front() else {
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
            queue.push_back(ni);
        }

        run.pause();
    }
}
