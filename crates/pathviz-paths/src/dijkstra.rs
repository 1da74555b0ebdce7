use pathviz_core::{PathResult, Point};

use crate::frontier::MinQueue;
use crate::run::{Pacing, SearchRun, StepObserver};
use crate::traits::Pather;

/// Sentinel cost for cells not reached yet.
pub(crate) const UNREACHABLE: i32 = i32::MAX;

/// Dijkstra's shortest-path search from `from` to `to` with unit step cost.
///
/// The frontier is ordered by accumulated cost from `from`. A cell is pushed
/// again whenever a strictly cheaper route to it is found; superseded entries
/// are still popped and reported.
pub fn dijkstra_path<P: Pather, O: StepObserver>(
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

    let mut costs = vec![UNREACHABLE; run.len()];
    let mut open = MinQueue::default();
    costs[start_idx] = 0;
    open.push(start_idx, 0);

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

        let tentative = costs[ci] + 1;
        for ni in run.expand(pather, ci) {
            if tentative >= costs[ni] {
                continue;
            }
            costs[ni] = tentative;
            run.set_parent(ni, ci);
            open.push(ni, tentative);
        }

        run.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::testutil::{grid_from, pts};

    #[test]
    fn goes_around_centre_wall() {
        let g = grid_from(&[
            "S..", //
            ".#.",
            "..E",
        ]);
        let r = dijkstra_path(&g, g.start().unwrap(), g.end().unwrap(), &mut |_| {}, &Pacing::unpaced());
        assert_eq!(r, PathResult::Found(pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])));
    }

    #[test]
    fn open_grid_length_is_manhattan() {
        let g = grid_from(&[
            "......", //
            ".S....",
            "......",
            "......",
            ".....E",
        ]);
        let (s, e) = (g.start().unwrap(), g.end().unwrap());
        let r = dijkstra_path(&g, s, e, &mut |_| {}, &Pacing::unpaced());
        assert_eq!(r.steps(), Some(manhattan(s, e) as usize));
    }

    #[test]
    fn start_equals_end() {
        let g = grid_from(&["S.E"]);
        let s = g.start().unwrap();
        let mut steps = Vec::new();
        let r = dijkstra_path(&g, s, s, &mut |p| steps.push(p), &Pacing::unpaced());
        assert_eq!(r, PathResult::Found(vec![s]));
        assert_eq!(steps, vec![s]);
    }

    #[test]
    fn pocket_takes_nine_steps() {
        let g = grid_from(&[
            ".....", //
            ".#E#.",
            ".###.",
            ".....",
            "..S..",
        ]);
        let r = dijkstra_path(&g, g.start().unwrap(), g.end().unwrap(), &mut |_| {}, &Pacing::unpaced());
        assert_eq!(r.steps(), Some(9));
    }

    #[test]
    fn out_of_range_endpoint_is_not_found() {
        let g = grid_from(&["S.E"]);
        let r = dijkstra_path(
            &g,
            g.start().unwrap(),
            Point::new(5, 5),
            &mut |_| {},
            &Pacing::unpaced(),
        );
        assert_eq!(r, PathResult::NotFound);
    }
}
