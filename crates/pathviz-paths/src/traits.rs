use pathviz_core::{Grid, Point, Range};

use crate::distance::manhattan;

/// Minimal search interface — the searchable area and neighbour enumeration.
pub trait Pather {
    /// The rectangle every searched point lies in.
    fn bounds(&self) -> Range;

    /// Append the traversable neighbours of `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with a heuristic, for A* and greedy best-first.
pub trait HeuristicPather: Pather {
    /// Estimate of the number of steps from `from` to `to`.
    /// Must never overestimate for A* to stay optimal.
    fn estimate(&self, from: Point, to: Point) -> i32;
}

impl Pather for Grid {
    fn bounds(&self) -> Range {
        Grid::bounds(self)
    }

    /// Non-wall neighbours, in the order up, down, left, right.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(Grid::neighbors(self, p).filter(|&n| !self.is_wall(n)));
    }
}

impl HeuristicPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
