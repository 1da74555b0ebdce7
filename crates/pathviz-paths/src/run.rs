//! Bookkeeping shared by every search: step notification, pacing,
//! cancellation and the parent table used to rebuild the path.

use std::time::Duration;

use pathviz_core::{Context, Point, Range};

/// Receives every cell popped from the frontier, in pop order.
pub trait StepObserver {
    fn on_step(&mut self, p: Point);
}

impl<F: FnMut(Point)> StepObserver for F {
    #[inline]
    fn on_step(&mut self, p: Point) {
        self(p)
    }
}

/// Cancellation flag and inter-step delay of one run.
#[derive(Clone, Debug, Default)]
pub struct Pacing {
    pub ctx: Context,
    pub delay: Duration,
}

impl Pacing {
    pub fn new(ctx: Context, delay: Duration) -> Self {
        Self { ctx, delay }
    }

    /// No delay, with a fresh context nobody else can cancel.
    pub fn unpaced() -> Self {
        Self::default()
    }
}

const NO_PARENT: usize = usize::MAX;

/// Per-run state common to all algorithms. Cells are addressed by their flat
/// index inside `rng`.
pub(crate) struct SearchRun<'a, O: StepObserver> {
    rng: Range,
    parents: Vec<usize>,
    observer: &'a mut O,
    pacing: &'a Pacing,
    nbuf: Vec<Point>,
}

impl<'a, O: StepObserver> SearchRun<'a, O> {
    pub(crate) fn new(rng: Range, observer: &'a mut O, pacing: &'a Pacing) -> Self {
        Self {
            rng,
            parents: vec![NO_PARENT; rng.len()],
            observer,
            pacing,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Number of cells in the searched area.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.parents.len()
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.rng.index(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.rng.point(idx)
    }

    #[inline]
    pub(crate) fn cancelled(&self) -> bool {
        self.pacing.ctx.is_done()
    }

    /// Report `idx` as the cell now being examined.
    #[inline]
    pub(crate) fn examine(&mut self, idx: usize) {
        let p = self.point(idx);
        self.observer.on_step(p);
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, child: usize, parent: usize) {
        self.parents[child] = parent;
    }

    /// Indices of the in-range traversable neighbours of `idx`.
    pub(crate) fn expand<P: crate::Pather>(&mut self, pather: &P, idx: usize) -> Vec<usize> {
        let p = self.point(idx);
        self.nbuf.clear();
        pather.neighbors(p, &mut self.nbuf);
        self.nbuf.iter().filter_map(|&n| self.rng.index(n)).collect()
    }

    /// Wait the inter-step delay. Returns early on cancellation; the caller
    /// checks the flag at the top of its next iteration.
    #[inline]
    pub(crate) fn pause(&self) {
        self.pacing.ctx.pause(self.pacing.delay);
    }

    /// Walk parent links from `goal` back to `start`.
    pub(crate) fn path(&self, start: usize, goal: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != start && ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.parents[ci];
        }
        path.push(self.point(start));
        path.reverse();
        path
    }
}
