//! The [`Grid`] type — a fixed-size matrix of [`Cell`]s with one Start and
//! one End.
//!
//! A `Grid` owns its storage; cloning yields an independent copy. Workers
//! running a search or a maze generation operate on such a copy and report
//! their progress as events, which the owner of the visible grid applies with
//! [`apply_search`](Grid::apply_search) and [`apply_maze`](Grid::apply_maze).

use crate::cell::{Cell, CellKind};
use crate::error::{GridError, MoveRejection};
use crate::geom::{Point, Range};
use crate::outcome::{MazeEvent, PathResult, SearchEvent};

/// Rows of the grid shown by the visualizer.
pub const DEFAULT_ROWS: i32 = 21;
/// Columns of the grid shown by the visualizer.
pub const DEFAULT_COLS: i32 = 59;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × cols` matrix of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    start: Option<Point>,
    end: Option<Point>,
    /// Cell most recently passed to [`mark_examining`](Grid::mark_examining).
    current: Option<Point>,
}

impl Grid {
    /// Create a new grid with Start at `(rows/2, cols/4)` and End at
    /// `(rows/2, 3*cols/4)`.
    ///
    /// Fails if a dimension is not positive or the grid is too narrow for the
    /// two default endpoints to be distinct.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let (start, end) = Self::default_endpoints(rows, cols);
        if start == end {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let bounds = Range::with_size(rows, cols);
        let mut grid = Self {
            cells: vec![Cell::EMPTY; bounds.len()],
            bounds,
            start: None,
            end: None,
            current: None,
        };
        grid.place_defaults();
        Ok(grid)
    }

    /// The default Start/End positions for the given dimensions.
    pub const fn default_endpoints(rows: i32, cols: i32) -> (Point, Point) {
        (
            Point::new(rows / 2, cols / 4),
            // 3 * cols / 4 without overflowing for wide grids.
            Point::new(rows / 2, cols / 4 * 3 + cols % 4 * 3 / 4),
        )
    }

    /// Reset every cell and put Start and End back at their defaults.
    pub fn clear(&mut self) {
        self.reset_all();
        self.place_defaults();
    }

    fn place_defaults(&mut self) {
        let (start, end) = Self::default_endpoints(self.rows(), self.cols());
        self.set_kind(start, CellKind::Start);
        self.set_kind(end, CellKind::End);
        self.start = Some(start);
        self.end = Some(end);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// The kind at `p`, or `None` if out of bounds.
    #[inline]
    pub fn kind(&self, p: Point) -> Option<CellKind> {
        self.at(p).map(|c| c.kind)
    }

    /// Whether `p` is in bounds and a wall.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.at(p).is_some_and(Cell::is_wall)
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// The cell currently being examined by the running search, if any.
    #[inline]
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// Number of cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// The in-bounds axis-aligned neighbours of `p` (up, down, left, right).
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.contains(n))
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.bounds.index(p).map(|i| &mut self.cells[i])
    }

    fn set_kind(&mut self, p: Point, kind: CellKind) {
        if let Some(c) = self.cell_mut(p) {
            *c = Cell::EMPTY.with_kind(kind);
        }
    }

    /// Turn `p` into a wall. Endpoints and out-of-bounds points are left
    /// alone; returns whether the cell changed.
    pub fn set_wall(&mut self, p: Point) -> bool {
        match self.cell_mut(p) {
            Some(c) if !c.is_endpoint() => {
                let changed = *c != Cell::WALL;
                *c = Cell::WALL;
                changed
            }
            _ => false,
        }
    }

    /// Clear `p` to an unmarked empty cell, whatever it held before.
    ///
    /// Resetting an endpoint unsets it; the caller has to place a new one.
    pub fn reset(&mut self, p: Point) {
        let Some(c) = self.cell_mut(p) else {
            return;
        };
        *c = Cell::EMPTY;
        if self.start == Some(p) {
            self.start = None;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        if self.current == Some(p) {
            self.current = None;
        }
    }

    /// Clear every cell and unset both endpoints.
    pub fn reset_all(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.start = None;
        self.end = None;
        self.current = None;
    }

    /// Turn every cell into a wall, unsetting both endpoints.
    pub fn fill_walls(&mut self) {
        self.cells.fill(Cell::WALL);
        self.start = None;
        self.end = None;
        self.current = None;
    }

    /// Erase the marks of a previous search, keeping walls and endpoints.
    pub fn clear_search(&mut self) {
        for c in self.cells.iter_mut() {
            c.clear_marks();
        }
        self.current = None;
    }

    /// Move Start to `to`.
    pub fn move_start(&mut self, to: Point) -> Result<(), GridError> {
        self.move_endpoint(to, CellKind::Start)
    }

    /// Move End to `to`.
    pub fn move_end(&mut self, to: Point) -> Result<(), GridError> {
        self.move_endpoint(to, CellKind::End)
    }

    fn move_endpoint(&mut self, to: Point, kind: CellKind) -> Result<(), GridError> {
        let (own, other) = match kind {
            CellKind::Start => (self.start, self.end),
            _ => (self.end, self.start),
        };
        let cell = self.at(to).ok_or(GridError::OutOfBounds(to))?;
        if own == Some(to) {
            return Ok(());
        }
        if other == Some(to) {
            return Err(GridError::InvalidEndpointMove {
                to,
                reason: MoveRejection::OtherEndpoint,
            });
        }
        if cell.is_wall() {
            return Err(GridError::InvalidEndpointMove {
                to,
                reason: MoveRejection::Wall,
            });
        }
        if let Some(old) = own {
            self.set_kind(old, CellKind::Empty);
        }
        self.set_kind(to, kind);
        match kind {
            CellKind::Start => self.start = Some(to),
            _ => self.end = Some(to),
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Search marks
    // -----------------------------------------------------------------------

    /// Make `p` the cell being examined.
    ///
    /// The previously examined cell becomes visited first. Endpoints never
    /// receive marks.
    pub fn mark_examining(&mut self, p: Point) {
        if let Some(prev) = self.current.take() {
            if let Some(c) = self.cell_mut(prev) {
                if !c.is_endpoint() {
                    c.frontier = false;
                    c.visited = true;
                }
            }
        }
        if let Some(c) = self.cell_mut(p) {
            if !c.is_endpoint() {
                c.frontier = true;
                c.visited = false;
            }
            self.current = Some(p);
        }
    }

    /// Mark `p` as part of the found path. Endpoints are left alone.
    pub fn mark_path(&mut self, p: Point) {
        if let Some(c) = self.cell_mut(p) {
            if !c.is_endpoint() {
                c.on_path = true;
            }
        }
    }

    /// Apply an event reported by a search worker.
    pub fn apply_search(&mut self, ev: &SearchEvent) {
        match ev {
            SearchEvent::Step(p) => self.mark_examining(*p),
            SearchEvent::Finished(Ok(PathResult::Found(path))) => {
                for &p in path {
                    self.mark_path(p);
                }
            }
            SearchEvent::Finished(_) => {}
        }
    }

    /// Apply an event reported by a maze worker.
    ///
    /// Fails if `Done` names an endpoint that the replayed events never
    /// carved, which means the stream is out of sync with the worker's grid.
    pub fn apply_maze(&mut self, ev: &MazeEvent) -> Result<(), GridError> {
        match *ev {
            MazeEvent::Filled => self.fill_walls(),
            MazeEvent::Carve(p) => self.reset(p),
            MazeEvent::Done { start, end } => {
                self.move_start(start)?;
                self.move_end(end)?;
            }
            MazeEvent::Cancelled => {}
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// A set of cell changes (a diff frame) plus the status line, if it changed.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub rows: i32,
    pub cols: i32,
    pub status: Option<String>,
}

/// Compute the difference between two same-sized grids.
///
/// With no previous grid every cell is reported.
pub fn compute_frame(prev: Option<&Grid>, curr: &Grid) -> Frame {
    let cells = curr
        .iter()
        .filter(|&(p, c)| prev.is_none_or(|g| g.at(p) != Some(c)))
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        rows: curr.rows(),
        cols: curr.cols(),
        status: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: i32, cols: i32) -> Grid {
        Grid::new(rows, cols).unwrap()
    }

    #[test]
    fn new_places_default_endpoints() {
        let g = grid(21, 59);
        assert_eq!(g.start(), Some(Point::new(10, 14)));
        assert_eq!(g.end(), Some(Point::new(10, 44)));
        assert_eq!(g.kind(Point::new(10, 14)), Some(CellKind::Start));
        assert_eq!(g.kind(Point::new(10, 44)), Some(CellKind::End));
        assert_eq!(g.count(CellKind::Start), 1);
        assert_eq!(g.count(CellKind::End), 1);
    }

    #[test]
    fn new_rejects_degenerate_dimensions() {
        assert!(matches!(
            Grid::new(0, 10),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Grid::new(5, 1),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert!(Grid::new(1, 2).is_ok());
    }

    #[test]
    fn default_endpoints_on_extreme_widths() {
        for cols in [1, 2, 3, 4, 5, 7, 59, 1000] {
            let (_, end) = Grid::default_endpoints(5, cols);
            assert_eq!(end.col, 3 * cols / 4, "cols = {cols}");
        }
        let (start, end) = Grid::default_endpoints(1, i32::MAX);
        assert_eq!(start.col, i32::MAX / 4);
        assert_eq!(end.col, ((i32::MAX as i64) * 3 / 4) as i32);
    }

    #[test]
    fn set_wall_skips_endpoints() {
        let mut g = grid(5, 5);
        let s = g.start().unwrap();
        assert!(!g.set_wall(s));
        assert_eq!(g.kind(s), Some(CellKind::Start));
        assert!(g.set_wall(Point::new(0, 0)));
        assert!(!g.set_wall(Point::new(0, 0)));
        assert!(g.is_wall(Point::new(0, 0)));
        assert!(!g.set_wall(Point::new(9, 9)));
    }

    #[test]
    fn reset_unsets_endpoint() {
        let mut g = grid(5, 5);
        let s = g.start().unwrap();
        g.reset(s);
        assert_eq!(g.start(), None);
        assert_eq!(g.kind(s), Some(CellKind::Empty));
    }

    #[test]
    fn reset_all_is_idempotent() {
        let mut g = grid(5, 5);
        g.set_wall(Point::new(0, 0));
        g.mark_examining(Point::new(1, 1));
        g.reset_all();
        let once = g.clone();
        g.reset_all();
        assert_eq!(g, once);
        assert!(g.iter().all(|(_, c)| c == Cell::EMPTY));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }

    #[test]
    fn move_start_onto_wall_is_rejected() {
        let mut g = grid(5, 5);
        let before = g.start();
        g.set_wall(Point::new(0, 0));
        let err = g.move_start(Point::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidEndpointMove {
                to: Point::new(0, 0),
                reason: MoveRejection::Wall
            }
        );
        assert_eq!(g.start(), before);
        assert!(g.is_wall(Point::new(0, 0)));
    }

    #[test]
    fn move_onto_other_endpoint_is_rejected() {
        let mut g = grid(5, 5);
        let end = g.end().unwrap();
        assert!(matches!(
            g.move_start(end),
            Err(GridError::InvalidEndpointMove {
                reason: MoveRejection::OtherEndpoint,
                ..
            })
        ));
        assert!(matches!(
            g.move_end(Point::new(7, 7)),
            Err(GridError::OutOfBounds(_))
        ));
    }

    #[test]
    fn move_end_clears_old_cell() {
        let mut g = grid(5, 5);
        let old = g.end().unwrap();
        g.move_end(Point::new(4, 4)).unwrap();
        assert_eq!(g.kind(old), Some(CellKind::Empty));
        assert_eq!(g.kind(Point::new(4, 4)), Some(CellKind::End));
        assert_eq!(g.count(CellKind::End), 1);
    }

    #[test]
    fn move_reestablishes_after_reset_all() {
        let mut g = grid(5, 5);
        g.reset_all();
        g.move_start(Point::new(0, 0)).unwrap();
        g.move_end(Point::new(4, 4)).unwrap();
        assert_eq!(g.count(CellKind::Start), 1);
        assert_eq!(g.count(CellKind::End), 1);
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let g = grid(3, 3);
        let corner: Vec<Point> = g.neighbors(Point::new(0, 0)).collect();
        assert_eq!(corner, vec![Point::new(1, 0), Point::new(0, 1)]);
        assert_eq!(g.neighbors(Point::new(1, 1)).count(), 4);
    }

    #[test]
    fn mark_examining_visits_previous() {
        let mut g = grid(5, 5);
        g.mark_examining(Point::new(0, 0));
        assert!(g.at(Point::new(0, 0)).unwrap().frontier);
        g.mark_examining(Point::new(0, 1));
        let prev = g.at(Point::new(0, 0)).unwrap();
        assert!(prev.visited && !prev.frontier);
        let cur = g.at(Point::new(0, 1)).unwrap();
        assert!(cur.frontier && !cur.visited);
        assert_eq!(g.current(), Some(Point::new(0, 1)));
    }

    #[test]
    fn endpoints_never_get_marks() {
        let mut g = grid(5, 5);
        let s = g.start().unwrap();
        g.mark_examining(s);
        g.mark_examining(Point::new(0, 0));
        g.mark_path(s);
        assert!(!g.at(s).unwrap().is_marked());
    }

    #[test]
    fn clear_search_keeps_walls_and_endpoints() {
        let mut g = grid(5, 5);
        g.set_wall(Point::new(0, 0));
        g.mark_examining(Point::new(4, 4));
        g.mark_examining(Point::new(3, 4));
        g.mark_path(Point::new(4, 4));
        g.clear_search();
        assert!(g.iter().all(|(_, c)| !c.is_marked()));
        assert!(g.is_wall(Point::new(0, 0)));
        assert!(g.start().is_some() && g.end().is_some());
        assert_eq!(g.current(), None);
    }

    #[test]
    fn apply_search_marks_path() {
        let mut g = grid(3, 5);
        let path = vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)];
        g.apply_search(&SearchEvent::Step(Point::new(1, 2)));
        g.apply_search(&SearchEvent::Finished(Ok(PathResult::Found(path))));
        assert!(g.at(Point::new(1, 2)).unwrap().on_path);
        assert!(!g.at(Point::new(1, 1)).unwrap().on_path);
    }

    #[test]
    fn apply_maze_replays_generation() {
        let mut g = grid(5, 5);
        g.apply_maze(&MazeEvent::Filled).unwrap();
        assert_eq!(g.count(CellKind::Wall), 25);
        g.apply_maze(&MazeEvent::Carve(Point::new(1, 1))).unwrap();
        g.apply_maze(&MazeEvent::Carve(Point::new(1, 2))).unwrap();
        g.apply_maze(&MazeEvent::Carve(Point::new(1, 3))).unwrap();
        g.apply_maze(&MazeEvent::Done {
            start: Point::new(1, 1),
            end: Point::new(1, 3),
        })
        .unwrap();
        assert_eq!(g.start(), Some(Point::new(1, 1)));
        assert_eq!(g.end(), Some(Point::new(1, 3)));
        assert_eq!(g.count(CellKind::Empty), 1);
    }

    #[test]
    fn apply_maze_reports_desynced_done() {
        let mut g = grid(5, 5);
        g.apply_maze(&MazeEvent::Filled).unwrap();
        g.apply_maze(&MazeEvent::Carve(Point::new(1, 1))).unwrap();
        let err = g
            .apply_maze(&MazeEvent::Done {
                start: Point::new(1, 1),
                end: Point::new(3, 3),
            })
            .unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidEndpointMove {
                to: Point::new(3, 3),
                reason: MoveRejection::Wall,
            }
        );
        assert_eq!(g.end(), None);
    }

    #[test]
    fn compute_frame_diff() {
        let a = grid(3, 4);
        let mut b = a.clone();
        b.set_wall(Point::new(0, 3));
        let frame = compute_frame(Some(&a), &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(0, 3));
        assert!(frame.cells[0].cell.is_wall());

        let full = compute_frame(None, &b);
        assert_eq!(full.cells.len(), 12);
        assert_eq!((full.rows, full.cols), (3, 4));
    }
}
