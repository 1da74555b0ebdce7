//! Run outcomes and the events a worker sends to the owner of the visible
//! grid.

use crate::error::SearchError;
use crate::geom::Point;

/// Result of one search run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    /// Cells from start to end, both included.
    Found(Vec<Point>),
    /// The frontier was exhausted without reaching the end.
    NotFound,
    /// The run was stopped before it could finish.
    Cancelled,
}

impl PathResult {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Number of steps (edges) along the found path.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Event emitted by a search running off the presentation thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// A cell was popped from the frontier and is now being examined.
    Step(Point),
    /// The run is over.
    Finished(Result<PathResult, SearchError>),
}

/// Event emitted by a maze generation running off the presentation thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeEvent {
    /// The grid was cleared and every cell turned into a wall.
    Filled,
    /// A cell was opened.
    Carve(Point),
    /// Generation completed and the endpoints were placed.
    Done { start: Point, end: Point },
    /// Generation was stopped before completion.
    Cancelled,
}
