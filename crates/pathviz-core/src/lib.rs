//! **pathviz-core** — grid model and application loop for the pathviz search
//! visualizer.
//!
//! This crate provides the foundational types used across the *pathviz*
//! workspace: geometry primitives, cells with their search marks, the
//! [`Grid`], the cooperative cancellation [`Context`], run outcomes and
//! worker events, and the Elm-architecture application loop.

pub mod app;
pub mod cell;
pub mod context;
pub mod error;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod outcome;

pub use app::{App, AppConfig, Cmd, Driver, Effect, Model};
pub use cell::{Cell, CellKind};
pub use context::Context;
pub use error::{GridError, MoveRejection, SearchError};
pub use geom::{Point, Range};
pub use grid::{DEFAULT_COLS, DEFAULT_ROWS, Frame, FrameCell, Grid, compute_frame};
pub use messages::*;
pub use outcome::{MazeEvent, PathResult, SearchEvent};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_round_trip() {
        let p = Point::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"row":3,"col":7}"#);
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn path_result_round_trip() {
        let r = PathResult::Found(vec![Point::new(0, 0), Point::new(0, 1)]);
        let json = serde_json::to_string(&r).unwrap();
        let back: PathResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
