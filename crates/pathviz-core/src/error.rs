//! Error types shared across the pathviz crates.

use std::fmt;

use crate::geom::Point;

/// Why an endpoint move was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveRejection {
    /// The target cell is a wall.
    Wall,
    /// The target cell holds the other endpoint.
    OtherEndpoint,
}

/// Errors raised by grid operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// An endpoint move was rejected; the endpoint stays where it was.
    InvalidEndpointMove { to: Point, reason: MoveRejection },
    /// The point lies outside the grid.
    OutOfBounds(Point),
    /// The requested dimensions cannot hold the operation.
    InvalidDimensions { rows: i32, cols: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpointMove { to, reason } => match reason {
                MoveRejection::Wall => write!(f, "cannot move endpoint onto wall at {to}"),
                MoveRejection::OtherEndpoint => {
                    write!(f, "cannot move endpoint onto the other endpoint at {to}")
                }
            },
            Self::OutOfBounds(p) => write!(f, "point {p} is outside the grid"),
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Errors that prevent a search from starting.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchError {
    /// Start or End is not currently placed.
    MissingEndpoints,
    /// The algorithm name does not match any known algorithm.
    UnknownAlgorithm(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints => f.write_str("please set a start and end point"),
            Self::UnknownAlgorithm(name) => write!(
                f,
                "unknown algorithm \u{201c}{name}\u{201d} (expected one of Dijkstra, A*, BreadthFirst, DepthFirst, GreedyBestFirst)"
            ),
        }
    }
}

impl std::error::Error for SearchError {}
