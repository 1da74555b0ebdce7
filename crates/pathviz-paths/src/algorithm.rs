use std::fmt;
use std::str::FromStr;

use pathviz_core::{PathResult, Point, SearchError};

use crate::astar::astar_path;
use crate::bfs::bfs_path;
use crate::dfs::dfs_path;
use crate::dijkstra::dijkstra_path;
use crate::greedy::greedy_path;
use crate::run::{Pacing, StepObserver};
use crate::traits::HeuristicPather;

/// The search strategies the visualizer can run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    #[cfg_attr(feature = "serde", serde(rename = "A*"))]
    AStar,
    BreadthFirst,
    DepthFirst,
    GreedyBestFirst,
}

impl Algorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Algorithm; 5] = [
        Self::Dijkstra,
        Self::AStar,
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::GreedyBestFirst,
    ];

    /// The configuration name, matched exactly by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
            Self::BreadthFirst => "BreadthFirst",
            Self::DepthFirst => "DepthFirst",
            Self::GreedyBestFirst => "GreedyBestFirst",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
            Self::BreadthFirst => "Breadth First",
            Self::DepthFirst => "Depth First",
            Self::GreedyBestFirst => "Greedy Best First",
        }
    }

    /// Whether the algorithm always returns a shortest path.
    pub const fn is_optimal(self) -> bool {
        matches!(self, Self::Dijkstra | Self::AStar | Self::BreadthFirst)
    }

    /// The next algorithm in menu order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// The previous algorithm in menu order, wrapping around.
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Run this algorithm from `from` to `to`.
    pub fn find_path<P: HeuristicPather, O: StepObserver>(
        self,
        pather: &P,
        from: Point,
        to: Point,
        observer: &mut O,
        pacing: &Pacing,
    ) -> PathResult {
        match self {
            Self::Dijkstra => dijkstra_path(pather, from, to, observer, pacing),
            Self::AStar => astar_path(pather, from, to, observer, pacing),
            Self::BreadthFirst => bfs_path(pather, from, to, observer, pacing),
            Self::DepthFirst => dfs_path(pather, from, to, observer, pacing),
            Self::GreedyBestFirst => greedy_path(pather, from, to, observer, pacing),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| SearchError::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_names() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
    }

    #[test]
    fn rejects_unknown_and_miscased_names() {
        for bad in ["dijkstra", "BFS", "Breadth First", "", "A"] {
            assert_eq!(
                bad.parse::<Algorithm>(),
                Err(SearchError::UnknownAlgorithm(bad.to_string()))
            );
        }
    }

    #[test]
    fn next_and_prev_cycle() {
        assert_eq!(Algorithm::Dijkstra.next(), Algorithm::AStar);
        assert_eq!(Algorithm::GreedyBestFirst.next(), Algorithm::Dijkstra);
        assert_eq!(Algorithm::Dijkstra.prev(), Algorithm::GreedyBestFirst);
        for a in Algorithm::ALL {
            assert_eq!(a.next().prev(), a);
        }
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Algorithm::BreadthFirst.to_string(), "BreadthFirst");
        assert_eq!(Algorithm::BreadthFirst.label(), "Breadth First");
    }
}
