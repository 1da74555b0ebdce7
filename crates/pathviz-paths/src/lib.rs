//! Stepwise, cancellable search algorithms on a [`Grid`](pathviz_core::Grid).
//!
//! Every search reports each cell it pops from its frontier through a
//! [`StepObserver`], may pause between steps, and stops as soon as its
//! [`Context`](pathviz_core::Context) is cancelled:
//!
//! - **Dijkstra** ([`dijkstra_path`]), uniform cost, shortest path
//! - **A\*** ([`astar_path`]), Manhattan heuristic, shortest path
//! - **Breadth first** ([`bfs_path`]), shortest path
//! - **Depth first** ([`dfs_path`]), any path
//! - **Greedy best first** ([`greedy_path`]), any path
//!
//! The [`driver`] module wraps them: it checks the endpoints, clears stale
//! marks, dispatches on [`Algorithm`] and leaves the grid in its final
//! visual state.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS, Dijkstra |
//! | [`HeuristicPather`] : [`Pather`] | A*, greedy best first |

mod algorithm;
mod astar;
mod bfs;
mod config;
mod dfs;
mod dijkstra;
mod distance;
pub mod driver;
mod frontier;
mod greedy;
mod run;
mod traits;

#[cfg(test)]
mod testutil;

pub use algorithm::Algorithm;
pub use astar::astar_path;
pub use bfs::bfs_path;
pub use config::{SearchConfig, Speed};
pub use dfs::dfs_path;
pub use dijkstra::dijkstra_path;
pub use distance::manhattan;
pub use driver::{run, run_detached, run_search, spawn_search};
pub use greedy::greedy_path;
pub use run::{Pacing, StepObserver};
pub use traits::{HeuristicPather, Pather};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn algorithm_uses_config_names() {
        assert_eq!(serde_json::to_string(&Algorithm::AStar).unwrap(), r#""A*""#);
        let a: Algorithm = serde_json::from_str(r#""GreedyBestFirst""#).unwrap();
        assert_eq!(a, Algorithm::GreedyBestFirst);
    }
}
