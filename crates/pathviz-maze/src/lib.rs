//! Maze generation for pathviz grids.

pub mod mapgen;

pub use mapgen::{MazeConfig, MazeGen, MazeOutcome, check_dimensions, generate_maze, spawn_maze};
