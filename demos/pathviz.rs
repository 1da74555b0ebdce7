//! Terminal pathfinding visualizer using crossterm.
//!
//! Run: cargo run --bin pathviz

use pathviz_core::{App, AppConfig, DEFAULT_COLS, DEFAULT_ROWS, Grid};
use pathviz_crossterm::CrosstermDriver;
use pathviz_demos::Visualizer;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let grid = Grid::new(DEFAULT_ROWS, DEFAULT_COLS)?;
    let mut app = App::new(AppConfig {
        model: Visualizer::new(grid),
        driver: CrosstermDriver::new(),
    });
    app.run()
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
