//! The interactive visualizer model shared by the `pathviz` binary.
//!
//! [`Visualizer`] owns the displayed grid. Searches and maze generations run
//! as [`Effect::Sub`] workers over a copy of it and stream their progress
//! back as [`Msg::Search`] / [`Msg::Maze`], which are replayed onto the
//! displayed grid here.

use pathviz_core::{
    Context, Grid, Key, MazeEvent, Model, MouseAction, Msg, PathResult, Point, SearchEvent,
    app::{Effect, sub},
};
use pathviz_maze::{MazeConfig, MazeGen, check_dimensions};
use pathviz_paths::{Algorithm, SearchConfig, Speed, run_detached};

const HELP: &str = "Enter run  x stop  Tab algo  s speed  g maze  c clear  q quit";

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// What the background worker, if any, is doing.
#[derive(Clone, Debug)]
enum Activity {
    Idle,
    Searching(Run),
    Generating(Run),
}

/// A worker in flight.
#[derive(Clone, Debug)]
struct Run {
    ctx: Context,
    /// Set when the grid was cleared under the worker: its remaining events
    /// are dropped until it reports its end.
    stale: bool,
}

impl Run {
    fn new() -> Self {
        Self {
            ctx: Context::new(),
            stale: false,
        }
    }
}

/// What a held mouse button is doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Drag {
    Start,
    End,
    Draw,
    Erase,
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

pub struct Visualizer {
    grid: Grid,
    algorithm: Algorithm,
    speed: Speed,
    maze_config: MazeConfig,
    activity: Activity,
    drag: Option<Drag>,
    /// Left-click drawing is off while a generated maze is shown.
    maze_generated: bool,
    message: Option<String>,
}

impl Visualizer {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            algorithm: Algorithm::default(),
            speed: Speed::default(),
            maze_config: MazeConfig::default(),
            activity: Activity::Idle,
            drag: None,
            maze_generated: false,
            message: None,
        }
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_maze_config(mut self, config: MazeConfig) -> Self {
        self.maze_config = config;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Outcome of the last search or maze, if it is still shown.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether a search or maze generation is in flight.
    pub fn is_busy(&self) -> bool {
        !matches!(self.activity, Activity::Idle)
    }

    fn start_search(&mut self) -> Option<Effect> {
        if self.is_busy() {
            return None;
        }
        if self.grid.start().is_none() || self.grid.end().is_none() {
            self.message = Some("Place a start and an end first.".into());
            return None;
        }
        self.message = None;
        self.grid.clear_search();
        let run = Run::new();
        let worker_ctx = run.ctx.clone();
        self.activity = Activity::Searching(run);

        let grid = self.grid.clone();
        let config = SearchConfig::new(self.algorithm).with_speed(self.speed);
        Some(sub(move |app_ctx, tx| {
            let ctx = worker_ctx.linked(&app_ctx);
            // The outcome also arrives as the final event.
            let _ = run_detached(grid, &config, &ctx, |ev| {
                tx.send(Msg::Search(ev)).ok();
            });
        }))
    }

    fn start_maze(&mut self) -> Option<Effect> {
        if self.is_busy() {
            return None;
        }
        if let Err(e) = check_dimensions(self.grid.rows(), self.grid.cols()) {
            self.message = Some(e.to_string());
            return None;
        }
        self.message = None;
        let run = Run::new();
        let worker_ctx = run.ctx.clone();
        self.activity = Activity::Generating(run);

        let mut grid = self.grid.clone();
        let config = self.maze_config.clone();
        Some(sub(move |app_ctx, tx| {
            let ctx = worker_ctx.linked(&app_ctx);
            let _ = MazeGen::new()
                .with_config(config)
                .backtracker(&mut grid, &ctx, |ev| {
                    tx.send(Msg::Maze(ev)).ok();
                });
        }))
    }

    /// Cancel the worker. With `discard`, events it still sends are dropped.
    fn stop(&mut self, discard: bool) {
        match &mut self.activity {
            Activity::Idle => {}
            Activity::Searching(run) | Activity::Generating(run) => {
                run.ctx.cancel();
                run.stale |= discard;
            }
        }
    }

    /// Wipe the grid back to its defaults, stopping any worker.
    fn clear(&mut self) {
        self.stop(true);
        self.grid.clear();
        self.maze_generated = false;
        self.message = None;
        self.drag = None;
    }

    fn on_search(&mut self, ev: SearchEvent) {
        let Activity::Searching(run) = &self.activity else {
            return;
        };
        let stale = run.stale;
        if !stale {
            self.grid.apply_search(&ev);
        }
        let SearchEvent::Finished(result) = ev else {
            return;
        };
        self.activity = Activity::Idle;
        if stale {
            return;
        }
        self.message = match result {
            Ok(PathResult::Found(path)) => Some(format!(
                "{}: path of {} steps.",
                self.algorithm.label(),
                path.len().saturating_sub(1)
            )),
            Ok(PathResult::NotFound) => Some("No path found.".into()),
            Ok(PathResult::Cancelled) => None,
            Err(e) => Some(e.to_string()),
        };
    }

    fn on_maze(&mut self, ev: MazeEvent) {
        let Activity::Generating(run) = &self.activity else {
            return;
        };
        let mut stale = run.stale;
        if !stale {
            if let Err(e) = self.grid.apply_maze(&ev) {
                self.message = Some(e.to_string());
                self.grid.clear();
                self.stop(true);
                stale = true;
            }
        }
        match ev {
            MazeEvent::Done { .. } => {
                self.activity = Activity::Idle;
                if !stale {
                    self.maze_generated = true;
                }
            }
            MazeEvent::Cancelled => {
                self.activity = Activity::Idle;
                if !stale {
                    // A half-carved maze has no endpoints.
                    self.grid.clear();
                }
            }
            MazeEvent::Filled | MazeEvent::Carve(_) => {}
        }
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Enter | Key::Space => return self.start_search(),
            Key::Char('g') => return self.start_maze(),
            Key::Char('x') => self.stop(false),
            Key::Char('c') => self.clear(),
            Key::Tab => self.algorithm = self.algorithm.next(),
            Key::BackTab => self.algorithm = self.algorithm.prev(),
            Key::Char('s') => self.speed = self.speed.next(),
            Key::Char(c @ '1'..='5') => {
                let i = c as usize - '1' as usize;
                self.algorithm = Algorithm::ALL[i];
            }
            _ => {}
        }
        None
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Point) {
        if self.is_busy() {
            return;
        }
        match action {
            MouseAction::Main => {
                self.drag = if self.grid.start() == Some(pos) {
                    Some(Drag::Start)
                } else if self.grid.end() == Some(pos) {
                    Some(Drag::End)
                } else if !self.maze_generated {
                    self.grid.set_wall(pos);
                    Some(Drag::Draw)
                } else {
                    None
                };
            }
            MouseAction::Secondary => {
                self.erase(pos);
                self.drag = Some(Drag::Erase);
            }
            MouseAction::DragMain | MouseAction::DragSecondary => match self.drag {
                // A rejected move leaves the endpoint where it was.
                Some(Drag::Start) => {
                    let _ = self.grid.move_start(pos);
                }
                Some(Drag::End) => {
                    let _ = self.grid.move_end(pos);
                }
                Some(Drag::Draw) => {
                    self.grid.set_wall(pos);
                }
                Some(Drag::Erase) => self.erase(pos),
                None => {}
            },
            MouseAction::Release => self.drag = None,
        }
    }

    fn erase(&mut self, pos: Point) {
        if self.grid.is_wall(pos) {
            self.grid.reset(pos);
        }
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { key, .. } => self.on_key(key),
            Msg::Mouse { action, pos } => {
                self.on_mouse(action, pos);
                None
            }
            Msg::Search(ev) => {
                self.on_search(ev);
                None
            }
            Msg::Maze(ev) => {
                self.on_maze(ev);
                None
            }
        }
    }

    fn view(&self) -> &Grid {
        &self.grid
    }

    fn status(&self) -> String {
        let tail = match &self.activity {
            Activity::Searching(_) => "Searching...",
            Activity::Generating(_) => "Generating maze...",
            Activity::Idle => self.message.as_deref().unwrap_or(HELP),
        };
        format!(
            "{} | {} | {}",
            self.algorithm.label(),
            self.speed.label(),
            tail
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::CellKind;
    use std::sync::mpsc;
    use std::time::Duration;

    fn small() -> Visualizer {
        Visualizer::new(Grid::new(5, 9).unwrap())
            .with_speed(Speed::Fast)
            .with_maze_config(MazeConfig::unpaced())
    }

    /// Run a subscription to completion on this thread, feeding everything
    /// it sends back into the model.
    fn drive(model: &mut Visualizer, effect: Option<Effect>) -> Vec<Msg> {
        let f = match effect {
            Some(Effect::Sub(f)) => f,
            other => panic!("expected a subscription, got {other:?}"),
        };
        let (tx, rx) = mpsc::channel();
        f(Context::new(), tx);
        let msgs: Vec<Msg> = rx.try_iter().collect();
        for m in msgs.clone() {
            assert!(model.update(m).is_none());
        }
        msgs
    }

    fn key(c: char) -> Msg {
        Msg::key(Key::Char(c))
    }

    #[test]
    fn search_runs_and_reports_path() {
        let mut v = small();
        let effect = v.update(Msg::key(Key::Enter));
        assert!(v.is_busy());
        assert!(v.status().contains("Searching"));
        // Triggers are ignored while a run is in flight.
        assert!(v.update(Msg::key(Key::Space)).is_none());

        drive(&mut v, effect);
        assert!(!v.is_busy());
        // Default endpoints are (2, 2) and (2, 6).
        assert_eq!(v.message(), Some("Dijkstra: path of 4 steps."));
        let on_path = v.grid().iter().filter(|(_, c)| c.on_path).count();
        assert_eq!(on_path, 3);
    }

    #[test]
    fn no_path_is_reported() {
        let mut v = small();
        for r in 0..5 {
            v.update(Msg::mouse(MouseAction::Main, Point::new(r, 4)));
            v.update(Msg::mouse(MouseAction::Release, Point::new(r, 4)));
        }
        let effect = v.update(Msg::key(Key::Space));
        drive(&mut v, effect);
        assert_eq!(v.message(), Some("No path found."));
        assert!(v.status().ends_with("No path found."));
    }

    #[test]
    fn algorithm_and_speed_selection() {
        let mut v = small();
        assert_eq!(v.algorithm(), Algorithm::Dijkstra);
        v.update(Msg::key(Key::Tab));
        assert_eq!(v.algorithm(), Algorithm::Dijkstra.next());
        v.update(Msg::key(Key::BackTab));
        assert_eq!(v.algorithm(), Algorithm::Dijkstra);
        v.update(key('4'));
        assert_eq!(v.algorithm(), Algorithm::ALL[3]);
        v.update(key('9'));
        assert_eq!(v.algorithm(), Algorithm::ALL[3]);

        assert_eq!(v.speed(), Speed::Fast);
        v.update(key('s'));
        assert_eq!(v.speed(), Speed::Slow);
        assert!(v.status().contains(Algorithm::ALL[3].label()));
        assert!(v.status().contains("Slow"));
    }

    #[test]
    fn drawing_erasing_and_dragging() {
        let mut v = small();
        v.update(Msg::mouse(MouseAction::Main, Point::new(0, 0)));
        v.update(Msg::mouse(MouseAction::DragMain, Point::new(0, 1)));
        v.update(Msg::mouse(MouseAction::Release, Point::new(0, 1)));
        assert!(v.grid().is_wall(Point::new(0, 0)));
        assert!(v.grid().is_wall(Point::new(0, 1)));

        v.update(Msg::mouse(MouseAction::Secondary, Point::new(0, 0)));
        v.update(Msg::mouse(MouseAction::Release, Point::new(0, 0)));
        assert!(!v.grid().is_wall(Point::new(0, 0)));

        // Drag Start around; a wall stops it, the grid edge is ignored.
        let start = v.grid().start().unwrap();
        v.update(Msg::mouse(MouseAction::Main, start));
        v.update(Msg::mouse(MouseAction::DragMain, Point::new(1, 1)));
        v.update(Msg::mouse(MouseAction::DragMain, Point::new(0, 1)));
        v.update(Msg::mouse(MouseAction::DragMain, Point::new(-1, 1)));
        v.update(Msg::mouse(MouseAction::Release, Point::new(-1, 1)));
        assert_eq!(v.grid().start(), Some(Point::new(1, 1)));
        assert_eq!(v.grid().count(CellKind::Start), 1);

        // Right-clicking an endpoint does not remove it.
        v.update(Msg::mouse(MouseAction::Secondary, Point::new(1, 1)));
        assert_eq!(v.grid().start(), Some(Point::new(1, 1)));
    }

    #[test]
    fn maze_disables_drawing_until_clear() {
        let mut v = small();
        let effect = v.update(key('g'));
        assert!(v.is_busy());
        let msgs = drive(&mut v, effect);
        assert!(matches!(msgs.first(), Some(Msg::Maze(MazeEvent::Filled))));
        assert!(!v.is_busy());
        assert_eq!(v.grid().start(), Some(Point::new(1, 1)));
        assert_eq!(v.grid().end(), Some(Point::new(3, 7)));

        // The first passage out of Start is (1, 2) or (2, 1).
        let target = [Point::new(1, 2), Point::new(2, 1)]
            .into_iter()
            .find(|&p| !v.grid().is_wall(p))
            .unwrap();
        v.update(Msg::mouse(MouseAction::Main, target));
        v.update(Msg::mouse(MouseAction::Release, target));
        assert!(!v.grid().is_wall(target));

        // Erasing still works on a maze.
        v.update(Msg::mouse(MouseAction::Secondary, Point::new(0, 0)));
        assert!(!v.grid().is_wall(Point::new(0, 0)));

        v.update(key('c'));
        assert_eq!(v.grid(), &Grid::new(5, 9).unwrap());
        v.update(Msg::mouse(MouseAction::Main, target));
        assert!(v.grid().is_wall(target));
    }

    #[test]
    fn desynced_maze_events_restore_defaults() {
        let mut v = small();
        assert!(v.update(key('g')).is_some());
        v.update(Msg::Maze(MazeEvent::Filled));
        v.update(Msg::Maze(MazeEvent::Carve(Point::new(1, 1))));
        v.update(Msg::Maze(MazeEvent::Done {
            start: Point::new(1, 1),
            end: Point::new(3, 7),
        }));
        assert!(!v.is_busy());
        assert!(v.message().is_some());
        assert_eq!(v.grid(), &Grid::new(5, 9).unwrap());
        // Not a generated maze, so drawing stays enabled.
        v.update(Msg::mouse(MouseAction::Main, Point::new(0, 0)));
        assert!(v.grid().is_wall(Point::new(0, 0)));
    }

    #[test]
    fn maze_needs_odd_dimensions() {
        let mut v = Visualizer::new(Grid::new(6, 9).unwrap());
        assert!(v.update(key('g')).is_none());
        assert!(!v.is_busy());
        assert!(v.message().is_some());
    }

    #[test]
    fn stop_is_silent_and_keeps_marks() {
        let mut v = Visualizer::new(Grid::new(21, 59).unwrap()).with_speed(Speed::Slow);
        let Some(Effect::Sub(f)) = v.update(Msg::key(Key::Enter)) else {
            panic!("expected a search");
        };
        let (tx, rx) = mpsc::channel();
        let app_ctx = Context::new();
        let worker = std::thread::spawn(move || f(app_ctx, tx));

        let first = rx.recv().unwrap();
        v.update(first);
        v.update(key('x'));
        assert!(v.is_busy());
        worker.join().unwrap();
        for m in rx.try_iter() {
            v.update(m);
        }
        assert!(!v.is_busy());
        assert_eq!(v.message(), None);
        assert!(v.status().ends_with(HELP));
        assert!(v.grid().current().is_some());
    }

    #[test]
    fn clear_drops_events_of_cancelled_run() {
        let mut v = Visualizer::new(Grid::new(21, 59).unwrap()).with_speed(Speed::Slow);
        let Some(Effect::Sub(f)) = v.update(Msg::key(Key::Enter)) else {
            panic!("expected a search");
        };
        let (tx, rx) = mpsc::channel();
        let worker = std::thread::spawn(move || f(Context::new(), tx));

        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        v.update(key('c'));
        worker.join().unwrap();
        for m in rx.try_iter() {
            v.update(m);
        }
        assert!(!v.is_busy());
        assert_eq!(v.grid(), &Grid::new(21, 59).unwrap());
        assert!(v.update(Msg::key(Key::Enter)).is_some());
    }

    #[test]
    fn app_cancellation_reaches_the_worker() {
        let mut v = Visualizer::new(Grid::new(21, 59).unwrap()).with_speed(Speed::Slow);
        let Some(Effect::Sub(f)) = v.update(Msg::key(Key::Enter)) else {
            panic!("expected a search");
        };
        let (tx, rx) = mpsc::channel();
        let app_ctx = Context::new();
        app_ctx.cancel();
        f(app_ctx, tx);
        let msgs: Vec<Msg> = rx.try_iter().collect();
        assert!(matches!(
            msgs.as_slice(),
            [Msg::Search(SearchEvent::Finished(Ok(PathResult::Cancelled)))]
        ));
    }

    #[test]
    fn quit_keys() {
        let mut v = small();
        assert!(matches!(v.update(key('q')), Some(Effect::End)));
        assert!(matches!(v.update(Msg::key(Key::Escape)), Some(Effect::End)));
        assert!(matches!(v.update(Msg::Quit), Some(Effect::End)));
    }
}
