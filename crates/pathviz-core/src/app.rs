//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! Long-running work (a search, a maze generation) is returned from
//! [`Model::update`] as an [`Effect::Sub`]. The app runs it on a worker
//! thread with a [`Sender`] back into the loop, so every visible change
//! reaches the model as a [`Msg`] and is applied on the loop's thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::context::Context;
use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Effect / Cmd
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A one-shot command that produces an optional follow-up message.
    Cmd(Box<dyn FnOnce() -> Option<Msg> + Send>),
    /// A long-running subscription that may send many messages. It receives
    /// the application context, which is cancelled when the app stops.
    Sub(Box<dyn FnOnce(Context, Sender<Msg>) + Send>),
    /// Multiple effects batched together.
    Batch(Vec<Effect>),
    /// Signal the application loop to stop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd(_) => f.write_str("Effect::Cmd(..)"),
            Self::Sub(_) => f.write_str("Effect::Sub(..)"),
            Self::Batch(v) => f.debug_tuple("Effect::Batch").field(&v.len()).finish(),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Convenience constructor for an [`Effect::Cmd`].
pub fn cmd<F>(f: F) -> Effect
where
    F: FnOnce() -> Option<Msg> + Send + 'static,
{
    Effect::Cmd(Box::new(f))
}

/// Convenience constructor for an [`Effect::Sub`].
pub fn sub<F>(f: F) -> Effect
where
    F: FnOnce(Context, Sender<Msg>) + Send + 'static,
{
    Effect::Sub(Box::new(f))
}

/// Convenience type alias.
pub type Cmd = Effect;

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// The grid to display.
    fn view(&self) -> &Grid;

    /// The status line to display under the grid.
    fn status(&self) -> String;
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input messages, sending them through `tx`. Should return
    /// promptly so worker messages get processed.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    workers: Vec<JoinHandle<()>>,
    prev_grid: Option<Grid>,
    prev_status: Option<String>,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            workers: Vec::new(),
            prev_grid: None,
            prev_status: None,
        }
    }

    /// The model, e.g. for inspection after [`run`](App::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Enters the event loop: poll → update → diff → flush.
    /// 4. Stops when the model returns `Effect::End`, then cancels and joins
    ///    every worker.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let result = self.event_loop(&ctx, &tx, &rx);

        ctx.cancel();
        self.driver.close();
        drop(rx);
        join_workers(self.workers.drain(..));
        result
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        rx: &Receiver<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            if self.process_pending(rx, ctx, tx)? {
                return Ok(());
            }
            self.driver.poll_msgs(ctx, tx)?;
            let (finished, running): (Vec<_>, Vec<_>) =
                self.workers.drain(..).partition(|w| w.is_finished());
            self.workers = running;
            join_workers(finished.into_iter());
        }
    }

    /// Drain queued messages, update the model, diff, and flush.
    ///
    /// Returns `true` if the app should stop.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        tx: &Sender<Msg>,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Some(effect) = self.model.update(msg) {
                if self.handle_effect(effect, ctx, tx) {
                    return Ok(true);
                }
            }
            needs_draw = true;
        }

        if needs_draw {
            let grid = self.model.view();
            let mut frame = compute_frame(self.prev_grid.as_ref(), grid);
            let status = self.model.status();
            if self.prev_status.as_deref() != Some(status.as_str()) {
                frame.status = Some(status.clone());
                self.prev_status = Some(status);
            }
            self.prev_grid = Some(grid.clone());
            if !frame.cells.is_empty() || frame.status.is_some() {
                self.driver.flush(frame)?;
            }
        }

        Ok(false)
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(&mut self, effect: Effect, ctx: &Context, tx: &Sender<Msg>) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
            Effect::Cmd(f) => {
                if let Some(msg) = f() {
                    tx.send(msg).ok();
                }
                false
            }
            Effect::Sub(f) => {
                let ctx = ctx.clone();
                let tx = tx.clone();
                self.workers.push(thread::spawn(move || f(ctx, tx)));
                false
            }
            Effect::Batch(effects) => {
                for e in effects {
                    if self.handle_effect(e, ctx, tx) {
                        return true;
                    }
                }
                false
            }
        }
    }
}

/// Join every worker, logging each panic. Returns how many panicked.
fn join_workers(workers: impl Iterator<Item = JoinHandle<()>>) -> usize {
    let mut panicked = 0;
    for w in workers {
        if let Err(payload) = w.join() {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::warn!("worker thread panicked: {reason}");
            panicked += 1;
        }
    }
    panicked
}
