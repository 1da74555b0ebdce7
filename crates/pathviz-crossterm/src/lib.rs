//! Crossterm terminal driver for pathviz.
//!
//! Provides a [`CrosstermDriver`] that implements [`pathviz_core::Driver`].
//! The status line takes the first terminal row; below it every grid cell is
//! drawn as two blank columns painted in the colour of its state.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{self, Color as CtColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{Cell, CellKind, Context, Driver, Frame, Key, ModMask, MouseAction, Msg, Point};

/// Terminal columns per grid cell.
const CELL_WIDTH: u16 = 2;
/// Terminal rows above the grid.
const STATUS_ROWS: u16 = 1;

/// Background colours of the cell states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub empty: CtColor,
    pub wall: CtColor,
    pub start: CtColor,
    pub end: CtColor,
    pub frontier: CtColor,
    pub visited: CtColor,
    pub path: CtColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            empty: CtColor::Rgb { r: 255, g: 255, b: 255 },
            wall: CtColor::Rgb { r: 52, g: 73, b: 94 },
            start: CtColor::Rgb { r: 46, g: 204, b: 113 },
            end: CtColor::Rgb { r: 231, g: 76, b: 60 },
            frontier: CtColor::Rgb { r: 255, g: 165, b: 0 },
            visited: CtColor::Rgb { r: 52, g: 152, b: 219 },
            path: CtColor::Rgb { r: 241, g: 196, b: 15 },
        }
    }
}

impl Theme {
    /// The colour a cell is drawn with. Kinds win over search marks, and the
    /// path wins over the other marks.
    pub fn color_of(&self, cell: Cell) -> CtColor {
        match cell.kind {
            CellKind::Start => self.start,
            CellKind::End => self.end,
            CellKind::Wall => self.wall,
            CellKind::Empty if cell.on_path => self.path,
            CellKind::Empty if cell.frontier => self.frontier,
            CellKind::Empty if cell.visited => self.visited,
            CellKind::Empty => self.empty,
        }
    }
}

/// Maps crossterm key modifiers to a [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

fn key_msg(ev: KeyEvent) -> Option<Msg> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    let modifiers = to_mod_mask(ev.modifiers);
    // Raw mode swallows SIGINT.
    if modifiers.contains(ModMask::CTRL) && ev.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }
    to_key(ev.code).map(|key| Msg::KeyDown { key, modifiers })
}

/// Grid position under a terminal cell. Rows above the grid map to negative
/// grid rows.
fn screen_to_grid(column: u16, row: u16) -> Point {
    Point::new(
        i32::from(row) - i32::from(STATUS_ROWS),
        i32::from(column / CELL_WIDTH),
    )
}

/// Terminal position of the left half of a grid cell.
fn grid_to_screen(p: Point) -> Option<(u16, u16)> {
    let col = u16::try_from(p.col).ok()?.checked_mul(CELL_WIDTH)?;
    let row = u16::try_from(p.row).ok()?.checked_add(STATUS_ROWS)?;
    Some((col, row))
}

fn mouse_action(kind: MouseEventKind) -> Option<MouseAction> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(MouseAction::Main),
        MouseEventKind::Down(MouseButton::Right) => Some(MouseAction::Secondary),
        MouseEventKind::Drag(MouseButton::Left) => Some(MouseAction::DragMain),
        MouseEventKind::Drag(MouseButton::Right) => Some(MouseAction::DragSecondary),
        MouseEventKind::Up(_) => Some(MouseAction::Release),
        _ => None,
    }
}

/// A terminal back-end for pathviz using crossterm.
pub struct CrosstermDriver {
    theme: Theme,
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Short timeout so worker messages are drawn promptly.
        if !event::poll(Duration::from_millis(8))? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }

            let msg = match event::read()? {
                Event::Key(ev) => key_msg(ev),
                Event::Mouse(me) => mouse_action(me.kind)
                    .map(|action| Msg::mouse(action, screen_to_grid(me.column, me.row))),
                _ => None,
            };

            if let Some(m) = msg {
                tx.send(m).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();

        if let Some(status) = &frame.status {
            queue!(
                stdout,
                cursor::MoveTo(0, 0),
                style::ResetColor,
                terminal::Clear(ClearType::CurrentLine),
                style::Print(status)
            )?;
        }

        for fc in &frame.cells {
            let Some((col, row)) = grid_to_screen(fc.pos) else {
                continue;
            };
            queue!(
                stdout,
                cursor::MoveTo(col, row),
                SetBackgroundColor(self.theme.color_of(fc.cell)),
                style::Print("  ")
            )?;
        }

        queue!(stdout, style::ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
