use std::io;
use std::io::Stdout;
use std::io::Write;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyEventKind;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::ScreenSize;
use crate::camera::Camera;
use crate::camera::Palette;
use crate::driver::Frontend;
use crate::events::Event;
use crate::world::World;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Failed to initialize the terminal: {0}")]
    Initialization(#[source] io::Error),
}

/// Converts a crossterm event into an application event. Any key press exits.
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => Some(Event::Exit),
        CrossTermEvent::Resize(cols, rows) => Some(Event::Resize { cols, rows }),
        _ => None,
    }
}

/// Queue the camera's pixel buffer onto `out` and flush it. Runs of identical pixels are written
/// together so the colour only changes when it has to.
pub fn draw_frame<W: Write>(out: &mut W, cam: &Camera) -> io::Result<()> {
    for (y, row) in cam.rows().enumerate() {
        queue!(out, cursor::MoveTo(0, y as ScreenSize))?;

        for run in row.chunk_by(|a, b| a == b) {
            match run[0] {
                Some(paint) => {
                    let s: String = std::iter::repeat_n(paint.glyph, run.len()).collect();
                    queue!(out, style::SetForegroundColor(paint.color), style::Print(s))?;
                }
                None => {
                    queue!(out, style::ResetColor, style::Print(" ".repeat(run.len())))?;
                }
            }
        }
    }

    queue!(out, style::ResetColor)?;
    out.flush()
}

/// Switch to the alternate screen and hide the cursor. If that fails partway, whatever did get
/// through is undone before the error is returned.
fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    let res = execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All)
    );

    if res.is_err() {
        let _ = leave_screen(out);
    }

    res
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(
        out,
        style::ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )
}

/// Owns the terminal for as long as it's alive. Raw mode, the alternate screen and the hidden
/// cursor are all restored on drop.
pub struct Terminal {
    stdout: Stdout,
    cam: Camera,
}

impl Terminal {
    pub fn init(cell_size: ScreenSize, line_width: ScreenSize) -> Result<Self, TerminalError> {
        let (cols, rows) = terminal::size().map_err(TerminalError::Initialization)?;

        terminal::enable_raw_mode().map_err(TerminalError::Initialization)?;

        let mut stdout = io::stdout();
        if let Err(e) = enter_screen(&mut stdout) {
            let _ = terminal::disable_raw_mode();
            return Err(TerminalError::Initialization(e));
        }

        debug!(cols, rows, "terminal initialized");

        Ok(Self {
            stdout,
            cam: Camera::new(cols, rows, cell_size, line_width, Palette::default()),
        })
    }
}

impl Frontend for Terminal {
    fn render(&mut self, world: &World) -> io::Result<()> {
        self.cam.reset();
        self.cam.draw(world);

        draw_frame(&mut self.stdout, &self.cam)
    }

    /// Drains all pending input without blocking
    fn poll_events(&mut self) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();

        while event::poll(Duration::ZERO)? {
            if let Some(event) = convert_event(event::read()?) {
                events.push(event);
            }
        }

        Ok(events)
    }

    fn resize(&mut self, cols: ScreenSize, rows: ScreenSize) -> io::Result<()> {
        self.cam.resize(cols, rows);

        execute!(self.stdout, terminal::Clear(terminal::ClearType::All))
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let res = leave_screen(&mut self.stdout).and_then(|_| terminal::disable_raw_mode());

        match res {
            Ok(()) => debug!("terminal restored"),
            Err(e) => warn!("Failed to restore terminal: {e}"),
        }
    }
}
