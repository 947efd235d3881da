use std::io;
use std::io::Stdout;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;

use crate::events::Event;

/// Converts a crossterm event into a simulation event
pub fn convert_event(event: CtEvent) -> Option<Event> {
    let CtEvent::Key(key_event) = event else {
        return None;
    };

    match key_event {
        KeyEvent {
            kind: KeyEventKind::Release,
            ..
        } => None,
        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Event::Quit),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Some(Event::TogglePause),
        KeyEvent {
            code: KeyCode::Char('n') | KeyCode::Right,
            ..
        } => Some(Event::Step),
        _ => None,
    }
}

/// Wait up to `timeout` for an event. Keys that don't map to an [`Event`] are skipped.
pub fn wait(timeout: Duration) -> io::Result<Option<Event>> {
    let deadline = Instant::now() + timeout;

    loop {
        let left = deadline.saturating_duration_since(Instant::now());

        if !event::poll(left)? {
            return Ok(None);
        }

        if let Some(event) = convert_event(event::read()?) {
            return Ok(Some(event));
        }
    }
}

/// The terminal in raw mode on the alternate screen. Restored when dropped.
pub struct Screen {
    stdout: Stdout,
}

impl Screen {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout })
    }

    /// Replace the screen contents with a status line followed by `frame`.
    pub fn draw(&mut self, status: &str, frame: &str) -> io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            style::Print(status),
            cursor::MoveToNextLine(1)
        )?;

        // Raw mode doesn't return the carriage on '\n'
        for line in frame.lines() {
            queue!(self.stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        self.stdout.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
