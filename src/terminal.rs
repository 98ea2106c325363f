//! Terminal display and input handling

use crate::animation::FrameSink;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::Duration;

/// Shortest input wait while paused, so an idle animation does not spin
pub const PAUSED_POLL_FLOOR: Duration = Duration::from_millis(16);

/// Input wait used while paused: the configured timeout, but never below the floor
pub fn paused_timeout(poll_timeout: Duration) -> Duration {
    poll_timeout.max(PAUSED_POLL_FLOOR)
}

/// Alternate-screen terminal with buffered output
pub struct TerminalDisplay {
    buffer: BufWriter<Stdout>,
    poll_timeout: Duration,
}

impl TerminalDisplay {
    /// Enter the alternate screen in raw mode and clear it.
    ///
    /// `poll_timeout` is how long each input poll may wait, which also paces
    /// the animation; zero renders as fast as the terminal accepts frames.
    pub fn new(poll_timeout: Duration) -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        Ok(Self {
            buffer: BufWriter::new(stdout),
            poll_timeout,
        })
    }

    /// Current terminal size as (columns, rows)
    pub fn size() -> io::Result<(usize, usize)> {
        let (width, height) = terminal::size()?;
        Ok((width as usize, height as usize))
    }

    /// Draw a frame from the top-left corner.
    ///
    /// Raw mode does not turn '\n' into a carriage return, so every line gets
    /// an explicit cursor position.
    pub fn render(&mut self, content: &str) -> io::Result<()> {
        // Hide cursor, disable line wrap
        write!(self.buffer, "\x1b[?25l\x1b[?7l")?;

        for (i, line) in content.lines().enumerate() {
            write!(self.buffer, "\x1b[{};1H{}", i + 1, line)?;
        }

        // Clear whatever a larger previous frame left below
        write!(self.buffer, "\x1b[J")?;

        // Show cursor, re-enable line wrap
        write!(self.buffer, "\x1b[?25h\x1b[?7h")?;

        self.buffer.flush()
    }

    /// Check for keyboard input
    pub fn poll_input(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    return Ok(Some(key_event));
                }
            }
        }
        Ok(None)
    }
}

impl FrameSink for TerminalDisplay {
    fn present(&mut self, frame: &str) -> io::Result<()> {
        self.render(frame)
    }

    fn poll_action(&mut self) -> io::Result<Action> {
        Ok(self
            .poll_input(self.poll_timeout)?
            .map(parse_key_event)
            .unwrap_or(Action::None))
    }

    fn wait_action(&mut self) -> io::Result<Action> {
        Ok(self
            .poll_input(paused_timeout(self.poll_timeout))?
            .map(parse_key_event)
            .unwrap_or(Action::None))
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), LeaveAlternateScreen);
    }
}

/// Key actions for the animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    Pause,
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::Pause,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_event_quit() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Quit);
    }

    #[test]
    fn test_parse_key_event_escape() {
        let event = KeyEvent::new(KeyCode::Esc, KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Quit);
    }

    #[test]
    fn test_parse_key_event_ctrl_c() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(parse_key_event(event), Action::Quit);
    }

    #[test]
    fn test_parse_key_event_plain_c() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::None);
    }

    #[test]
    fn test_parse_key_event_pause() {
        let event = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Pause);
    }

    #[test]
    fn test_paused_timeout_has_floor() {
        assert_eq!(paused_timeout(Duration::ZERO), PAUSED_POLL_FLOOR);
        assert_eq!(paused_timeout(Duration::from_millis(1)), PAUSED_POLL_FLOOR);
        assert_eq!(
            paused_timeout(Duration::from_millis(100)),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_parse_key_event_none() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::None);
    }
}
