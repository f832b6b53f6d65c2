//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The bus uses MQTT through
//! [`BusHandle`].

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use chrono::{Local, NaiveDateTime};
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
    },
};
use futures::StreamExt;
use nako_app::{App, AppEvent, Driver, DriverEvent, KeyInput, Outbound};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{BusHandle, TransportError, ui};

/// Interval of idle ticks.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Bus event loop ended.
    #[error("bus event channel closed")]
    ChannelClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the broker
/// connection (rumqttc).
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    bus: BusHandle,
    /// Initial terminal size, reported on the first poll.
    pending_resize: Option<(u16, u16)>,
}

impl TerminalDriver {
    /// Take over the terminal and wrap the bus connection.
    pub fn new(bus: BusHandle) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();
        let pending_resize = Some(size()?);

        Ok(Self { terminal, event_stream, bus, pending_resize })
    }
}

/// Convert a crossterm key event to `KeyInput`.
pub fn convert_key(event: KeyEvent) -> Option<KeyInput> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(KeyInput::Interrupt),
            KeyCode::Char('u') => Some(KeyInput::ClearLine),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        KeyCode::PageUp => Some(KeyInput::PageUp),
        KeyCode::PageDown => Some(KeyInput::PageDown),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<DriverEvent>, Self::Error> {
        if let Some((cols, rows)) = self.pending_resize.take() {
            return Ok(Some(AppEvent::Resize(cols, rows).into()));
        }

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(convert_key(key_event).map(|key| AppEvent::Key(key).into()))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(Some(AppEvent::Resize(cols, rows).into()))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Broker notifications
            maybe_bus = self.bus.recv() => {
                maybe_bus.map(|event| Some(event.into())).ok_or(TerminalError::ChannelClosed)
            }

            // Tick timeout
            () = tokio::time::sleep(TICK_INTERVAL) => {
                Ok(Some(AppEvent::Tick.into()))
            }
        }
    }

    async fn execute(&mut self, request: Outbound) -> Result<(), Self::Error> {
        self.bus.execute(request)?;
        Ok(())
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.bus.stop();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
