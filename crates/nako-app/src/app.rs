//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the client completely decoupled from I/O and bus mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the chat log and its scroll viewport.
//! - Owns the input line and interprets it on Enter.
//! - Stores terminal dimensions to size the viewport on resize.
//! - Tracks broker connection state for UI feedback.

use crate::{
    AppAction, AppEvent, ConnectionState, KeyInput,
    command::{Command, ControlCommand, interpret},
    scroll::{LARGE_STEP, SMALL_STEP, ScrollBuffer},
};

/// Rows taken by the input box, borders included.
pub const INPUT_HEIGHT: u16 = 3;

/// Rows taken by the status bar.
pub const STATUS_HEIGHT: u16 = 1;

const DEFAULT_TERMINAL_SIZE: (u16, u16) = (80, 24);

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// Broker address, for display.
    broker: String,
    /// Configured channels.
    channels: Vec<String>,
    /// Channel input is sent to. Only set with exactly one channel.
    active_channel: Option<String>,
    /// Rendered chat lines and viewport.
    log: ScrollBuffer,
    /// Text being typed.
    input_buffer: String,
    /// Cursor position in characters.
    input_cursor: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for the given broker and channel list.
    pub fn new(broker: String, channels: Vec<String>) -> Self {
        let active_channel = match channels.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        };

        Self {
            state: ConnectionState::Disconnected,
            broker,
            channels,
            active_channel,
            log: ScrollBuffer::new(viewport_for(DEFAULT_TERMINAL_SIZE.1)),
            input_buffer: String::new(),
            input_cursor: 0,
            terminal_size: DEFAULT_TERMINAL_SIZE,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                self.log.set_viewport_height(viewport_for(rows));
                vec![AppAction::Render]
            },
            AppEvent::Connection(state) => {
                self.state = state;
                vec![AppAction::Render]
            },
            AppEvent::Line(line) => {
                self.log.append(line.render());
                vec![AppAction::Render]
            },
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.input_cursor);
                self.input_buffer.insert(at, c);
                self.input_cursor += 1;
            },
            KeyInput::Backspace => {
                if self.input_cursor > 0 {
                    self.input_cursor -= 1;
                    let at = self.byte_offset(self.input_cursor);
                    self.input_buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.input_cursor < self.input_len() {
                    let at = self.byte_offset(self.input_cursor);
                    self.input_buffer.remove(at);
                }
            },
            KeyInput::Left => self.input_cursor = self.input_cursor.saturating_sub(1),
            KeyInput::Right => self.input_cursor = (self.input_cursor + 1).min(self.input_len()),
            KeyInput::Home => self.input_cursor = 0,
            KeyInput::End => self.input_cursor = self.input_len(),
            KeyInput::ClearLine => {
                self.input_buffer.clear();
                self.input_cursor = 0;
            },
            KeyInput::Up => self.log.scroll_by(-SMALL_STEP),
            KeyInput::Down => self.log.scroll_by(SMALL_STEP),
            KeyInput::PageUp => self.log.scroll_by(-LARGE_STEP),
            KeyInput::PageDown => self.log.scroll_by(LARGE_STEP),
            KeyInput::Enter => return self.handle_enter(),
            KeyInput::Esc | KeyInput::Interrupt => return vec![AppAction::Quit],
        }
        vec![AppAction::Render]
    }

    /// Take the input line and interpret it.
    fn handle_enter(&mut self) -> Vec<AppAction> {
        let text = std::mem::take(&mut self.input_buffer);
        self.input_cursor = 0;

        let command = interpret(&text);
        match command {
            Command::Ignored => return vec![AppAction::Render],
            Command::Control(ControlCommand::Clear) => {
                self.status_message = None;
                self.log.clear();
                return vec![AppAction::Render];
            },
            Command::Control(ControlCommand::Quit) => return vec![AppAction::Quit],
            _ => {},
        }

        let Some(channel) = self.active_channel.clone() else {
            self.status_message = Some("input requires exactly one channel".into());
            return vec![AppAction::Render];
        };

        self.status_message = None;
        let action = match command {
            Command::Ignored => return vec![AppAction::Render],
            Command::Rejected { reason } => {
                tracing::debug!(%text, "input rejected");
                self.status_message = Some(reason);
                return vec![AppAction::Render];
            },
            Command::PlainMessage { body } => AppAction::SendMessage { channel, body },
            Command::Control(ControlCommand::ChatLog { count }) => {
                AppAction::RequestHistory { channel, count }
            },
            Command::Control(ControlCommand::Topic) => AppAction::RequestTopic { channel },
            Command::Control(ControlCommand::Names) => AppAction::RequestNames { channel },
            Command::Control(ControlCommand::Clear | ControlCommand::Quit) => {
                return vec![AppAction::Render];
            },
        };

        vec![action, AppAction::Render]
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Broker address (host:port).
    pub fn broker(&self) -> &str {
        &self.broker
    }

    /// Configured channels.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Channel input is sent to. `None` unless exactly one channel is set.
    pub fn active_channel(&self) -> Option<&str> {
        self.active_channel.as_deref()
    }

    /// Chat log and viewport.
    pub fn log(&self) -> &ScrollBuffer {
        &self.log
    }

    /// Text in the input line.
    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    /// Cursor position in the input line, in characters.
    pub fn cursor(&self) -> usize {
        self.input_cursor
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    fn input_len(&self) -> usize {
        self.input_buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.input_buffer.char_indices().nth(chars).map_or(self.input_buffer.len(), |(i, _)| i)
    }
}

fn viewport_for(rows: u16) -> usize {
    usize::from(rows.saturating_sub(INPUT_HEIGHT + STATUS_HEIGHT))
}
