//! Application layer for nako
//!
//! Pure state machines and a generic runtime for a terminal chat client that
//! talks to an IRC bridge over a publish/subscribe bus. The same code runs in
//! the terminal and under scripted drivers in tests.
//!
//! # Components
//!
//! - [`classify`]: bus payloads to [`ChatEvent`]s
//! - [`ColourAllocator`], [`irc_to_ansi`], [`colour_names`]: presentation
//! - [`interpret`]: input lines to [`Command`]s
//! - [`ScrollBuffer`]: chat log with an autoscrolling viewport
//! - [`App`]: UI state machine (input line, chat log, status)
//! - [`Router`]: bus bridge (classifies inbound, queues outbound)
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bus;
mod classify;
mod codec;
mod colour;
mod command;
mod driver;
mod error;
mod event;
mod input;
mod message;
mod names;
mod router;
mod runtime;
mod scroll;
mod state;

pub use action::AppAction;
pub use app::{App, INPUT_HEIGHT, STATUS_HEIGHT};
pub use bus::{BusEvent, Outbound, Topics};
pub use classify::{ChatEvent, JOIN_CODE, NAMES_REPLY_CODE, TOPIC_REPLY_CODE, classify};
pub use codec::irc_to_ansi;
pub use colour::{
    ColourAllocator, DEFAULT_COLOUR_BOUND, MAX_COLOUR_BOUND, bold, highlight, paint,
};
pub use command::{Command, ControlCommand, DEFAULT_HISTORY_LENGTH, NOT_RECOGNISED, interpret};
pub use driver::{Driver, DriverEvent};
pub use error::{ClassifyError, ColourBoundError, NO_BODY_MARKER, RouterError};
pub use event::AppEvent;
pub use input::KeyInput;
pub use message::{BusMessage, LOCAL_NICK, SERVER_TIME_FORMAT, TIME_TAG};
pub use names::{colour_names, nick_of, rank, sort_names};
pub use router::{Router, RouterConfig};
pub use runtime::Runtime;
pub use scroll::{LARGE_STEP, SMALL_STEP, ScrollBuffer, ScrollState};
pub use state::{ConnectionState, LogLine, TIME_FORMAT};
