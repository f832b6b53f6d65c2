//! Terminal UI for nako
//!
//! A thin shell over [`nako_app::Driver`] that provides terminal and MQTT
//! I/O. All orchestration logic lives in the generic [`nako_app::Runtime`].
//!
//! This crate only handles command line parsing, the broker connection and
//! terminal rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod logging;
pub mod terminal;
pub mod transport;
pub mod ui;

pub use cli::{Args, ConfigError};
pub use nako_app::{App, AppAction, AppEvent, Driver, KeyInput, Router, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
pub use transport::{BusHandle, BusOptions, TransportError};
