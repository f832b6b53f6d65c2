//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. The terminal shell implements it with crossterm and an
//! MQTT client, tests implement it with scripted queues, and the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use chrono::NaiveDateTime;

use crate::{App, AppEvent, BusEvent, Outbound};

/// Input surfaced by a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// Terminal input or tick, handled by the App.
    App(AppEvent),
    /// Transport notification, handled by the Router.
    Bus(BusEvent),
}

impl From<AppEvent> for DriverEvent {
    fn from(event: AppEvent) -> Self {
        Self::App(event)
    }
}

impl From<BusEvent> for DriverEvent {
    fn from(event: BusEvent) -> Self {
        Self::Bus(event)
    }
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal and in tests.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input event.
    ///
    /// Returns `None` if the wait ended without anything to process.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<DriverEvent>, Self::Error>> + Send;

    /// Carry out a bus request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be handed to the transport.
    /// The runtime reports these and keeps running.
    fn execute(&mut self, request: Outbound) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Current local time, used to stamp lines without a server time.
    fn now(&self) -> NaiveDateTime;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Disconnect and release resources.
    fn stop(&mut self);
}
