//! Generic runtime for application orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Router`]: bus-to-application translation
//! - [`Driver`]: platform-specific I/O

use crate::{App, AppAction, AppEvent, ConnectionState, Driver, DriverEvent, LogLine, Router};

/// Generic runtime that orchestrates App, Router, and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    router: Router,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime.
    pub fn new(driver: D, app: App, router: Router) -> Self {
        Self { driver, app, router }
    }

    /// Run the main event loop until the App asks to quit.
    ///
    /// Each cycle:
    /// 1. Waits for the next terminal or bus event from the driver
    /// 2. Hands it to the App or the Router
    /// 3. Executes queued bus requests through the driver
    /// 4. Feeds resulting events and actions back into the App
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll or render. Bus request
    /// failures are reported in the chat log instead.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let actions = self.app.handle(AppEvent::Connection(ConnectionState::Connecting));
        let mut should_quit = self.process_actions(actions).await?;

        while !should_quit {
            should_quit = self.process_cycle().await?;
        }

        tracing::debug!("runtime stopping");
        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    pub async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let Some(event) = self.driver.poll_event().await? else {
            return Ok(false);
        };

        match event {
            DriverEvent::App(event) => {
                let actions = self.app.handle(event);
                self.process_actions(actions).await
            },
            DriverEvent::Bus(event) => {
                let now = self.driver.now();
                let events = self.router.handle_bus_event(event, now);
                self.flush_outgoing().await?;
                self.process_app_events(events).await
            },
        }
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),

                    // Bus operations go through the router
                    AppAction::SendMessage { .. }
                    | AppAction::RequestHistory { .. }
                    | AppAction::RequestTopic { .. }
                    | AppAction::RequestNames { .. } => {
                        let now = self.driver.now();
                        let events = self.router.process_app_action(action, now);
                        for event in events {
                            pending_actions.extend(self.app.handle(event));
                        }
                        self.flush_outgoing().await?;
                    },
                }
            }
        }
        Ok(false)
    }

    /// Feed router events back into the App.
    async fn process_app_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute all queued bus requests.
    ///
    /// A failed request is logged and shown in the chat; the rest still run.
    async fn flush_outgoing(&mut self) -> Result<(), D::Error> {
        let requests = self.router.take_outgoing();
        let mut failed = false;

        for request in requests {
            if let Err(e) = self.driver.execute(request).await {
                tracing::warn!(error = %e, "bus request failed");
                let line = LogLine::at(self.driver.now(), format!("bus request failed: {e}"));
                self.app.handle(AppEvent::Line(line));
                failed = true;
            }
        }

        if failed {
            self.driver.render(&self.app)?;
        }
        Ok(())
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Router
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
