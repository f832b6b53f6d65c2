//! Runtime tests with a scripted driver.
//!
//! The driver replays a fixed queue of terminal and bus events, records every
//! bus request and render, and reports Ctrl-C once the script runs out so the
//! loop always terminates.

use std::{
    collections::VecDeque,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use chrono::{NaiveDate, NaiveDateTime};
use nako_app::{
    App, AppEvent, BusEvent, ColourAllocator, Driver, DriverEvent, KeyInput, Outbound, Router,
    RouterConfig, Runtime,
};

#[derive(Debug, thiserror::Error)]
#[error("transport unavailable")]
struct ScriptError;

/// Scripted driver.
#[derive(Default)]
struct SimDriver {
    script: VecDeque<DriverEvent>,
    executed: Vec<Outbound>,
    renders: usize,
    fail_publishes: bool,
    stopped: Arc<AtomicBool>,
}

impl SimDriver {
    fn with_script(events: impl IntoIterator<Item = DriverEvent>) -> Self {
        Self { script: events.into_iter().collect(), ..Self::default() }
    }
}

impl Driver for SimDriver {
    type Error = ScriptError;

    async fn poll_event(&mut self) -> Result<Option<DriverEvent>, Self::Error> {
        Ok(Some(
            self.script.pop_front().unwrap_or(DriverEvent::App(AppEvent::Key(KeyInput::Interrupt))),
        ))
    }

    async fn execute(&mut self, request: Outbound) -> Result<(), Self::Error> {
        if self.fail_publishes && matches!(request, Outbound::Publish { .. }) {
            return Err(ScriptError);
        }
        self.executed.push(request);
        Ok(())
    }

    fn now(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).and_then(|d| d.and_hms_opt(7, 5, 0)).unwrap()
    }

    fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
        self.renders += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

fn runtime(driver: SimDriver) -> Runtime<SimDriver> {
    let mut config = RouterConfig::new("/gowon", "nako_9");
    config.channels = vec!["#nako".into()];
    let router = Router::new(config, ColourAllocator::new(0));
    let app = App::new("localhost:1883".into(), vec!["#nako".into()]);
    Runtime::new(driver, app, router)
}

fn keys(text: &str) -> Vec<DriverEvent> {
    text.chars()
        .map(KeyInput::Char)
        .chain([KeyInput::Enter])
        .map(|key| DriverEvent::App(AppEvent::Key(key)))
        .collect()
}

async fn run_cycles(runtime: &mut Runtime<SimDriver>, cycles: usize) -> bool {
    for _ in 0..cycles {
        if runtime.process_cycle().await.unwrap() {
            return true;
        }
    }
    false
}

#[tokio::test]
async fn connect_then_chat_reaches_bus() {
    let mut script = vec![DriverEvent::Bus(BusEvent::Connected)];
    script.extend(keys("hi"));
    let len = script.len();
    let mut runtime = runtime(SimDriver::with_script(script));

    assert!(!run_cycles(&mut runtime, len).await);

    let executed = &runtime.driver().executed;
    assert!(matches!(&executed[..2], [Outbound::Subscribe { .. }, Outbound::Subscribe { .. }]));
    let payload =
        r##"{"module":"nako_9","nick":"you","destination":"#nako","message-body":"hi"}"##;
    assert_eq!(&executed[executed.len() - 2..], [
        Outbound::publish("/gowon/input", payload),
        Outbound::publish("/gowon/output", payload),
    ]);
}

#[tokio::test]
async fn inbound_chat_is_logged_with_local_time() {
    let script = [DriverEvent::Bus(BusEvent::Message {
        topic: "/gowon/input".into(),
        payload: br##"{"nick":"root","destination":"#nako","message-body":"morning"}"##.to_vec(),
    })];
    let mut runtime = runtime(SimDriver::with_script(script));

    run_cycles(&mut runtime, 1).await;

    let lines = runtime.app().log().lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("\x1b[1m07:05\x1b[0m "));
    assert!(lines[0].contains("root: morning"));
    assert!(runtime.driver().renders > 0);
}

#[tokio::test]
async fn failed_publish_is_reported_not_fatal() {
    let mut driver = SimDriver::with_script(keys("/names"));
    driver.fail_publishes = true;
    let mut runtime = runtime(driver);

    assert!(!run_cycles(&mut runtime, 7).await);

    let last = runtime.app().log().lines().last().cloned().unwrap_or_default();
    assert!(last.ends_with("bus request failed: transport unavailable"));
}

#[tokio::test]
async fn run_stops_driver_on_quit() {
    let script: Vec<DriverEvent> =
        [AppEvent::Tick, AppEvent::Resize(120, 40)].into_iter().map(DriverEvent::from).collect();
    let driver = SimDriver::with_script(script);
    let stopped = Arc::clone(&driver.stopped);
    let runtime = runtime(driver);

    let result: Result<(), ScriptError> = runtime.run().await;
    assert!(result.is_ok());
    assert!(stopped.load(Ordering::SeqCst));
}

#[tokio::test]
async fn quit_command_ends_loop() {
    let mut runtime = runtime(SimDriver::with_script(keys("/q")));
    assert!(run_cycles(&mut runtime, 3).await);
    assert!(runtime.driver().executed.is_empty());
}
