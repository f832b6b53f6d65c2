//! Rendering tests against ratatui's in-memory backend.

use nako_app::{App, AppEvent, ConnectionState, KeyInput, LogLine, paint};
use nako_tui::ui;
use ratatui::{
    Terminal,
    backend::{Backend, TestBackend},
    layout::Position,
    style::Color,
};

const WIDTH: u16 = 80;
const HEIGHT: u16 = 8;

fn app_with_channel(channels: &[&str]) -> App {
    let mut app = App::new("localhost:1883".into(), channels.iter().map(|c| (*c).to_owned()).collect());
    let _ = app.handle(AppEvent::Resize(WIDTH, HEIGHT));
    app
}

fn line(text: &str) -> AppEvent {
    AppEvent::Line(LogLine { time: "12:30".into(), text: text.into() })
}

fn draw(app: &App) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    terminal
}

fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>().trim().to_owned()
}

fn draw_narrow(app: &App, width: u16) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, HEIGHT)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    terminal
}

#[test]
fn chat_lines_are_styled() {
    let mut app = app_with_channel(&["#nako"]);
    let _ = app.handle(line(&paint(2, "nako: hi")));

    let terminal = draw(&app);

    assert_eq!(row(&terminal, 0), "12:30 nako: hi");
    assert_eq!(terminal.backend().buffer()[(6, 0)].fg, Color::Green);
}

#[test]
fn chat_shows_newest_lines() {
    let mut app = app_with_channel(&["#nako"]);
    for i in 0..10 {
        let _ = app.handle(line(&format!("message {i}")));
    }

    let terminal = draw(&app);

    assert_eq!(row(&terminal, 0), "12:30 message 6");
    assert_eq!(row(&terminal, 3), "12:30 message 9");
}

#[test]
fn long_lines_wrap() {
    let mut app = app_with_channel(&["#nako"]);
    let _ = app.handle(AppEvent::Resize(20, HEIGHT));
    let _ = app.handle(line("abcdefghijklmnopqrstuvwxyz END"));

    let terminal = draw_narrow(&app, 20);

    assert_eq!(row(&terminal, 0), "12:30 abcdefghijklmn");
    assert_eq!(row(&terminal, 1), "opqrstuvwxyz END");
}

#[test]
fn wrapped_overflow_keeps_newest_rows() {
    let mut app = app_with_channel(&["#nako"]);
    let _ = app.handle(AppEvent::Resize(20, HEIGHT));
    for i in 0..4 {
        let _ = app.handle(line(&format!("message {i} wraps past the edge")));
    }

    let terminal = draw_narrow(&app, 20);

    assert_eq!(row(&terminal, 0), "12:30 message 2 wrap");
    assert_eq!(row(&terminal, 3), "s past the edge");
}

#[test]
fn input_prompt_and_cursor() {
    let mut app = app_with_channel(&["#nako"]);
    for c in "hi".chars() {
        let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
    }

    let mut terminal = draw(&app);

    assert!(row(&terminal, 5).starts_with("│#nako: hi"));
    assert_eq!(terminal.backend_mut().get_cursor_position().unwrap(), Position::new(10, 5));
}

#[test]
fn input_hint_without_channel() {
    let app = app_with_channel(&["#a", "#b"]);
    let terminal = draw(&app);
    assert!(row(&terminal, 5).contains("configure exactly one channel"));
}

#[test]
fn status_bar_states() {
    let mut app = app_with_channel(&["#nako"]);
    let _ = app.handle(AppEvent::Connection(ConnectionState::Connected));

    insta::assert_snapshot!(row(&draw(&app), 7), @"Connected (localhost:1883)");

    for i in 0..20 {
        let _ = app.handle(line(&i.to_string()));
    }
    let _ = app.handle(AppEvent::Key(KeyInput::PageUp));
    app.set_status("command not recognised");

    insta::assert_snapshot!(row(&draw(&app), 7), @"Connected (localhost:1883) [scrolled] | command not recognised");
}
