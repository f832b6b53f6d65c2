//! Input line
//!
//! Displays the channel prompt and input buffer with cursor.

use nako_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BORDER_OFFSET: u16 = 1; // inside left/top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    let Some(channel) = app.active_channel() else {
        let hint = Span::styled("configure exactly one channel to chat", Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(Line::from(hint)).block(block), area);
        return;
    };

    let prompt = format!("{channel}: ");
    let prompt_width = prompt.chars().count() as u16;
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Green)),
        Span::raw(app.input()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().fg(Color::White)).block(block), area);

    let cursor_x = area
        .x
        .saturating_add(BORDER_OFFSET)
        .saturating_add(prompt_width)
        .saturating_add(app.cursor() as u16);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING + 1);
    let cursor_y = area.y.saturating_add(BORDER_OFFSET);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
