//! Chat area
//!
//! Displays the visible slice of the chat log. Lines arrive pre-styled with
//! ANSI escapes and are converted to ratatui spans, then wrapped to the area
//! width. When the wrapped rows overflow the area the newest rows are kept.

use nako_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::ansi;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let width = usize::from(area.width);
    let mut rows: Vec<Line> =
        app.log().visible().iter().flat_map(|line| wrap(&ansi::to_line(line), width)).collect();

    let overflow = rows.len().saturating_sub(usize::from(area.height));
    rows.drain(..overflow);

    frame.render_widget(Paragraph::new(rows), area);
}

/// Break a styled line into rows at most `width` columns wide.
///
/// Splits on grapheme boundaries, not words. A grapheme wider than the row
/// gets a row of its own.
fn wrap(line: &Line, width: usize) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut row: Vec<(Style, String)> = Vec::new();
    let mut row_width = 0;

    for grapheme in line.styled_graphemes(Style::default()) {
        let grapheme_width = Span::raw(grapheme.symbol).width();
        if row_width > 0 && row_width + grapheme_width > width {
            rows.push(to_row(std::mem::take(&mut row)));
            row_width = 0;
        }

        match row.last_mut() {
            Some((style, text)) if *style == grapheme.style => text.push_str(grapheme.symbol),
            _ => row.push((grapheme.style, grapheme.symbol.to_owned())),
        }
        row_width += grapheme_width;
    }

    if !row.is_empty() || rows.is_empty() {
        rows.push(to_row(row));
    }
    rows
}

fn to_row(spans: Vec<(Style, String)>) -> Line<'static> {
    Line::from(spans.into_iter().map(|(style, text)| Span::styled(text, style)).collect::<Vec<_>>())
}
