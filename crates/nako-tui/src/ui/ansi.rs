//! ANSI SGR to ratatui style conversion.
//!
//! The core formats chat lines with a small set of SGR escapes: reset, bold,
//! and the eight foreground and background colours. Other control sequences
//! and stray escape characters are dropped.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const ESC: char = '\x1b';

/// Convert a line containing SGR escapes into styled spans.
pub fn to_line(text: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut style = Style::default();
    let mut current = String::new();
    let mut rest = text;

    while let Some(pos) = rest.find(ESC) {
        current.push_str(&rest[..pos]);
        let after = &rest[pos + ESC.len_utf8()..];

        match split_csi(after) {
            Some((params, 'm', remaining)) => {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), style));
                }
                style = apply(style, params);
                rest = remaining;
            },
            Some((_, _, remaining)) => rest = remaining,
            None => rest = after,
        }
    }

    current.push_str(rest);
    if !current.is_empty() {
        spans.push(Span::styled(current, style));
    }
    Line::from(spans)
}

/// Split `[<params><final>` off the front of `text`.
fn split_csi(text: &str) -> Option<(&str, char, &str)> {
    let body = text.strip_prefix('[')?;
    let end = body.find(|c: char| !(c.is_ascii_digit() || c == ';'))?;
    let terminator = body[end..].chars().next()?;
    Some((&body[..end], terminator, &body[end + terminator.len_utf8()..]))
}

fn apply(style: Style, params: &str) -> Style {
    params.split(';').fold(style, |style, param| match param {
        "" | "0" => Style::default(),
        "1" => style.add_modifier(Modifier::BOLD),
        _ => match param.parse::<u8>() {
            Ok(code @ 30..=37) => style.fg(palette(code - 30)),
            Ok(code @ 40..=47) => style.bg(palette(code - 40)),
            _ => style,
        },
    })
}

fn palette(index: u8) -> Color {
    match index {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::Gray,
    }
}
