//! Inline colour codec.
//!
//! Chat bodies may carry mIRC colour markers: `\x03` followed by a two digit
//! colour number. [`irc_to_ansi`] rewrites the known markers into ANSI
//! foreground escapes in a single left-to-right pass. Anything it does not
//! recognise is copied through unchanged.

const MARKER: char = '\x03';
const CODE_LEN: usize = 2;

fn escape_for(code: &str) -> Option<&'static str> {
    let escape = match code {
        "01" | "04" | "13" => "\x1b[31m",
        "02" | "12" => "\x1b[34m",
        "03" | "07" | "09" => "\x1b[32m",
        "05" | "08" => "\x1b[33m",
        "06" => "\x1b[35m",
        "10" | "11" => "\x1b[36m",
        "14" | "15" => "\x1b[30m",
        "16" => "\x1b[37m",
        "99" => "\x1b[0m",
        _ => return None,
    };
    Some(escape)
}

/// Translate mIRC colour markers in `text` into ANSI escape sequences.
///
/// Idempotent: translated output contains no recognisable markers.
pub fn irc_to_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(MARKER) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + MARKER.len_utf8()..];

        match after.get(..CODE_LEN).and_then(escape_for) {
            Some(escape) => {
                out.push_str(escape);
                rest = &after[CODE_LEN..];
            },
            None => {
                out.push(MARKER);
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}
