//! Error types for the chat core.
//!
//! None of these are fatal. Classification errors become log lines (except
//! [`ClassifyError::NoBody`], which is expected for some passthrough events),
//! router errors skip the offending publish, and colour bound errors are
//! reported once at startup.

use thiserror::Error;

/// Marker text carried by [`ClassifyError::NoBody`].
pub const NO_BODY_MARKER: &str = "message has no body";

/// Reasons a bus payload could not be turned into a displayable event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// Payload carried no message body.
    ///
    /// Routine for raw protocol traffic the client does not display. Never
    /// rendered.
    #[error("message has no body")]
    NoBody,

    /// Payload was not valid UTF-8 or not a decodable message object.
    #[error("malformed message: {0}")]
    Malformed(String),

    /// A numeric or JOIN reply lacked a positional argument.
    #[error("{code} reply is missing argument {index}")]
    MissingArgument {
        /// Reply code (`JOIN`, `332`, `353`).
        code: String,
        /// Zero-based argument position that was absent.
        index: usize,
    },
}

impl ClassifyError {
    /// Whether this is the suppressed "no body" marker.
    pub fn is_no_body(&self) -> bool {
        matches!(self, Self::NoBody)
    }
}

/// Errors raised while building outbound bus traffic.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Chat payload could not be encoded.
    #[error("failed to encode outbound message: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Palette bound outside the supported range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("colour bound must be between 2 and 8, got {bound}")]
pub struct ColourBoundError {
    /// The rejected bound.
    pub bound: u8,
}
