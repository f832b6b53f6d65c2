//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Publish a chat message.
    SendMessage {
        /// Target channel.
        channel: String,
        /// Chat text.
        body: String,
    },

    /// Ask the server for the latest history entries of a channel.
    RequestHistory {
        /// Channel to replay.
        channel: String,
        /// Number of entries.
        count: u32,
    },

    /// Ask the server for a channel topic.
    RequestTopic {
        /// Channel to query.
        channel: String,
    },

    /// Ask the server for a channel member list.
    RequestNames {
        /// Channel to query.
        channel: String,
    },
}
