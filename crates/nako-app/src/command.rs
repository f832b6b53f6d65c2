//! Input line interpretation.
//!
//! Lines starting with `/` are control commands. A doubled slash escapes the
//! first one so literal slash-prefixed text can still be sent as chat.

/// Number of history entries requested when `/chatlog` gets no usable count.
pub const DEFAULT_HISTORY_LENGTH: u32 = 10;

/// Reason given for slash commands that are not recognised.
pub const NOT_RECOGNISED: &str = "command not recognised";

const COMMAND_PREFIX: char = '/';

/// Outcome of interpreting one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Chat text to publish.
    PlainMessage {
        /// Text as typed, minus an escaping slash.
        body: String,
    },
    /// Recognised control command.
    Control(ControlCommand),
    /// Nothing to do.
    Ignored,
    /// Slash command that is not recognised.
    Rejected {
        /// Message to show the user.
        reason: String,
    },
}

/// Control commands handled by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// `/chatlog [n]`, `/ch [n]`: request the latest history entries.
    ChatLog {
        /// Entries to request.
        count: u32,
    },
    /// `/topic`, `/t`: request the channel topic.
    Topic,
    /// `/names`, `/n`: request the member list.
    Names,
    /// `/clear`, `/c`: clear the local log. Nothing is published.
    Clear,
    /// `/quit`, `/q`: exit the client.
    Quit,
}

impl ControlCommand {
    /// Canonical command name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChatLog { .. } => "chatlog",
            Self::Topic => "topic",
            Self::Names => "names",
            Self::Clear => "clear",
            Self::Quit => "quit",
        }
    }

    fn parse(token: &str, args: &[&str]) -> Option<Self> {
        match token {
            "chatlog" | "ch" => {
                let count = args
                    .first()
                    .and_then(|arg| arg.parse().ok())
                    .unwrap_or(DEFAULT_HISTORY_LENGTH);
                Some(Self::ChatLog { count })
            },
            "topic" | "t" => Some(Self::Topic),
            "names" | "n" => Some(Self::Names),
            "clear" | "c" => Some(Self::Clear),
            "quit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Interpret a line of user input.
pub fn interpret(line: &str) -> Command {
    if line.is_empty() {
        return Command::Ignored;
    }

    let Some(rest) = line.strip_prefix(COMMAND_PREFIX) else {
        return Command::PlainMessage { body: line.to_owned() };
    };

    if rest.starts_with(COMMAND_PREFIX) {
        return Command::PlainMessage { body: rest.to_owned() };
    }

    let mut fields = line.split_whitespace();
    let token = fields.next().and_then(|f| f.strip_prefix(COMMAND_PREFIX)).unwrap_or_default();
    let args: Vec<&str> = fields.collect();

    ControlCommand::parse(token, &args).map_or_else(
        || Command::Rejected { reason: NOT_RECOGNISED.to_owned() },
        Command::Control,
    )
}
