//! Message classification.
//!
//! [`classify`] turns any bus payload into exactly one [`ChatEvent`]. It never
//! fails: problems are reported as [`ChatEvent::ClassificationError`] rather
//! than a partially filled event.
//!
//! Structured payloads are JSON [`BusMessage`] objects. Payloads that do not
//! look like JSON are treated as plain text and passed through as
//! [`ChatEvent::RawLine`].

use chrono::NaiveDateTime;

use crate::{error::ClassifyError, message::BusMessage};

/// Code of a channel join.
pub const JOIN_CODE: &str = "JOIN";
/// `RPL_TOPIC`.
pub const TOPIC_REPLY_CODE: &str = "332";
/// `RPL_NAMREPLY`.
pub const NAMES_REPLY_CODE: &str = "353";

/// A classified bus event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Chat line addressed to a channel or user.
    PrivateMessage {
        /// Sender nickname.
        nick: String,
        /// Target channel or user.
        destination: String,
        /// Chat text, may contain inline colour markers.
        body: String,
        /// Server-supplied time, when present and parseable.
        timestamp: Option<NaiveDateTime>,
    },

    /// Someone joined a channel.
    JoinEvent {
        /// Joining nickname.
        nick: String,
        /// Joined channel.
        channel: String,
    },

    /// Current topic of a channel.
    TopicReply {
        /// Channel the topic belongs to.
        channel: String,
        /// Topic text.
        topic: String,
    },

    /// Member list of a channel, unsorted and uncoloured.
    NamesReply {
        /// Channel the names belong to.
        channel: String,
        /// Name tokens in reply order, rank glyphs included.
        names: Vec<String>,
    },

    /// Anything else that carries displayable text.
    RawLine {
        /// Text to display.
        text: String,
    },

    /// Payload could not be classified.
    ClassificationError {
        /// Why classification failed.
        error: ClassifyError,
    },
}

impl ChatEvent {
    /// Channel the event concerns. `None` for raw lines and errors.
    pub fn channel(&self) -> Option<&str> {
        match self {
            Self::PrivateMessage { destination, .. } => Some(destination),
            Self::JoinEvent { channel, .. }
            | Self::TopicReply { channel, .. }
            | Self::NamesReply { channel, .. } => Some(channel),
            Self::RawLine { .. } | Self::ClassificationError { .. } => None,
        }
    }
}

/// Classify a raw bus payload.
pub fn classify(payload: &[u8]) -> ChatEvent {
    match parse(payload) {
        Ok(event) => event,
        Err(error) => ChatEvent::ClassificationError { error },
    }
}

fn parse(payload: &[u8]) -> Result<ChatEvent, ClassifyError> {
    let text =
        std::str::from_utf8(payload).map_err(|e| ClassifyError::Malformed(e.to_string()))?;

    if !text.trim_start().starts_with('{') {
        let line = text.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(ClassifyError::NoBody);
        }
        return Ok(ChatEvent::RawLine { text: line.to_owned() });
    }

    let message: BusMessage =
        serde_json::from_str(text).map_err(|e| ClassifyError::Malformed(e.to_string()))?;

    from_message(message)
}

fn from_message(message: BusMessage) -> Result<ChatEvent, ClassifyError> {
    match message.code.as_str() {
        JOIN_CODE => {
            let channel = argument(&message, 0)?;
            return Ok(ChatEvent::JoinEvent { nick: message.nick, channel });
        },
        TOPIC_REPLY_CODE => {
            let channel = argument(&message, 1)?;
            let topic = argument(&message, 2)?;
            return Ok(ChatEvent::TopicReply { channel, topic });
        },
        NAMES_REPLY_CODE => {
            let channel = argument(&message, 2)?;
            let names = argument(&message, 3)?.split_whitespace().map(str::to_owned).collect();
            return Ok(ChatEvent::NamesReply { channel, names });
        },
        _ => {},
    }

    if message.body.is_empty() {
        return Err(ClassifyError::NoBody);
    }

    if !message.destination.is_empty() {
        let timestamp = message.server_time();
        return Ok(ChatEvent::PrivateMessage {
            nick: message.nick,
            destination: message.destination,
            body: message.body,
            timestamp,
        });
    }

    let text = if message.raw.is_empty() { message.body } else { message.raw };
    Ok(ChatEvent::RawLine { text })
}

fn argument(message: &BusMessage, index: usize) -> Result<String, ClassifyError> {
    message
        .arguments
        .get(index)
        .cloned()
        .ok_or_else(|| ClassifyError::MissingArgument { code: message.code.clone(), index })
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn private_message_with_server_time() {
        let event = classify(
            br##"{"nick":"nako","destination":"#nako","message-body":"hi","tags":{"time":"2022-03-04T10:11:12.345Z"}}"##,
        );
        let ChatEvent::PrivateMessage { nick, destination, body, timestamp } = event else {
            panic!("expected private message");
        };
        assert_eq!((nick.as_str(), destination.as_str(), body.as_str()), ("nako", "#nako", "hi"));
        assert_eq!(timestamp.map(|t| (t.hour(), t.minute())), Some((10, 11)));
    }

    #[test]
    fn unparseable_time_is_dropped() {
        let event = classify(
            br##"{"nick":"nako","destination":"#nako","message-body":"hi","tags":{"time":"soon"}}"##,
        );
        assert!(matches!(event, ChatEvent::PrivateMessage { timestamp: None, .. }));
    }

    #[test]
    fn non_string_time_is_dropped() {
        let event = classify(
            br##"{"nick":"nako","destination":"#nako","message-body":"hi","tags":{"time":1700000000}}"##,
        );
        assert_eq!(event, ChatEvent::PrivateMessage {
            nick: "nako".into(),
            destination: "#nako".into(),
            body: "hi".into(),
            timestamp: None,
        });
    }

    #[test]
    fn null_fields_are_absent() {
        let event = classify(
            br##"{"nick":"nako","destination":"#nako","message-body":"hi","code":null,"arguments":null,"raw":null,"tags":null}"##,
        );
        assert!(matches!(event, ChatEvent::PrivateMessage { timestamp: None, .. }));

        let event = classify(br##"{"nick":"nako","code":"JOIN","arguments":null}"##);
        assert_eq!(event, ChatEvent::ClassificationError {
            error: ClassifyError::MissingArgument { code: "JOIN".into(), index: 0 }
        });
    }

    #[test]
    fn join_event() {
        let event = classify(br##"{"nick":"nako","code":"JOIN","arguments":["#nako"]}"##);
        assert_eq!(event, ChatEvent::JoinEvent { nick: "nako".into(), channel: "#nako".into() });
    }

    #[test]
    fn topic_reply() {
        let event =
            classify(br##"{"code":"332","arguments":["you","#nako","welcome home"]}"##);
        assert_eq!(event, ChatEvent::TopicReply {
            channel: "#nako".into(),
            topic: "welcome home".into()
        });
    }

    #[test]
    fn names_reply_keeps_raw_order() {
        let event =
            classify(br##"{"code":"353","arguments":["you","=","#nako","@nako ~root b"]}"##);
        assert_eq!(event, ChatEvent::NamesReply {
            channel: "#nako".into(),
            names: vec!["@nako".into(), "~root".into(), "b".into()],
        });
    }

    #[test]
    fn reply_missing_argument() {
        let event = classify(br##"{"code":"332","arguments":["you","#nako"]}"##);
        assert_eq!(event, ChatEvent::ClassificationError {
            error: ClassifyError::MissingArgument { code: "332".into(), index: 2 }
        });
    }

    #[test]
    fn empty_body_is_no_body() {
        let event = classify(br#"{"nick":"nako","code":"PING"}"#);
        assert!(matches!(
            event,
            ChatEvent::ClassificationError { error } if error.is_no_body()
        ));
        assert!(matches!(
            classify(b"  \n"),
            ChatEvent::ClassificationError { error: ClassifyError::NoBody }
        ));
    }

    #[test]
    fn body_without_destination_is_raw_line() {
        assert_eq!(classify(br#"{"message-body":"server notice"}"#), ChatEvent::RawLine {
            text: "server notice".into()
        });
        assert_eq!(
            classify(br#"{"message-body":"x","raw":":irc NOTICE * :x"}"#),
            ChatEvent::RawLine { text: ":irc NOTICE * :x".into() }
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(classify(b"hello there\n"), ChatEvent::RawLine { text: "hello there".into() });
    }

    #[test]
    fn malformed_payloads() {
        assert!(matches!(
            classify(b"{not json"),
            ChatEvent::ClassificationError { error: ClassifyError::Malformed(_) }
        ));
        assert!(matches!(
            classify(&[0xff, 0xfe]),
            ChatEvent::ClassificationError { error: ClassifyError::Malformed(_) }
        ));
        assert!(matches!(
            classify(br#"{"arguments":"not a list"}"#),
            ChatEvent::ClassificationError { error: ClassifyError::Malformed(_) }
        ));
    }

    #[test]
    fn event_channel() {
        let event = ChatEvent::TopicReply { channel: "#a".into(), topic: String::new() };
        assert_eq!(event.channel(), Some("#a"));
        assert_eq!(ChatEvent::RawLine { text: "x".into() }.channel(), None);
    }
}
