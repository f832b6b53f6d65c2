//! Bus vocabulary shared by the router and transports.
//!
//! The core never touches a broker client. Transports turn broker
//! notifications into [`BusEvent`]s and carry out [`Outbound`] requests.

/// Topic names derived from the configured root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    /// Chat lines from the bridge.
    pub input: String,
    /// Chat lines for the bridge to send.
    pub output: String,
    /// Raw protocol events from the bridge.
    pub raw_input: String,
    /// Raw protocol commands for the bridge to send.
    pub raw_output: String,
}

impl Topics {
    /// Topics under `root`. A trailing `/` on the root is ignored.
    pub fn new(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            input: format!("{root}/input"),
            output: format!("{root}/output"),
            raw_input: format!("{root}/raw/input"),
            raw_output: format!("{root}/raw/output"),
        }
    }

    /// Topics the client subscribes to.
    pub fn subscriptions(&self) -> [&str; 2] {
        [&self.input, &self.raw_input]
    }
}

/// Notifications from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// Broker acknowledged the connection.
    Connected,
    /// Connection failed or dropped.
    Disconnected {
        /// Transport error text.
        reason: String,
    },
    /// Transport is about to retry.
    Reconnecting,
    /// A message arrived on a subscribed topic.
    Message {
        /// Topic the message was published on.
        topic: String,
        /// Raw payload.
        payload: Vec<u8>,
    },
}

/// Requests for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Subscribe to a topic.
    Subscribe {
        /// Topic name.
        topic: String,
    },
    /// Publish a payload.
    Publish {
        /// Topic name.
        topic: String,
        /// Payload bytes.
        payload: Vec<u8>,
    },
}

impl Outbound {
    /// Publish a text payload.
    pub fn publish(topic: &str, payload: impl Into<String>) -> Self {
        Self::Publish { topic: topic.to_owned(), payload: payload.into().into_bytes() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_from_root() {
        let topics = Topics::new("/gowon");
        assert_eq!(topics.input, "/gowon/input");
        assert_eq!(topics.output, "/gowon/output");
        assert_eq!(topics.raw_input, "/gowon/raw/input");
        assert_eq!(topics.raw_output, "/gowon/raw/output");
        assert_eq!(Topics::new("/gowon/"), topics);
    }
}
