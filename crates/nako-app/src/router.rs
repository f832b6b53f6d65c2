//! Bus-to-application translation layer.
//!
//! The [`Router`] sits between the bus transport and the [`crate::App`]. It
//! owns the topic layout, the colour allocator and the outbound queue.
//!
//! # Responsibilities
//!
//! - Classifies inbound payloads and formats them into [`LogLine`]s, dropping
//!   events that are outside the channel filter or not meaningful for the
//!   topic they arrived on.
//! - Converts protocol-level [`AppAction`]s into [`Outbound`] publishes.
//! - Queues the subscriptions and bootstrap commands issued on connect.
//! - Accumulates outbound requests to be executed by the driver in the next
//!   I/O cycle.

use chrono::NaiveDateTime;

use crate::{
    AppAction, AppEvent, ConnectionState, LogLine,
    bus::{BusEvent, Outbound, Topics},
    classify::{ChatEvent, classify},
    codec::irc_to_ansi,
    colour::{ColourAllocator, highlight, paint},
    error::RouterError,
    message::BusMessage,
    names::colour_names,
};

/// Router configuration, fixed for the lifetime of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Topic namespace prefix.
    pub topic_root: String,
    /// Client id, sent as the `module` of outgoing chat.
    pub module: String,
    /// Channel filter. Empty accepts every channel.
    pub channels: Vec<String>,
    /// Render join events.
    pub show_joins: bool,
    /// Words that highlight a chat line when contained in its body.
    pub highlights: Vec<String>,
    /// Publish JOIN/TOPIC/NAMES for the configured channels on connect.
    pub bootstrap: bool,
}

impl RouterConfig {
    /// Configuration with bootstrap enabled and no filters.
    pub fn new(topic_root: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            topic_root: topic_root.into(),
            module: module.into(),
            channels: Vec::new(),
            show_joins: false,
            highlights: Vec::new(),
            bootstrap: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InboundKind {
    Chat,
    Raw,
}

/// Bridge between the bus and the App.
#[derive(Debug)]
pub struct Router {
    topics: Topics,
    config: RouterConfig,
    colours: ColourAllocator,
    outgoing: Vec<Outbound>,
}

impl Router {
    /// Create a router. Empty highlight words are discarded.
    pub fn new(mut config: RouterConfig, colours: ColourAllocator) -> Self {
        config.highlights.retain(|word| !word.is_empty());
        let topics = Topics::new(&config.topic_root);
        Self { topics, config, colours, outgoing: Vec::new() }
    }

    /// Topic layout in use.
    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    /// Active configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Dispatch a transport notification.
    pub fn handle_bus_event(&mut self, event: BusEvent, now: NaiveDateTime) -> Vec<AppEvent> {
        match event {
            BusEvent::Connected => self.on_connect(now),
            BusEvent::Disconnected { reason } => self.on_disconnect(&reason, now),
            BusEvent::Reconnecting => self.on_reconnecting(now),
            BusEvent::Message { topic, payload } => self.handle_inbound(&topic, &payload, now),
        }
    }

    /// Broker connection established: subscribe and bootstrap.
    pub fn on_connect(&mut self, now: NaiveDateTime) -> Vec<AppEvent> {
        let mut events = vec![
            AppEvent::Connection(ConnectionState::Connected),
            line(now, "connected to broker"),
        ];

        for topic in self.topics.subscriptions() {
            self.outgoing.push(Outbound::Subscribe { topic: topic.to_owned() });
            events.push(line(now, format!("subscription to {topic} requested")));
        }

        if self.config.bootstrap && !self.config.channels.is_empty() {
            let raw_output = &self.topics.raw_output;
            self.outgoing
                .push(Outbound::publish(raw_output, format!("JOIN {}", self.config.channels.join(","))));
            for channel in &self.config.channels {
                self.outgoing.push(Outbound::publish(raw_output, format!("TOPIC {channel}")));
                self.outgoing.push(Outbound::publish(raw_output, format!("NAMES {channel}")));
            }
        }

        tracing::info!(bootstrap = self.config.bootstrap, "connected to broker");
        events
    }

    /// Broker connection lost.
    pub fn on_disconnect(&mut self, reason: &str, now: NaiveDateTime) -> Vec<AppEvent> {
        tracing::warn!(%reason, "connection to broker lost");
        vec![
            AppEvent::Connection(ConnectionState::Disconnected),
            line(now, format!("connection to broker lost: {reason}")),
        ]
    }

    /// Transport is retrying the connection.
    pub fn on_reconnecting(&mut self, now: NaiveDateTime) -> Vec<AppEvent> {
        vec![
            AppEvent::Connection(ConnectionState::Connecting),
            line(now, "attempting to reconnect to broker"),
        ]
    }

    /// Classify and format a message received on `topic`.
    pub fn handle_inbound(
        &mut self,
        topic: &str,
        payload: &[u8],
        now: NaiveDateTime,
    ) -> Vec<AppEvent> {
        let kind = if topic == self.topics.input {
            InboundKind::Chat
        } else if topic == self.topics.raw_input {
            InboundKind::Raw
        } else {
            tracing::warn!(topic, "message on unexpected topic");
            return vec![line(now, format!("unexpected message on {topic}"))];
        };

        let event = classify(payload);

        if let Some(channel) = event.channel()
            && !self.accepts(channel)
        {
            tracing::trace!(channel, "dropping event outside channel filter");
            return vec![];
        }

        self.render_event(kind, event, now).into_iter().map(AppEvent::Line).collect()
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction, now: NaiveDateTime) -> Vec<AppEvent> {
        match action {
            AppAction::SendMessage { channel, body } => match self.publish_chat(&channel, &body) {
                Ok(()) => vec![],
                Err(e) => {
                    tracing::warn!(error = %e, "chat message not sent");
                    vec![line(now, e.to_string())]
                },
            },
            AppAction::RequestHistory { channel, count } => {
                self.publish_raw(format!("CHATHISTORY LATEST {channel} * {count}"));
                vec![]
            },
            AppAction::RequestTopic { channel } => {
                self.publish_raw(format!("TOPIC {channel}"));
                vec![]
            },
            AppAction::RequestNames { channel } => {
                self.publish_raw(format!("NAMES {channel}"));
                vec![]
            },
            AppAction::Render | AppAction::Quit => vec![],
        }
    }

    /// Take pending outbound requests.
    pub fn take_outgoing(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outgoing)
    }

    fn accepts(&self, channel: &str) -> bool {
        self.config.channels.is_empty() || self.config.channels.iter().any(|c| c == channel)
    }

    fn render_event(
        &mut self,
        kind: InboundKind,
        event: ChatEvent,
        now: NaiveDateTime,
    ) -> Option<LogLine> {
        match (kind, event) {
            (_, ChatEvent::ClassificationError { error }) if error.is_no_body() => None,
            (_, ChatEvent::ClassificationError { error }) => {
                tracing::debug!(%error, "unclassifiable message");
                Some(LogLine::at(now, error.to_string()))
            },
            (InboundKind::Chat, ChatEvent::PrivateMessage { nick, body, timestamp, .. }) => {
                let id = self.colours.allocate(&nick);
                let text = format!("{nick}: {body}");
                let styled = if self.is_highlighted(&body) {
                    highlight(id, &text)
                } else {
                    paint(id, &text)
                };
                Some(LogLine::at(timestamp.unwrap_or(now), irc_to_ansi(&styled)))
            },
            (InboundKind::Chat, ChatEvent::RawLine { text }) => {
                Some(LogLine::at(now, irc_to_ansi(&text)))
            },
            (InboundKind::Raw, ChatEvent::JoinEvent { nick, channel }) => {
                if !self.config.show_joins {
                    return None;
                }
                let id = self.colours.allocate(&nick);
                Some(LogLine::at(now, paint(id, &format!("-> {nick} joined {channel}"))))
            },
            (InboundKind::Raw, ChatEvent::TopicReply { channel, topic }) => Some(LogLine::at(
                now,
                format!("topic for {channel} is: \"{}\"", irc_to_ansi(&topic)),
            )),
            (InboundKind::Raw, ChatEvent::NamesReply { channel, names }) => {
                let coloured = colour_names(&names, &mut self.colours);
                Some(LogLine::at(now, format!("In {channel} are: {coloured}")))
            },
            (kind, event) => {
                tracing::trace!(?kind, ?event, "event not displayed on this topic");
                None
            },
        }
    }

    fn is_highlighted(&self, body: &str) -> bool {
        self.config.highlights.iter().any(|word| body.contains(word.as_str()))
    }

    fn publish_chat(&mut self, channel: &str, body: &str) -> Result<(), RouterError> {
        let message = BusMessage::chat(&self.config.module, channel, body);
        let payload = serde_json::to_string(&message)?;
        self.outgoing.push(Outbound::publish(&self.topics.input, payload.clone()));
        self.outgoing.push(Outbound::publish(&self.topics.output, payload));
        Ok(())
    }

    fn publish_raw(&mut self, command: String) {
        self.outgoing.push(Outbound::publish(&self.topics.raw_output, command));
    }
}

fn line(now: NaiveDateTime, text: impl Into<String>) -> AppEvent {
    AppEvent::Line(LogLine::at(now, text))
}
