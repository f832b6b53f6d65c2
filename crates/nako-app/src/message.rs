//! Bus wire payload.
//!
//! Structured messages travel as flat JSON objects. Every field is optional
//! when decoding and `null` counts as absent; empty fields are left out when
//! encoding. Tag values that are not strings are dropped.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Format of the `time` tag attached by the server.
pub const SERVER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Tag key carrying the server timestamp.
pub const TIME_TAG: &str = "time";

/// Nick used for messages sent from this client.
pub const LOCAL_NICK: &str = "you";

/// A chat or protocol event as published on the bus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusMessage {
    /// Publishing module or client id.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub module: String,
    /// Originating nickname.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub nick: String,
    /// Target channel or user.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub destination: String,
    /// Chat text.
    #[serde(
        rename = "message-body",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub body: String,
    /// Protocol command or numeric reply code (`JOIN`, `332`, ...).
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub code: String,
    /// Positional protocol arguments.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub arguments: Vec<String>,
    /// Unparsed protocol line.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub raw: String,
    /// Message tags.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "string_tags")]
    pub tags: BTreeMap<String, String>,
}

impl BusMessage {
    /// Chat message sent by the local user.
    pub fn chat(module: &str, destination: &str, body: &str) -> Self {
        Self {
            module: module.to_owned(),
            nick: LOCAL_NICK.to_owned(),
            destination: destination.to_owned(),
            body: body.to_owned(),
            ..Self::default()
        }
    }

    /// Server timestamp from the `time` tag. `None` if absent or unparseable.
    pub fn server_time(&self) -> Option<NaiveDateTime> {
        let value = self.tags.get(TIME_TAG)?;
        NaiveDateTime::parse_from_str(value, SERVER_TIME_FORMAT).ok()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_tags<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(tags
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(value) => Some((key, value)),
            _ => None,
        })
        .collect())
}
