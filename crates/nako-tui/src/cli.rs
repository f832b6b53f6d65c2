//! Command line and environment configuration.
//!
//! Every option can also be set through an environment variable so the
//! client can be configured from a container or service definition.

use std::path::PathBuf;

use clap::Parser;
use nako_app::{DEFAULT_COLOUR_BOUND, RouterConfig};
use thiserror::Error;

const DEFAULT_MQTT_PORT: u16 = 1883;
const TCP_SCHEME: &str = "tcp://";

/// Configuration errors detected before connecting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Broker address is not `host[:port]`.
    #[error("invalid broker address {address:?}: {reason}")]
    InvalidBroker {
        /// Address as given.
        address: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// nako terminal chat client
#[derive(Parser, Debug, Clone)]
#[command(name = "nako")]
#[command(about = "Terminal chat client for an IRC bridge on an MQTT bus")]
#[command(version)]
pub struct Args {
    /// Broker address (host:port)
    #[arg(short, long, env = "NAKO_BROKER", default_value = "localhost:1883")]
    pub broker: String,

    /// Topic namespace prefix
    #[arg(short, long, env = "NAKO_TOPIC_ROOT", default_value = "/gowon")]
    pub topic_root: String,

    /// Channels to join and display (comma separated)
    #[arg(short, long, env = "NAKO_CHANNELS", value_delimiter = ',')]
    pub channels: Vec<String>,

    /// Show channel joins
    #[arg(short = 'j', long, env = "NAKO_SHOW_JOINS")]
    pub show_joins: bool,

    /// Seed for nickname colours
    #[arg(
        short = 's',
        long = "color-seed",
        env = "NAKO_COLOUR_SEED",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub color_seed: i64,

    /// Exclusive upper bound of nickname colour indices (2-8)
    #[arg(short = 'B', long = "color-bound", env = "NAKO_COLOUR_BOUND", default_value_t = DEFAULT_COLOUR_BOUND)]
    pub color_bound: u8,

    /// Words that highlight a message (comma separated)
    #[arg(short = 'H', long, env = "NAKO_HIGHLIGHTS", value_delimiter = ',')]
    pub highlights: Vec<String>,

    /// Do not publish JOIN, TOPIC and NAMES after connecting
    #[arg(long, env = "NAKO_NO_BOOTSTRAP")]
    pub no_bootstrap: bool,

    /// Write logs to this file
    #[arg(long, env = "NAKO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Broker host and port. The port defaults to 1883.
    pub fn broker_address(&self) -> Result<(String, u16), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBroker {
            address: self.broker.clone(),
            reason: reason.to_owned(),
        };

        let address = self.broker.strip_prefix(TCP_SCHEME).unwrap_or(&self.broker);
        let (host, port) = match address.rsplit_once(':') {
            Some((host, port)) => {
                (host, port.parse().map_err(|_| invalid("port must be a number from 0 to 65535"))?)
            },
            None => (address, DEFAULT_MQTT_PORT),
        };

        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        Ok((host.to_owned(), port))
    }

    /// Channels with surrounding whitespace and empty entries removed.
    pub fn channel_list(&self) -> Vec<String> {
        clean(&self.channels)
    }

    /// Router settings for this client.
    pub fn router_config(&self, client_id: &str) -> RouterConfig {
        RouterConfig {
            channels: self.channel_list(),
            show_joins: self.show_joins,
            highlights: clean(&self.highlights),
            bootstrap: !self.no_bootstrap,
            ..RouterConfig::new(self.topic_root.clone(), client_id)
        }
    }
}

fn clean(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_owned).collect()
}
