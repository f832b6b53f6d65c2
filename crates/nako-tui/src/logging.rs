//! Logging initialization.
//!
//! The terminal belongs to the UI, so logs only go to a file. Without a log
//! file no subscriber is installed and events are discarded.

use std::{fs::File, io, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a file subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(path: &Path, level: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false).with_target(true))
        .with(filter)
        .init();

    Ok(())
}
