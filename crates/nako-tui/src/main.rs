//! nako entry point.

use clap::Parser;
use nako_app::ColourAllocator;
use nako_tui::{App, Args, BusOptions, Router, Runtime, TerminalDriver, logging, transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        logging::init(path, &args.log_level)?;
    }

    let (host, port) = args.broker_address()?;
    let colours = ColourAllocator::with_bound(args.color_seed, args.color_bound)?;
    let client_id = format!("nako_{}", rand::random::<u32>());

    tracing::info!(%client_id, %host, port, "nako starting");

    let router = Router::new(args.router_config(&client_id), colours);
    let app = App::new(args.broker.clone(), args.channel_list());
    let bus = transport::connect(BusOptions::new(client_id, host, port));
    let driver = TerminalDriver::new(bus)?;

    Ok(Runtime::new(driver, app, router).run().await?)
}
