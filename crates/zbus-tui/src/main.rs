//! zBus TUI entry point.

use std::{fs::File, sync::Mutex};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use zbus_app::Runtime;
use zbus_client::{ConnectionManager, transport::WebSocketTransport};
use zbus_tui::{Args, TerminalDriver, batch};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.session_config();

    if args.is_batch() {
        let events = batch::parse_events(&args.send)?;
        let mut connection = ConnectionManager::new(WebSocketTransport::new(), config.connection());

        tokio::select! {
            () = batch::send_all(&mut connection, &args.websocket, events) => {},
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::warn!("interrupted before all events were sent");
            },
        }
        return Ok(());
    }

    let driver = TerminalDriver::new(config.poll_interval)?;
    let runtime = Runtime::new(driver, WebSocketTransport::new(), args.websocket, &config);

    Ok(runtime.run().await?)
}

/// Batch mode logs to stderr. The interactive UI owns the terminal, so it
/// logs only to `--log-file`.
fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(layer).with(filter).init();
        },
        None if args.is_batch() => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing_subscriber::registry().with(layer).with(filter).init();
        },
        None => {},
    }
    Ok(())
}
