//! Push-channel subscriber for the YOU-N-I-VERSE agent city.
//!
//! Connects to the engine's `/ws` endpoint and logs every message it
//! receives, one line each (or the raw JSON with `--json`). A lost
//! connection is retried on a fixed delay; after the attempt bound the
//! process exits with an error.

mod client;
mod error;
mod reconnect;
mod render;

use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::reconnect::{DEFAULT_MAX_ATTEMPTS, ReconnectPolicy};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "universe-watch", version, about = "Follow the agent city's push channel")]
struct Args {
    /// Push channel address.
    #[arg(long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,

    /// Milliseconds between reconnect attempts.
    #[arg(long, default_value_t = 3000)]
    retry_delay_ms: u64,

    /// Failed attempts allowed between successful connects.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Print each message as raw JSON instead of a summary line.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut policy =
        ReconnectPolicy::new(Duration::from_millis(args.retry_delay_ms), args.max_attempts);
    info!(url = %args.url, delay_ms = args.retry_delay_ms, "universe-watch starting");

    let json = args.json;
    let session = client::watch(&args.url, &mut policy, |event| {
        if json {
            match serde_json::to_string(&event) {
                Ok(line) => info!("{line}"),
                Err(e) => tracing::warn!(error = %e, "Failed to re-encode message"),
            }
        } else {
            info!("{}", render::describe(&event));
        }
    });

    tokio::select! {
        err = session => Err::<(), _>(err).context("push channel unavailable"),
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for interrupt")?;
            info!("Interrupted, exiting");
            Ok(())
        }
    }
}
