//! Engine binary for the YOU-N-I-VERSE agent city.
//!
//! Wires together the city store, the tick loop, and the city API. It
//! loads configuration, seeds the founding city, and runs the loop until
//! the tick bound is reached or the process is interrupted.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `universe-config.yaml`
//! 3. Create the store and seed the four founders
//! 4. Create loop control from the tick interval and bound
//! 5. Start the city API server
//! 6. Run the simulation loop
//! 7. Log the result

mod error;
mod observer_callback;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use universe_city::{CityStore, seed_city};
use universe_core::runner::log_simulation_end;
use universe_core::{CityConfig, SimulationControl, run_simulation};
use universe_observer::{AppState, spawn_server};

use crate::error::EngineError;
use crate::observer_callback::ObserverCallback;

/// How long the API may take to close connections after the loop ends.
const SERVER_DRAIN: Duration = Duration::from_secs(5);

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "universe-engine", version, about = "Run the YOU-N-I-VERSE agent city")]
struct Args {
    /// Configuration file; defaults are used when it does not exist.
    #[arg(short, long, default_value = "universe-config.yaml")]
    config: PathBuf,

    /// Stop after this many ticks (0 runs until interrupted).
    #[arg(long, default_value_t = 0)]
    max_ticks: u64,

    /// RNG seed, overriding `simulation.seed`.
    #[arg(long)]
    seed: Option<u64>,
}

/// Application entry point for the engine.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    info!("universe-engine starting");

    // 2. Load configuration.
    let config = CityConfig::load_or_default(&args.config)?;
    info!(
        path = %args.config.display(),
        port = config.server.port,
        tick_interval_ms = config.simulation.tick_interval_ms,
        seed_city = config.simulation.seed_city,
        "Configuration loaded"
    );

    // 3. Create the store.
    let now = Utc::now();
    let mut city = CityStore::new(config.simulation.grid(), config.limits, now);
    if config.simulation.seed_city {
        let founders = seed_city(&mut city, now)?;
        info!(
            agents = city.agent_count(),
            buildings = city.building_count(),
            first_founder = %founders.alex,
            "Founding city seeded"
        );
    }
    let store = Arc::new(RwLock::new(city));

    // 4. Loop control.
    let control = Arc::new(SimulationControl::new(
        config.simulation.tick_interval_ms,
        args.max_ticks,
    ));

    // 5. Start the city API.
    let state = Arc::new(
        AppState::new(Arc::clone(&store), &config.broadcast).with_control(Arc::clone(&control)),
    );
    let server_control = Arc::clone(&control);
    let server = spawn_server(config.server.clone(), Arc::clone(&state), async move {
        server_control.shutdown_requested().await;
    })?;
    info!(port = config.server.port, "City API server started");

    let signal_control = Arc::clone(&control);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Interrupt received, shutting down"),
            Err(e) => warn!(error = %e, "Failed to listen for interrupt, shutting down"),
        }
        signal_control.request_shutdown();
    });

    // 6. Run the simulation.
    let mut rng = args
        .seed
        .or(config.simulation.seed)
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut callback = ObserverCallback::new(state);
    let result = run_simulation(
        store,
        &config.policy,
        Arc::clone(&control),
        &mut rng,
        &mut callback,
    )
    .await;

    // 7. Log results and stop the server.
    log_simulation_end(&result);
    // Open push connections hold graceful shutdown; give them a moment.
    control.request_shutdown();
    match tokio::time::timeout(SERVER_DRAIN, server).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "City API task ended abnormally"),
        Err(_) => warn!("City API did not drain in time, exiting"),
    }

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "universe-engine shutdown complete"
    );

    Ok(())
}
