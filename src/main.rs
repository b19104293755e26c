//! SWAPI Console - print Star Wars API data on demand
//!
//! Starts a small HTTP server; every `GET /` fetches a character, starships,
//! planets, films and a vehicle (cached after the first fetch) and prints
//! them to the console. `GET /status` reports counters.

use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use swapi_console::cli::{Cli, Config};
use swapi_console::data::SwapiClient;
use swapi_console::logging;
use swapi_console::orchestrator::Orchestrator;
use swapi_console::server::TriggerServer;
use swapi_console::state::SharedState;
use swapi_console::ui::StdoutConsole;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    logging::init(config.verbose);
    info!(
        base_url = %config.base_url,
        timeout_ms = config.timeout_ms,
        verbose = config.verbose,
        "SWAPI Console v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let listen = config.listen;
    let state = SharedState::new(config);
    let client = SwapiClient::new(state)?;
    let orchestrator = Arc::new(Orchestrator::new(client, Arc::new(StdoutConsole)));

    let server = TriggerServer::start(listen, orchestrator).await?;
    info!("Trigger a cycle with: curl {}", server.trigger_url());

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    server.shutdown().await;

    Ok(())
}
