//! Gantry driver daemon
//!
//! Polls the game-state service for newly committed moves, plans each
//! one as a controller choreography and executes it over serial.
//! Moves are strictly serialized: planning of move N+1 never starts
//! before move N has completed or failed.

use tracing::{error, info, warn};

use gantry_core::DiscardPile;
use gantry_driver::config::Config;
use gantry_driver::dispatch::Dispatcher;
use gantry_driver::moves::GameClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = Config::load()?;
    info!(
        api = %config.api_base_url,
        port = %config.serial_port,
        plays_white = config.plays_white,
        "Driver config loaded"
    );

    let client = GameClient::new(&config)?;
    let mut dispatcher = Dispatcher::connect(&config).await;
    if dispatcher.is_simulated() {
        info!("No controller attached; actions will be logged only");
    }

    let mut discards = DiscardPile::new();
    let mut cursor = 0usize;

    #[cfg(unix)]
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    let poll_interval = std::time::Duration::from_millis(config.poll_interval_ms);
    info!("Polling for committed moves");

    loop {
        // A choreography must never be interrupted once a piece is in
        // the gripper, so shutdown is only honored here, between moves.
        #[cfg(unix)]
        {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down");
                    break;
                }
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }
        #[cfg(not(unix))]
        tokio::time::sleep(poll_interval).await;

        let moves = match client.fetch_moves().await {
            Ok(moves) => moves,
            Err(e) => {
                warn!(error = %e, "Move poll failed");
                continue;
            }
        };

        if moves.len() < cursor {
            info!("Move list shrank, assuming a new game");
            cursor = 0;
            discards.reset();
        }

        while cursor < moves.len() {
            let record = &moves[cursor];
            cursor += 1;

            // Upstream policy: play out our own color plus coach-issued moves.
            if record.is_white != config.plays_white && record.source != "coach" {
                continue;
            }

            let request = record.to_request();
            let choreography = match gantry_core::plan(&request, &mut discards) {
                Ok(c) => c,
                Err(e) => {
                    error!(from = %record.from, to = %record.to, error = %e, "Planning failed");
                    continue;
                }
            };

            info!(
                from = %record.from,
                to = %record.to,
                capture = record.is_capture,
                castle = record.is_castle,
                promotion = record.is_promotion,
                actions = choreography.len(),
                "Executing move"
            );

            match dispatcher.execute(&choreography).await {
                Ok(()) => info!(from = %record.from, to = %record.to, "Move executed"),
                // A partially executed move leaves the board in an
                // unknown physical state; surfaced, never retried.
                Err(e) => {
                    error!(
                        from = %record.from,
                        to = %record.to,
                        error = %e,
                        "Move execution failed, board may need manual correction"
                    );
                }
            }
        }
    }

    Ok(())
}
