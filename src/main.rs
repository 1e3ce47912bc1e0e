//! YGO Pool - legal card pool snapshot server
//!
//! Starts the HTTP API straight away, builds the first snapshot in the
//! background and optionally rebuilds it on a fixed interval.

use clap::Parser;
use std::time::Instant;
use tokio::time::interval;

use ygo_pool::{Args, Config, HttpSources, SnapshotBuilder, SnapshotStore};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!("Server is starting up on port {}...", config.port);

    let store = SnapshotStore::new();
    let builder = SnapshotBuilder::from_config(HttpSources::from_config(&config), &config);

    let build_store = store.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let started = Instant::now();
        if let Err(e) = builder.build_and_publish(&build_store).await {
            log::error!("Could not build the card pool: {}", e);
            std::process::exit(1);
        }
        log::info!(
            "Server finished starting up! Took {:.2} seconds.",
            started.elapsed().as_secs_f64()
        );

        if let Some(every) = refresh_interval {
            log::info!("Rebuilding the card pool every {} hour(s)", every.as_secs() / 3600);
            let mut ticker = interval(every);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                log::info!("Scheduled rebuild triggered");
                if let Err(e) = builder.build_and_publish(&build_store).await {
                    log::error!("Scheduled rebuild failed, keeping previous snapshot: {}", e);
                }
            }
        }
    });

    if let Err(e) = ygo_pool::web::serve(store, config.port, &config.allowed_origins).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
