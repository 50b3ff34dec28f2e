//! Taskboard server -- a server-rendered task list.
//!
//! Seeds an in-memory task list from a directory of JSON task files, then
//! serves the listing (`GET /`), the add form (`GET /add`), and additions
//! (`POST /add`).
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:3000, reading ./saved-tasks
//! cargo run --bin taskboard
//!
//! # Custom address and task directory
//! cargo run --bin taskboard -- --bind 127.0.0.1:8080 --tasks-dir ./fixtures
//!
//! # Or via environment variables
//! TASKBOARD_ADDR=127.0.0.1:8080 TASKBOARD_TASKS_DIR=./fixtures cargo run --bin taskboard
//! ```

use std::sync::Arc;

use clap::Parser;
use taskboard_server::config::{ServerCliArgs, ServerConfig};
use taskboard_server::routes::AppState;
use taskboard_server::server;
use taskboard_server::store::TaskStore;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting taskboard server");

    // A failed load is not fatal: serve an empty list instead.
    let store = Arc::new(TaskStore::new());
    if let Err(e) = store.load(&config.tasks_dir).await {
        tracing::error!(error = %e, "failed to load tasks, starting with an empty list");
    }

    let state = match AppState::new(store) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to compile templates");
            std::process::exit(1);
        }
    };

    match server::start_server_with_state(&config.bind_addr, state, Some(config.static_dir)).await
    {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "taskboard server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start server");
            std::process::exit(1);
        }
    }
}
