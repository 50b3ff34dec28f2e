//! Server start-up: bind, build the router, and spawn `axum::serve`.

use std::path::PathBuf;
use std::sync::Arc;

use crate::routes::{self, AppState};
use crate::store::TaskStore;

/// Starts the server with an empty task store and no static directory,
/// returning the bound address and a join handle.
///
/// # Errors
///
/// Returns an error if the templates fail to compile or the TCP listener
/// cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let state = AppState::new(Arc::new(TaskStore::new()))?;
    start_server_with_state(addr, state, None).await
}

/// Starts the server with a pre-built [`AppState`].
///
/// This is the primary entry point used by both `main.rs` and test code.
/// Binding to port `0` lets the OS pick a free port; the returned address
/// is the one actually bound.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: AppState,
    static_dir: Option<PathBuf>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = routes::router(state, static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok((bound_addr, handle))
}
