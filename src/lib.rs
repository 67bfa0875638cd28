//! A small JSON web service for recording financial transactions.
//!
//! Transactions are stored in a single SQLite table and exposed through a
//! REST API for listing, fetching, creating and updating the status of
//! transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod column_value;
mod db;
pub mod endpoints;
mod error;
mod loose_json;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use column_value::ColumnValue;
pub use db::initialize as initialize_db;
pub use error::{Error, Operation, OperationError};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, Transaction, create_transaction, get_transaction, list_transactions,
    update_transaction_status,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
