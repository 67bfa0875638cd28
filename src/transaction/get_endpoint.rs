//! Defines the endpoint for fetching a single transaction.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Operation, OperationError,
    transaction::core::{Transaction, TransactionState, get_transaction},
};

/// A route handler for getting a transaction by its ID.
///
/// Responds with 404 Not Found if no transaction has the ID.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, OperationError> {
    let connection = state
        .lock_connection()
        .map_err(|error| error.during(Operation::GetTransaction))?;

    get_transaction(&transaction_id, &connection)
        .map(Json)
        .map_err(|error| error.during(Operation::GetTransaction))
}
