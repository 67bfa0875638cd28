//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Operation, OperationError,
    transaction::core::{Transaction, TransactionState, list_transactions},
};

/// The query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    /// Only list the transactions of this user.
    ///
    /// An empty string is treated the same as no filter.
    pub user_id: Option<String>,
}

/// A route handler that responds with all transactions, optionally filtered by user.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, OperationError> {
    let user_id = query.user_id.as_deref().filter(|user_id| !user_id.is_empty());

    let connection = state
        .lock_connection()
        .map_err(|error| error.during(Operation::ListTransactions))?;

    list_transactions(user_id, &connection)
        .map(Json)
        .map_err(|error| error.during(Operation::ListTransactions))
}
