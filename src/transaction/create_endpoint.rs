//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error, Operation,
    loose_json::LooseJson,
    transaction::core::{NewTransaction, TransactionState, create_transaction},
};

/// A route handler for creating a new transaction, responds with 201 Created on success.
///
/// The body is not validated. Duplicate IDs, missing fields and bodies that
/// are not JSON objects are reported by SQLite and sent back as a 500 with
/// the error in the `details` field.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    LooseJson(body): LooseJson,
) -> Response {
    let transaction = NewTransaction::from(body);

    match insert(&state, &transaction) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Transaction created successfully" })),
        )
            .into_response(),
        Err(error) => error.during(Operation::CreateTransaction).into_response(),
    }
}

fn insert(state: &TransactionState, transaction: &NewTransaction) -> Result<(), Error> {
    let connection = state.lock_connection()?;

    create_transaction(transaction, &connection)
}
