//! Defines the endpoint for changing the status of a transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    ColumnValue, Error, Operation,
    loose_json::LooseJson,
    transaction::core::{RowsAffected, TransactionState, update_transaction_status},
};

/// A route handler for setting the status of a transaction.
///
/// Any value is accepted as the new status and is echoed back exactly as it
/// was sent. Responds with 404 Not Found if no transaction has the ID. No
/// transaction is created for an unknown ID.
pub async fn update_status_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
    body: LooseJson,
) -> Response {
    let status = body.field("status");

    match update(&state, &transaction_id, &ColumnValue::from(status.clone())) {
        Ok(0) => Error::NotFound
            .during(Operation::UpdateStatus)
            .into_response(),
        Ok(_) => Json(json!({
            "message": "Transaction status updated successfully",
            "status": status,
        }))
        .into_response(),
        Err(error) => error.during(Operation::UpdateStatus).into_response(),
    }
}

fn update(
    state: &TransactionState,
    transaction_id: &str,
    status: &ColumnValue,
) -> Result<RowsAffected, Error> {
    let connection = state.lock_connection()?;

    update_transaction_status(transaction_id, status, &connection)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::to_bytes,
        extract::{Path, State},
        http::StatusCode,
    };
    use serde_json::{Value, json};

    use crate::{
        ColumnValue,
        loose_json::LooseJson,
        transaction::core::{
            TransactionState, count_transactions, create_transaction, get_transaction,
            test_utils::{get_test_connection, new_transaction},
        },
    };

    use super::update_status_endpoint;

    fn get_test_state() -> TransactionState {
        let connection = get_test_connection();
        create_transaction(&new_transaction("t1", "u1", 10), &connection)
            .expect("could not create test transaction");

        TransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn updates_status() {
        let state = get_test_state();

        let response = update_status_endpoint(
            State(state.clone()),
            Path("t1".to_owned()),
            LooseJson(json!({ "status": "COMPLETED" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let connection = state.db_connection.lock().unwrap();
        let got = get_transaction("t1", &connection).expect("could not get transaction");
        assert_eq!(got.status, "COMPLETED");
    }

    #[tokio::test]
    async fn echoes_status_as_sent() {
        let state = get_test_state();

        let response = update_status_endpoint(
            State(state.clone()),
            Path("t1".to_owned()),
            LooseJson(json!({ "status": true })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");
        let body: Value = serde_json::from_slice(&body).expect("response is not JSON");
        assert_eq!(body["status"], json!(true));

        let connection = state.db_connection.lock().unwrap();
        let got = get_transaction("t1", &connection).expect("could not get transaction");
        assert_eq!(got.status, "1", "status column has TEXT affinity");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let state = get_test_state();

        let response = update_status_endpoint(
            State(state.clone()),
            Path("t2".to_owned()),
            LooseJson(json!({ "status": "COMPLETED" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_status_is_internal_server_error() {
        let state = get_test_state();

        let response = update_status_endpoint(
            State(state.clone()),
            Path("t1".to_owned()),
            LooseJson(Value::Null),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let connection = state.db_connection.lock().unwrap();
        let got = get_transaction("t1", &connection).expect("could not get transaction");
        assert_eq!(got.status, ColumnValue::from("PENDING"));
    }
}
