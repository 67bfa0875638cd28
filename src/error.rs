//! Defines the app level error type and how errors are turned into JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested transaction was not found.
    ///
    /// Internally, this error may occur when a query returns no rows or when
    /// an update does not affect any rows.
    #[error("the requested transaction could not be found")]
    NotFound,

    /// Any error reported by SQLite while executing a statement.
    ///
    /// The message of the inner error is passed on to the client as is.
    #[error(transparent)]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

/// The operation a request handler was performing when an [Error] occurred.
///
/// The operation decides the summary and the shape of the body of a failed
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing transactions, optionally filtered by user.
    ListTransactions,
    /// Fetching a single transaction by its ID.
    GetTransaction,
    /// Inserting a new transaction.
    CreateTransaction,
    /// Changing the status of an existing transaction.
    UpdateStatus,
}

impl Operation {
    fn failure_summary(self) -> &'static str {
        match self {
            Operation::ListTransactions => "Failed to fetch transactions",
            Operation::GetTransaction => "Failed to fetch transaction",
            Operation::CreateTransaction => "Failed to create transaction",
            Operation::UpdateStatus => "Failed to update transaction status",
        }
    }

    /// The JSON key that holds the underlying error message.
    fn detail_key(self) -> &'static str {
        match self {
            Operation::CreateTransaction => "details",
            _ => "message",
        }
    }
}

/// The message sent with every 404 response.
pub const NOT_FOUND_MESSAGE: &str = "Transaction not found";

/// Map an error raised during `operation` to the status code and body sent to the client.
///
/// A missing transaction is a 404 with a plain message. Everything else is a
/// 500 that carries the raw error message.
pub fn classify(error: &Error, operation: Operation) -> (StatusCode, Value) {
    match error {
        Error::NotFound => (
            StatusCode::NOT_FOUND,
            json!({ "message": NOT_FOUND_MESSAGE }),
        ),
        error => {
            tracing::error!("{}: {error}", operation.failure_summary());

            let mut body = serde_json::Map::new();
            body.insert("error".to_owned(), operation.failure_summary().into());
            body.insert(operation.detail_key().to_owned(), error.to_string().into());

            (StatusCode::INTERNAL_SERVER_ERROR, Value::Object(body))
        }
    }
}

/// An [Error] paired with the [Operation] that produced it, ready to be sent to the client.
#[derive(Debug)]
pub struct OperationError {
    /// What went wrong.
    pub error: Error,
    /// What the handler was doing.
    pub operation: Operation,
}

impl IntoResponse for OperationError {
    fn into_response(self) -> Response {
        let (status_code, body) = classify(&self.error, self.operation);

        (status_code, Json(body)).into_response()
    }
}

impl Error {
    /// Attach the failed `operation` so the error can be rendered as a response.
    pub fn during(self, operation: Operation) -> OperationError {
        OperationError {
            error: self,
            operation,
        }
    }
}
