//! Defines the core data models and database queries for transactions.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AppState, ColumnValue, Error};

// ============================================================================
// MODELS
// ============================================================================

/// A financial record owned by a user, as it is sent to clients.
///
/// The `timestamp` field is read from the `time` column. Every field keeps
/// the SQL type it was stored with, so rows written by other programs are
/// returned unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The unique, client chosen ID of the transaction.
    pub transaction_id: ColumnValue,
    /// The ID of the user the transaction belongs to.
    pub user_id: ColumnValue,
    /// The amount of money in the transaction.
    pub amount: ColumnValue,
    /// A free-form label, e.g. "DEBIT" or "CREDIT".
    pub transaction_type: ColumnValue,
    /// When the transaction happened, exactly as the client sent it.
    pub timestamp: ColumnValue,
    /// A free-form status, e.g. "PENDING" or "COMPLETED".
    pub status: ColumnValue,
}

/// The fields a client sends to create a [Transaction].
///
/// None of the fields are checked here. Missing fields are `NULL` and are
/// rejected by the table's constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTransaction {
    /// The unique ID of the transaction.
    pub transaction_id: ColumnValue,
    /// The ID of the owning user.
    pub user_id: ColumnValue,
    /// The amount of money in the transaction.
    pub amount: ColumnValue,
    /// A free-form label for the kind of transaction.
    pub transaction_type: ColumnValue,
    /// When the transaction happened, stored in the `time` column.
    pub timestamp: ColumnValue,
    /// The initial status of the transaction.
    pub status: ColumnValue,
}

impl From<Value> for NewTransaction {
    /// Read the fields from a request body.
    ///
    /// A body that is not a JSON object has no fields, so every field is `NULL`.
    fn from(body: Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
            _ => NewTransaction::default(),
        }
    }
}

// ============================================================================
// STATE
// ============================================================================

/// The state needed by the transaction route handlers.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

impl TransactionState {
    /// Take the lock on the shared database connection.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock is poisoned.
    pub fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The number of rows changed by an `INSERT` or `UPDATE`.
pub type RowsAffected = usize;

const SELECT_TRANSACTION: &str =
    "SELECT transaction_id, user_id, amount, transaction_type, time AS timestamp, status \
    FROM transactions";

/// Insert a new transaction into the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if SQLite rejects the row,
/// e.g. when `transaction_id` is already taken or a field is missing.
pub fn create_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO transactions (transaction_id, user_id, amount, transaction_type, time, status)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            transaction.transaction_id,
            transaction.user_id,
            transaction.amount,
            transaction.transaction_type,
            transaction.timestamp,
            transaction.status,
        ],
    )?;

    Ok(())
}

/// Retrieve a transaction from the database by its `transaction_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `transaction_id` does not refer to a stored transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(transaction_id: &str, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} WHERE transaction_id = :transaction_id"
        ))?
        .query_row(
            &[(":transaction_id", &transaction_id)],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all transactions, or only those of `user_id` if it is given.
///
/// Transactions are returned in the table's natural order.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn list_transactions(
    user_id: Option<&str>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let transactions = match user_id {
        Some(user_id) => connection
            .prepare(&format!("{SELECT_TRANSACTION} WHERE user_id = :user_id"))?
            .query_map(&[(":user_id", &user_id)], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?,
        None => connection
            .prepare(SELECT_TRANSACTION)?
            .query_map([], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(transactions)
}

/// Set the status of the transaction with `transaction_id`.
///
/// Returns the number of rows changed, which is zero if no transaction has
/// the given ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn update_transaction_status(
    transaction_id: &str,
    status: &ColumnValue,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE transactions SET status = ?1 WHERE transaction_id = ?2",
            params![status, transaction_id],
        )
        .map_err(Error::from)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(*) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                transaction_id TEXT PRIMARY KEY NOT NULL,
                user_id TEXT NOT NULL,
                amount NUMERIC NOT NULL,
                transaction_type TEXT NOT NULL,
                time TEXT NOT NULL,
                status TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let transaction_id = row.get(0)?;
    let user_id = row.get(1)?;
    let amount = row.get(2)?;
    let transaction_type = row.get(3)?;
    let timestamp = row.get(4)?;
    let status = row.get(5)?;

    Ok(Transaction {
        transaction_id,
        user_id,
        amount,
        transaction_type,
        timestamp,
        status,
    })
}

// ============================================================================
// TESTS
// ============================================================================
