//! Transaction records and their REST API.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model returned to clients and the `NewTransaction` body used to create one
//! - Database functions for storing, querying and updating transactions
//! - Route handlers for the transaction endpoints

mod core;
mod create_endpoint;
mod get_endpoint;
mod list_endpoint;
mod update_status_endpoint;

pub use self::core::{
    NewTransaction, Transaction, create_transaction, create_transaction_table, get_transaction,
    list_transactions, update_transaction_status,
};
pub use create_endpoint::create_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use update_status_endpoint::update_status_endpoint;
