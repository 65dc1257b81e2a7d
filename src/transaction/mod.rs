//! Transaction management for the budgeting application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Validation of client data into transactions
//! - Database functions for storing, querying, and managing transactions
//! - Route handlers for the transactions API

mod amount;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;
mod payload;
mod query;
mod state;

pub use amount::{Amount, RawAmount};
pub use core::{
    Transaction, TransactionBuilder, count_transactions, create_transaction,
    create_transaction_table, delete_transaction, get_transaction, map_transaction_row,
    update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use payload::{TransactionPayload, ValidationError, join_validation_errors};
pub use query::{get_all_transactions, get_transactions_in_range, get_transactions_up_to};

pub use state::TransactionState;
