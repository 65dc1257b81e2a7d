//! Database queries that load snapshots of transactions.
//!
//! All queries return transactions sorted by date and then by ID, which is
//! the order the balance aggregator processes them in.

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    period::DateRange,
    transaction::core::{Transaction, map_transaction_row},
};

const SELECT_TRANSACTIONS: &str =
    "SELECT id, description, amount, date, is_income FROM \"transaction\"";

/// Get every transaction in the database.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let query = format!("{SELECT_TRANSACTIONS} ORDER BY date ASC, id ASC");

    connection
        .prepare(&query)?
        .query_map([], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

/// Get the transactions dated within `range`, including both ends.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn get_transactions_in_range(
    range: DateRange,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let query =
        format!("{SELECT_TRANSACTIONS} WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC, id ASC");

    connection
        .prepare(&query)?
        .query_map((range.start, range.end), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

/// Get the transactions dated on or before `end`.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn get_transactions_up_to(end: Date, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let query = format!("{SELECT_TRANSACTIONS} WHERE date <= ?1 ORDER BY date ASC, id ASC");

    connection
        .prepare(&query)?
        .query_map([end], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}
