//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{DatabaseId, TransactionId},
    transaction::amount::Amount,
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The magnitude of money spent or earned in this transaction, never negative.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "crate::date_format")]
    pub date: Date,
    /// Whether money was earned (`true`) or spent (`false`).
    pub is_income: bool,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability. The transaction
    /// is an expense unless [TransactionBuilder::is_income] is set.
    pub fn build(amount: Amount, date: Date, description: &str) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: description.to_owned(),
            is_income: false,
        }
    }

    /// The transaction's contribution to a balance: `+amount` for income and
    /// `-amount` for expenses.
    pub fn signed_amount(&self) -> f64 {
        if self.is_income {
            self.amount
        } else {
            -self.amount
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The builder holds an already validated [Amount], so every transaction
/// written to the database has a non-negative magnitude.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// use crate::transaction::{Amount, Transaction};
///
/// let salary = Transaction::build(Amount::new(5000.0)?, date!(2025 - 04 - 17), "Salary")
///     .is_income(true);
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The magnitude of the transaction.
    pub amount: Amount,

    /// The date when the transaction occurred.
    pub date: Date,

    /// A human-readable description of the transaction.
    ///
    /// # Examples
    /// - `"Salary"`
    /// - `"Shopping"`
    pub description: String,

    /// Whether the transaction adds to (`true`) or subtracts from (`false`) the balance.
    pub is_income: bool,
}

impl TransactionBuilder {
    /// Set whether the transaction is income.
    pub fn is_income(mut self, is_income: bool) -> Self {
        self.is_income = is_income;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (description, amount, date, is_income)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, description, amount, date, is_income",
        )?
        .query_row(
            params![
                builder.description,
                builder.amount.as_f64(),
                builder.date,
                builder.is_income,
            ],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, description, amount, date, is_income FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Replace every field of the transaction `id` with the fields in `builder`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "UPDATE \"transaction\" \
            SET description = ?1, amount = ?2, date = ?3, is_income = ?4 \
            WHERE id = ?5 \
            RETURNING id, description, amount, date, is_income",
        )?
        .query_row(
            params![
                builder.description,
                builder.amount.as_f64(),
                builder.date,
                builder.is_income,
                id,
            ],
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
            error => error.into(),
        })
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    match rows_affected {
        0 => Err(Error::DeleteMissingTransaction),
        _ => Ok(()),
    }
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                date TEXT NOT NULL,
                is_income INTEGER NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Date range queries back the summary and calendar endpoints.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let date = row.get(3)?;
    let is_income = row.get(4)?;

    Ok(Transaction {
        id,
        description,
        amount,
        date,
        is_income,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Amount, Transaction, count_transactions, create_transaction, delete_transaction,
            get_transaction, update_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(Amount::new_unchecked(5000.0), date!(2025 - 04 - 17), "Salary")
                .is_income(true),
            &conn,
        );

        match result {
            Ok(transaction) => assert_eq!(
                transaction,
                Transaction {
                    id: 1,
                    description: "Salary".to_owned(),
                    amount: 5000.0,
                    date: date!(2025 - 04 - 17),
                    is_income: true,
                }
            ),
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn get_returns_created_transaction() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build(Amount::new_unchecked(120.0), date!(2025 - 04 - 18), "Shopping"),
            &conn,
        )
        .expect("Could not create transaction");

        let got = get_transaction(created.id, &conn).expect("Could not get transaction");

        assert_eq!(got, created);
        assert!(!got.is_income);
    }

    #[test]
    fn get_missing_transaction_is_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn update_replaces_fields() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build(Amount::new_unchecked(1.23), date!(2025 - 10 - 27), "test"),
            &conn,
        )
        .expect("Could not create transaction");

        let updated = update_transaction(
            created.id,
            Transaction::build(Amount::new_unchecked(3.21), date!(2025 - 10 - 28), "foo")
                .is_income(true),
            &conn,
        )
        .expect("Could not update transaction");

        let want = Transaction {
            id: created.id,
            description: "foo".to_owned(),
            amount: 3.21,
            date: date!(2025 - 10 - 28),
            is_income: true,
        };
        assert_eq!(updated, want);
        assert_eq!(get_transaction(created.id, &conn), Ok(want));
    }

    #[test]
    fn update_missing_transaction_fails() {
        let conn = get_test_connection();

        let result = update_transaction(
            7,
            Transaction::build(Amount::new_unchecked(1.0), date!(2025 - 10 - 28), "foo"),
            &conn,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build(Amount::new_unchecked(1.23), date!(2025 - 10 - 26), "Test"),
            &conn,
        )
        .expect("Could not create transaction");

        delete_transaction(created.id, &conn).expect("Could not delete transaction");

        assert_eq!(get_transaction(created.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_transaction_fails() {
        let conn = get_test_connection();

        assert_eq!(
            delete_transaction(1, &conn),
            Err(Error::DeleteMissingTransaction)
        );
    }

    #[test]
    fn negative_amounts_violate_table_constraint() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(Amount::new_unchecked(-5.0), date!(2025 - 10 - 26), "Refund"),
            &conn,
        );

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let today = date!(2025 - 10 - 05);
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build(Amount::new_unchecked(i as f64), today, ""),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }

    #[test]
    fn signed_amount_follows_income_flag() {
        let income = Transaction {
            id: 1,
            description: "Salary".to_owned(),
            amount: 5000.0,
            date: date!(2025 - 04 - 17),
            is_income: true,
        };
        let expense = Transaction {
            is_income: false,
            ..income.clone()
        };

        assert_eq!(income.signed_amount(), 5000.0);
        assert_eq!(expense.signed_amount(), -5000.0);
    }
}
