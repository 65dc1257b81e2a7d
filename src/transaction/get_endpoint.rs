//! Defines the endpoint for getting a single transaction.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionState, core::get_transaction},
};

/// A route handler for getting a transaction by its database ID.
///
/// Responds with `404 Not Found` if the transaction does not exist.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = state.connection()?;

    get_transaction(transaction_id, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Amount, Transaction, TransactionState, create_transaction, get_transaction_endpoint,
        },
    };

    fn get_test_state() -> TransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn returns_transaction() {
        let state = get_test_state();
        let want = create_transaction(
            Transaction::build(Amount::new_unchecked(120.0), date!(2025 - 04 - 18), "Shopping"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let got = get_transaction_endpoint(State(state), Path(want.id))
            .await
            .expect("could not get transaction");

        assert_eq!(got.0, want);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = get_test_state();

        let result = get_transaction_endpoint(State(state), Path(99)).await;

        assert_eq!(result.map(|json| json.0), Err(Error::NotFound));
    }
}
