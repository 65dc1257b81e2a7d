use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{TransactionState, core::delete_transaction},
};

/// A route handler for deleting a transaction, responds with `204 No Content`.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    let connection = state.connection()?;

    delete_transaction(transaction_id, &connection).inspect_err(|error| {
        tracing::error!("Could not delete transaction {transaction_id}: {error}");
    })?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error, initialize_db,
        transaction::{
            Amount, Transaction, TransactionState, create_transaction,
            delete_transaction_endpoint, get_transaction,
        },
    };

    fn get_test_state() -> TransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();

        TransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let state = get_test_state();
        let transaction = create_transaction(
            Transaction::build(Amount::new_unchecked(1.23), date!(2025 - 10 - 26), "Test"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let status = delete_transaction_endpoint(State(state.clone()), Path(transaction.id)).await;

        assert_eq!(status, Ok(StatusCode::NO_CONTENT));
        assert_eq!(
            get_transaction(transaction.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn deleting_missing_transaction_fails() {
        let status = delete_transaction_endpoint(State(get_test_state()), Path(1)).await;

        assert_eq!(status, Err(Error::DeleteMissingTransaction));
    }
}
