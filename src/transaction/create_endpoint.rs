//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    Error, endpoints,
    transaction::{TransactionState, core::create_transaction, payload::TransactionPayload},
};

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created`, the new transaction as JSON, and a `Location`
/// header pointing at the new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!("rejected transaction body: {rejection}");
        Error::InvalidRequest(rejection.body_text())
    })?;

    let builder = payload.validate().map_err(Error::Validation)?;

    let connection = state.connection()?;
    let transaction = create_transaction(builder, &connection)?;

    tracing::info!(
        "created transaction {} for {} on {}",
        transaction.id,
        transaction.signed_amount(),
        transaction.date
    );

    let location = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(transaction)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            RawAmount, TransactionPayload, TransactionState, count_transactions,
            create_transaction_endpoint, get_transaction,
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
    async fn can_create_transaction() {
        let state = get_test_state();
        let payload = TransactionPayload {
            description: Some("test transaction".to_owned()),
            amount: Some(RawAmount::Number(12.3)),
            date: Some("2025-04-17".to_owned()),
            is_income: Some(true),
        };

        let response = create_transaction_endpoint(State(state.clone()), Ok(Json(payload)))
            .await
            .expect("could not create transaction");

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/api/transactions/1"
        );

        // We know the first transaction will have ID 1
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.description, "test transaction");
        assert!(transaction.is_income);
    }

    #[tokio::test]
    async fn invalid_amount_is_not_stored() {
        let state = get_test_state();
        let payload = TransactionPayload {
            description: Some("test transaction".to_owned()),
            amount: Some(RawAmount::Text("twelve".to_owned())),
            date: Some("2025-04-17".to_owned()),
            is_income: Some(false),
        };

        let result = create_transaction_endpoint(State(state.clone()), Ok(Json(payload))).await;

        assert!(matches!(result, Err(Error::Validation(errors)) if errors.len() == 1));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection), Ok(0));
    }
}
