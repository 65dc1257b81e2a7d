use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{
        Transaction, TransactionState, core::update_transaction, payload::TransactionPayload,
    },
};

/// A route handler for replacing a transaction, responds with the updated transaction.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Json(payload) =
        payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let builder = payload.validate().map_err(Error::Validation)?;

    let connection = state.connection()?;

    match update_transaction(transaction_id, builder, &connection) {
        Ok(transaction) => Ok(Json(transaction)),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            Err(error)
        }
    }
}
