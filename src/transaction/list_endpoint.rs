//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    period::{DateRange, Period},
    transaction::{
        Transaction, TransactionState,
        query::{get_all_transactions, get_transactions_in_range},
    },
};

/// The optional filters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only list the transactions on this day, e.g. "2025-04-17".
    #[serde(default, with = "crate::date_format::option")]
    pub date: Option<Date>,
    /// Only list the transactions in this month, e.g. "2025-04".
    pub month: Option<Period>,
}

/// A route handler for listing transactions sorted by date.
///
/// With no query parameters every transaction is listed. `date` narrows the
/// list to one day (the day selected on a calendar) and `month` to one
/// calendar month.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let range = match (query.date, query.month) {
        (Some(_), Some(_)) => {
            return Err(Error::InvalidRequest(
                "use either the date or the month parameter, not both".to_owned(),
            ));
        }
        (Some(date), None) => Some(DateRange::day(date)),
        (None, Some(period)) => Some(period.range()),
        (None, None) => None,
    };

    let connection = state.connection()?;

    let transactions = match range {
        Some(range) => get_transactions_in_range(range, &connection)?,
        None => get_all_transactions(&connection)?,
    };

    Ok(Json(transactions))
}
