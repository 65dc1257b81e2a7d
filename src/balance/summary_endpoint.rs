//! Endpoints that summarise balances for a month or for all time.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    balance::{
        SummaryState,
        aggregation::{MonthlyOverview, OverallSummary, monthly_overview, overall_summary},
    },
    period::Period,
    transaction::{get_all_transactions, get_transactions_up_to},
};

/// Selects the month to summarise.
#[derive(Debug, Default, Deserialize)]
pub struct MonthlySummaryQuery {
    /// Summarise the month containing this date, e.g. "2025-04-17".
    #[serde(default, with = "crate::date_format::option")]
    pub date: Option<Date>,
    /// Summarise this month, e.g. "2025-04".
    pub month: Option<Period>,
}

/// A route handler for the balance carried into a month and the month's totals.
///
/// Defaults to the current month in the server's timezone.
pub async fn get_monthly_summary_endpoint(
    State(state): State<SummaryState>,
    query: Result<Query<MonthlySummaryQuery>, QueryRejection>,
) -> Result<Json<MonthlyOverview>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let reference_date = state.reference_date(query.date, query.month)?;
    let period = Period::containing(reference_date);

    // Later months affect neither the running balance nor the month's totals.
    let transactions = get_transactions_up_to(period.last_day(), &*state.connection()?)?;

    tracing::debug!(
        "summarising {period} from {} transactions",
        transactions.len()
    );

    Ok(Json(monthly_overview(
        reference_date,
        state.starting_balance,
        &transactions,
    )))
}

/// A route handler for the totals across every transaction.
pub async fn get_overall_summary_endpoint(
    State(state): State<SummaryState>,
) -> Result<Json<OverallSummary>, Error> {
    let transactions = get_all_transactions(&*state.connection()?)?;

    Ok(Json(overall_summary(state.starting_balance, &transactions)))
}
