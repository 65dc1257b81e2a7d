//! The endpoint for the per-day totals shown on a month calendar.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    balance::{
        SummaryState,
        aggregation::{DailyTotal, daily_totals},
    },
    period::Period,
    transaction::get_transactions_in_range,
};

/// Selects the month to show on the calendar.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// The month to show, e.g. "2025-04".
    pub month: Option<Period>,
}

/// The days of a month that have transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    /// The month shown.
    pub period: Period,
    /// The previous month, for navigating back, or `None` for the first supported month.
    pub previous: Option<Period>,
    /// The next month, for navigating forward, or `None` for the last supported month.
    pub next: Option<Period>,
    /// One entry per day with at least one transaction.
    pub days: Vec<DailyTotal>,
}

/// A route handler for the per-day totals of a month, defaulting to the current month.
pub async fn get_calendar_endpoint(
    State(state): State<SummaryState>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Json<CalendarMonth>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let period = match query.month {
        Some(period) => period,
        None => Period::containing(state.today()?),
    };

    let transactions = get_transactions_in_range(period.range(), &*state.connection()?)?;

    Ok(Json(CalendarMonth {
        period,
        previous: period.previous(),
        next: period.next(),
        days: daily_totals(period, &transactions),
    }))
}
