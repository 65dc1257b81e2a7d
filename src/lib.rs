//! Budget Calendar is the backend for a calendar-based personal finance tracker.
//!
//! This library provides a JSON REST API for recording income and expenses,
//! and for summarising them by calendar month: the balance carried in from
//! earlier months, and the income, expenses and net total of the month itself.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod balance;
mod database_id;
pub mod date_format;
mod db;
pub mod endpoints;
mod logging;
pub mod period;
mod routing;
mod timezone;
pub mod transaction;

pub use app_state::AppState;
pub use balance::{
    DailyTotal, MonthlyOverview, OverallSummary, PeriodSummary, daily_totals, monthly_overview,
    overall_summary, period_summary, running_balance_before,
};
pub use database_id::{DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::ValidationError;

use crate::transaction::join_validation_errors;

/// The starting balance used when none is configured.
pub const DEFAULT_STARTING_BALANCE: f64 = 50_000.0;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields of a transaction sent by a client were invalid.
    ///
    /// Invalid data is rejected here so that the balance calculations only
    /// ever see validated amounts and dates.
    #[error("invalid transaction: {}", join_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// An amount was not a finite, non-negative number.
    #[error("{0}")]
    InvalidAmount(String),

    /// A date was not a `YYYY-MM-DD` date or RFC 3339 date-time with a year from 0001 to 9999.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD or an RFC 3339 date-time")]
    InvalidDate(String),

    /// A month was not written as `YYYY-MM`.
    #[error("\"{0}\" is not a valid month, expected YYYY-MM")]
    InvalidPeriod(String),

    /// The request could not be understood, e.g. the body was not JSON or a
    /// query parameter could not be parsed.
    #[error("malformed request: {0}")]
    InvalidRequest(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Error::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "error": errors })),
            error @ (Error::InvalidAmount(_)
            | Error::InvalidDate(_)
            | Error::InvalidPeriod(_)
            | Error::InvalidRequest(_)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": error.to_string() }),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "The requested resource could not be found." }),
            ),
            Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Transaction not found" }),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
