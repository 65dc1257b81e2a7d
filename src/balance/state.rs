//! State shared by the summary and calendar endpoints.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::Connection;
use time::Date;

use crate::{AppState, Error, period::Period, timezone::local_today};

/// The state needed to summarise transactions.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The balance before the first transaction.
    pub starting_balance: f64,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl SummaryState {
    pub(crate) fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }

    /// Today's date in the local timezone.
    pub(crate) fn today(&self) -> Result<Date, Error> {
        local_today(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })
    }

    /// Pick the date to summarise from an explicit date, a month, or today.
    ///
    /// A month resolves to its first day.
    ///
    /// # Errors
    /// Returns [Error::InvalidRequest] if both `date` and `month` are given.
    pub(crate) fn reference_date(
        &self,
        date: Option<Date>,
        month: Option<Period>,
    ) -> Result<Date, Error> {
        match (date, month) {
            (Some(_), Some(_)) => Err(Error::InvalidRequest(
                "use either the date or the month parameter, not both".to_owned(),
            )),
            (Some(date), None) => Ok(date),
            (None, Some(period)) => Ok(period.first_day()),
            (None, None) => self.today(),
        }
    }
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            starting_balance: state.starting_balance,
            local_timezone: state.local_timezone.clone(),
        }
    }
}
