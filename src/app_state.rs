//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The balance before the first recorded transaction.
    pub starting_balance: f64,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if:
    /// - `starting_balance` is not finite ([Error::InvalidAmount]),
    /// - `local_timezone` is not a canonical timezone name ([Error::InvalidTimezoneError]),
    /// - or the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        starting_balance: f64,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        if !starting_balance.is_finite() {
            return Err(Error::InvalidAmount(format!(
                "starting balance must be a finite number, got {starting_balance}"
            )));
        }

        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            starting_balance,
            local_timezone: local_timezone.to_owned(),
        })
    }
}
