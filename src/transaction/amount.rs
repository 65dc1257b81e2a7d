//! The magnitude of a transaction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A non-negative, finite amount of money.
///
/// Whether the money was earned or spent is recorded separately on the
/// transaction, so an amount never carries a sign.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create a new amount.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `value` is not finite or is negative.
    pub fn new(value: f64) -> Result<Self, Error> {
        if !value.is_finite() {
            return Err(Error::InvalidAmount(format!(
                "{value} is not a finite number"
            )));
        }

        if value < 0.0 {
            return Err(Error::InvalidAmount(format!(
                "{value} is negative, use the income flag to record the direction of money"
            )));
        }

        // Normalise -0.0 so that it compares and serializes like 0.0.
        Ok(Self(value + 0.0))
    }

    /// Create an amount without validation.
    ///
    /// The caller must ensure `value` is finite and non-negative.
    pub fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// The amount as a float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse a plain decimal number, e.g. "5000" or "120.50".
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidAmount("amount is empty".to_owned()));
        }

        let value: f64 = trimmed
            .parse()
            .map_err(|_| Error::InvalidAmount(format!("\"{trimmed}\" is not a number")))?;

        Self::new(value)
    }
}

/// An amount as it arrives from a client, before validation.
///
/// Clients may send either a JSON number or a string holding a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A JSON number.
    Number(f64),
    /// A string that should contain a number.
    Text(String),
}

impl TryFrom<RawAmount> for Amount {
    type Error = Error;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        match raw {
            RawAmount::Number(value) => Amount::new(value),
            RawAmount::Text(text) => text.parse(),
        }
    }
}
