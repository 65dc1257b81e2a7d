//! Validation of transaction data sent by clients.
//!
//! Nothing reaches the database or the balance aggregator without passing
//! through [TransactionPayload::validate].

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    date_format::parse_date,
    transaction::{
        amount::{Amount, RawAmount},
        core::{Transaction, TransactionBuilder},
    },
};

/// A problem with one field of a client request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// The name of the field as it appears in the JSON body.
    pub field: &'static str,
    /// What is wrong with the field.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Join validation errors into a single line for logging.
pub fn join_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The JSON body for creating or replacing a transaction.
///
/// Every field is optional at this stage so that all missing fields can be
/// reported at once.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    /// Text detailing the transaction.
    pub description: Option<String>,
    /// The magnitude of the transaction, as a number or numeric string.
    pub amount: Option<RawAmount>,
    /// The date the transaction occurred.
    pub date: Option<String>,
    /// Whether the transaction is income.
    pub is_income: Option<bool>,
}

impl TransactionPayload {
    /// Check every field and convert the payload into a [TransactionBuilder].
    ///
    /// # Errors
    /// Returns one [ValidationError] per invalid or missing field.
    pub fn validate(self) -> Result<TransactionBuilder, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let description = match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => Some(description.to_owned()),
            _ => {
                errors.push(ValidationError::new("description", "Description is required"));
                None
            }
        };

        let amount = match self.amount.map(Amount::try_from) {
            Some(Ok(amount)) => Some(amount),
            Some(Err(error)) => {
                errors.push(ValidationError::new("amount", error.to_string()));
                None
            }
            None => {
                errors.push(ValidationError::new("amount", "Amount is required"));
                None
            }
        };

        let date = match self.date.as_deref().map(parse_date) {
            Some(Ok(date)) => Some(date),
            Some(Err(error)) => {
                errors.push(ValidationError::new("date", error.to_string()));
                None
            }
            None => {
                errors.push(ValidationError::new("date", "Date is required"));
                None
            }
        };

        if self.is_income.is_none() {
            errors.push(ValidationError::new("isIncome", "isIncome is required"));
        }

        match (description, amount, date, self.is_income) {
            (Some(description), Some(amount), Some(date), Some(is_income)) if errors.is_empty() => {
                Ok(Transaction::build(amount, date, &description).is_income(is_income))
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{
        Amount, Transaction,
        amount::RawAmount,
        payload::{TransactionPayload, ValidationError},
    };

    fn valid_payload() -> TransactionPayload {
        TransactionPayload {
            description: Some("Salary".to_owned()),
            amount: Some(RawAmount::Number(5000.0)),
            date: Some("2025-04-17".to_owned()),
            is_income: Some(true),
        }
    }

    fn fields(errors: &[ValidationError]) -> Vec<&'static str> {
        errors.iter().map(|error| error.field).collect()
    }

    #[test]
    fn valid_payload_becomes_builder() {
        let builder = valid_payload().validate().expect("payload should be valid");

        assert_eq!(
            builder,
            Transaction::build(Amount::new_unchecked(5000.0), date!(2025 - 04 - 17), "Salary")
                .is_income(true)
        );
    }

    #[test]
    fn accepts_numeric_string_and_date_time() {
        let payload = TransactionPayload {
            amount: Some(RawAmount::Text("120.00".to_owned())),
            date: Some("2025-04-18T10:15:00.000Z".to_owned()),
            is_income: Some(false),
            ..valid_payload()
        };

        let builder = payload.validate().expect("payload should be valid");

        assert_eq!(builder.amount, Amount::new_unchecked(120.0));
        assert_eq!(builder.date, date!(2025 - 04 - 18));
        assert!(!builder.is_income);
    }

    #[test]
    fn trims_description() {
        let payload = TransactionPayload {
            description: Some("  Rent  ".to_owned()),
            ..valid_payload()
        };

        let builder = payload.validate().expect("payload should be valid");

        assert_eq!(builder.description, "Rent");
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let payload = TransactionPayload {
            amount: Some(RawAmount::Text("abc".to_owned())),
            ..valid_payload()
        };

        let errors = payload.validate().expect_err("payload should be invalid");

        assert_eq!(fields(&errors), ["amount"]);
    }

    #[test]
    fn rejects_negative_amount() {
        let payload = TransactionPayload {
            amount: Some(RawAmount::Number(-120.0)),
            ..valid_payload()
        };

        let errors = payload.validate().expect_err("payload should be invalid");

        assert_eq!(fields(&errors), ["amount"]);
    }

    #[test]
    fn rejects_unparseable_date() {
        let payload = TransactionPayload {
            date: Some("the seventeenth".to_owned()),
            ..valid_payload()
        };

        let errors = payload.validate().expect_err("payload should be invalid");

        assert_eq!(fields(&errors), ["date"]);
    }

    #[test]
    fn rejects_signed_year() {
        let payload = TransactionPayload {
            date: Some("-0003-01-01".to_owned()),
            ..valid_payload()
        };

        let errors = payload.validate().expect_err("payload should be invalid");

        assert_eq!(fields(&errors), ["date"]);
    }

    #[test]
    fn accepts_last_supported_year() {
        let payload = TransactionPayload {
            date: Some("9999-12-15".to_owned()),
            ..valid_payload()
        };

        let builder = payload.validate().expect("payload should be valid");

        assert_eq!(builder.date, date!(9999 - 12 - 15));
    }

    #[test]
    fn rejects_blank_description() {
        let payload = TransactionPayload {
            description: Some("   ".to_owned()),
            ..valid_payload()
        };

        let errors = payload.validate().expect_err("payload should be invalid");

        assert_eq!(fields(&errors), ["description"]);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = TransactionPayload::default()
            .validate()
            .expect_err("empty payload should be invalid");

        assert_eq!(fields(&errors), ["description", "amount", "date", "isIncome"]);
    }

    #[test]
    fn deserializes_camel_case_json() {
        let payload: TransactionPayload = serde_json::from_str(
            r#"{"description": "Shopping", "amount": "120", "date": "2025-04-18", "isIncome": false}"#,
        )
        .expect("could not parse payload");

        assert_eq!(payload.is_income, Some(false));
        assert_eq!(payload.amount, Some(RawAmount::Text("120".to_owned())));
    }
}
