//! Rolls transactions up into monthly balances.
//!
//! Every function here is pure: it takes a snapshot of validated
//! transactions and never touches the database.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::{period::Period, transaction::Transaction};

/// Income, expense and net totals for a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodSummary {
    /// The sum of the amounts of income transactions.
    pub income: f64,
    /// The sum of the amounts of expense transactions, as a positive number.
    pub expense: f64,
    /// `income - expense`.
    pub net: f64,
}

impl PeriodSummary {
    fn add(&mut self, transaction: &Transaction) {
        if transaction.is_income {
            self.income += transaction.amount;
        } else {
            self.expense += transaction.amount;
        }

        self.net = self.income - self.expense;
    }

    fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .fold(Self::default(), |mut summary, transaction| {
                summary.add(transaction);
                summary
            })
    }
}

/// Everything a monthly view needs: the balance carried in, the month's
/// totals and the balance at the end of the month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOverview {
    /// The month being summarised.
    pub period: Period,
    /// The balance carried in from every earlier month.
    pub running_balance: f64,
    /// The totals for the month.
    pub summary: PeriodSummary,
    /// `running_balance + summary.net`.
    pub closing_balance: f64,
}

/// Totals across every transaction regardless of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallSummary {
    /// The totals across every transaction.
    #[serde(flatten)]
    pub summary: PeriodSummary,
    /// The starting balance plus the net total.
    pub balance: f64,
}

/// The totals for a single day, used to mark days on a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotal {
    /// The day.
    #[serde(with = "crate::date_format")]
    pub date: Date,
    /// The number of transactions on the day.
    pub count: usize,
    /// The totals for the day.
    #[serde(flatten)]
    pub summary: PeriodSummary,
}

/// The balance carried into the month containing `reference_date`.
///
/// Adds the signed amount of every transaction dated in a month strictly
/// before `reference_date`'s month to `starting_balance`. A transaction dated
/// on the first day of the reference month belongs to that month, not to the
/// running balance.
///
/// Transactions are summed in date order, ties broken by ID.
pub fn running_balance_before(
    reference_date: Date,
    starting_balance: f64,
    transactions: &[Transaction],
) -> f64 {
    let period_start = Period::containing(reference_date).first_day();

    let mut earlier: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.date < period_start)
        .collect();
    earlier.sort_by_key(|transaction| (transaction.date, transaction.id));

    earlier
        .into_iter()
        .fold(starting_balance, |balance, transaction| {
            let balance = balance + transaction.signed_amount();
            tracing::trace!(
                "transaction {} on {} brings the balance to {balance}",
                transaction.id,
                transaction.date
            );
            balance
        })
}

/// The income, expense and net totals of the month containing `reference_date`.
pub fn period_summary(reference_date: Date, transactions: &[Transaction]) -> PeriodSummary {
    let period = Period::containing(reference_date);

    PeriodSummary::from_transactions(
        transactions
            .iter()
            .filter(|transaction| period.contains(transaction.date)),
    )
}

/// The running balance, totals and closing balance of the month containing
/// `reference_date`.
pub fn monthly_overview(
    reference_date: Date,
    starting_balance: f64,
    transactions: &[Transaction],
) -> MonthlyOverview {
    let running_balance = running_balance_before(reference_date, starting_balance, transactions);
    let summary = period_summary(reference_date, transactions);

    MonthlyOverview {
        period: Period::containing(reference_date),
        running_balance,
        summary,
        closing_balance: running_balance + summary.net,
    }
}

/// The totals across every transaction, and the balance they leave.
pub fn overall_summary(starting_balance: f64, transactions: &[Transaction]) -> OverallSummary {
    let summary = PeriodSummary::from_transactions(transactions);

    OverallSummary {
        summary,
        balance: starting_balance + summary.net,
    }
}

/// The totals of each day in `period` that has at least one transaction,
/// in ascending date order.
pub fn daily_totals(period: Period, transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<Date, Vec<&Transaction>> = BTreeMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| period.contains(transaction.date))
    {
        by_day.entry(transaction.date).or_default().push(transaction);
    }

    by_day
        .into_iter()
        .map(|(date, transactions)| DailyTotal {
            date,
            count: transactions.len(),
            summary: PeriodSummary::from_transactions(transactions),
        })
        .collect()
}
