//! Monthly balances: the balance aggregator and the endpoints that serve it.

mod aggregation;
mod calendar_endpoint;
mod state;
mod summary_endpoint;

pub use aggregation::{
    DailyTotal, MonthlyOverview, OverallSummary, PeriodSummary, daily_totals, monthly_overview,
    overall_summary, period_summary, running_balance_before,
};
pub use calendar_endpoint::get_calendar_endpoint;
pub use state::SummaryState;
pub use summary_endpoint::{get_monthly_summary_endpoint, get_overall_summary_endpoint};
