//! The trailing six-month income/expense series for the dashboard chart.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

use crate::{
    AppState, Error,
    auth::Claims,
    transaction::{Transaction, TransactionKind, get_transactions_by_user},
};

/// The number of calendar-month buckets in the series.
const BUCKET_COUNT: usize = 6;

/// Income and expense sums per trailing calendar month, oldest first.
///
/// The three vectors always have six entries each; the last entry is the
/// current month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Three-letter month labels, e.g. `["Jan", ..., "Jun"]`.
    pub labels: Vec<String>,
    /// The income sum per bucket.
    pub income: Vec<f64>,
    /// The expense sum per bucket.
    pub expenses: Vec<f64>,
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Bucket `transactions` into the six calendar months ending at `today`.
///
/// Bucket assignment compares calendar month numbers only, wrapping modulo
/// twelve across a year boundary. A transaction whose month number is more
/// than five "months ago" by that metric is excluded; the metric does not
/// distinguish years, so a transaction from the same calendar month of an
/// earlier year lands in the current bucket.
pub fn monthly_trend(transactions: &[Transaction], today: Date) -> MonthlyTrend {
    let mut months = [today.month(); BUCKET_COUNT];
    for i in (0..BUCKET_COUNT - 1).rev() {
        months[i] = months[i + 1].previous();
    }

    let labels = months
        .iter()
        .map(|&month| month_abbreviation(month).to_string())
        .collect();

    let mut income = vec![0.0; BUCKET_COUNT];
    let mut expenses = vec![0.0; BUCKET_COUNT];

    let current_month = today.month() as i16;

    for transaction in transactions {
        let transaction_month = transaction.date.month() as i16;
        let months_ago = ((current_month - transaction_month + 12) % 12) as usize;

        if months_ago < BUCKET_COUNT {
            let index = BUCKET_COUNT - 1 - months_ago;

            match transaction.kind {
                TransactionKind::Income => income[index] += transaction.amount,
                TransactionKind::Expense => expenses[index] += transaction.amount,
            }
        }
    }

    MonthlyTrend {
        labels,
        income,
        expenses,
    }
}

/// Handle requests for the authenticated user's six-month trend series.
pub async fn get_monthly_summary(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<MonthlyTrend>, Error> {
    let connection = state.connection()?;

    let transactions = get_transactions_by_user(claims.user_id(), &connection)?;

    let today = OffsetDateTime::now_utc().date();

    Ok(Json(monthly_trend(&transactions, today)))
}
