//! The transaction listing endpoint, with the history filter applied.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    AppState, Error,
    auth::Claims,
    transaction::{
        HistoryFilter, Transaction, TransactionKind, filter_transactions, get_transactions_by_user,
    },
};

/// The query parameters accepted by the transaction listing endpoint.
///
/// Each parameter is optional; the sentinel value `all` (or an empty string)
/// disables the corresponding filter, matching the filter controls on a
/// history page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListParams {
    /// Filter by transaction kind, `income` or `expense`.
    #[serde(default)]
    pub kind: Option<String>,
    /// Filter by exact category name.
    #[serde(default)]
    pub category: Option<String>,
    /// Keep transactions dated on or after this `YYYY-MM-DD` date.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Keep transactions dated on or before this `YYYY-MM-DD` date.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Keep transactions whose description contains this string.
    #[serde(default)]
    pub search: Option<String>,
}

/// Treat `all` and the empty string as "filter disabled".
fn active(parameter: Option<String>) -> Option<String> {
    parameter.filter(|value| !value.is_empty() && value != "all")
}

fn parse_date(raw_date: &str) -> Result<Date, Error> {
    Date::parse(raw_date, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(raw_date.to_string()))
}

impl TryFrom<TransactionListParams> for HistoryFilter {
    type Error = Error;

    fn try_from(params: TransactionListParams) -> Result<Self, Self::Error> {
        let kind = active(params.kind)
            .map(|raw_kind| TransactionKind::from_str(&raw_kind))
            .transpose()?;

        let start_date = active(params.start_date)
            .map(|raw_date| parse_date(&raw_date))
            .transpose()?;

        let end_date = active(params.end_date)
            .map(|raw_date| parse_date(&raw_date))
            .transpose()?;

        Ok(HistoryFilter {
            kind,
            category: active(params.category),
            start_date,
            end_date,
            search: active(params.search),
        })
    }
}

/// Handle requests to list the authenticated user's transactions.
///
/// The response is filtered by the query parameters and always sorted by date
/// descending.
pub async fn get_transactions(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let filter = HistoryFilter::try_from(params)?;

    let connection = state.connection()?;
    let transactions = get_transactions_by_user(claims.user_id(), &connection)?;

    Ok(Json(filter_transactions(transactions, &filter)))
}
