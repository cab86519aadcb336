//! The transaction creation endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState, Error,
    auth::Claims,
    transaction::{Transaction, TransactionData, create_transaction},
};

/// Handle transaction creation.
///
/// # Errors
///
/// Responds with an error if the description or category is empty or the
/// amount is not positive. A failed request stores nothing.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Json(data): Json<TransactionData>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let connection = state.connection()?;

    let transaction = create_transaction(&data, claims.user_id(), &connection)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
