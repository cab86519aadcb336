//! The transaction deletion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    auth::Claims,
    transaction::{TransactionId, delete_transaction},
};

/// Handle transaction deletion.
///
/// # Errors
///
/// Responds with a 404 if the transaction does not exist or belongs to
/// another user, in which case nothing is deleted.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    let connection = state.connection()?;

    delete_transaction(transaction_id, claims.user_id(), &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
