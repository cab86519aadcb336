//! The budget goal deletion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    auth::Claims,
    budget_goal::{GoalId, delete_budget_goal},
};

/// Handle budget goal deletion.
///
/// # Errors
///
/// Responds with a 404 if the goal does not exist or belongs to another user,
/// in which case nothing is deleted.
pub async fn delete_budget_goal_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(goal_id): Path<GoalId>,
) -> Result<StatusCode, Error> {
    let connection = state.connection()?;

    delete_budget_goal(goal_id, claims.user_id(), &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
