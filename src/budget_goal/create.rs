//! The budget goal creation endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState, Error,
    auth::Claims,
    budget_goal::{BudgetGoal, BudgetGoalData, create_budget_goal},
};

/// Handle budget goal creation.
///
/// # Errors
///
/// Responds with an error if the category is empty or the amount is not
/// positive. A failed request stores nothing.
pub async fn create_budget_goal_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Json(data): Json<BudgetGoalData>,
) -> Result<(StatusCode, Json<BudgetGoal>), Error> {
    let connection = state.connection()?;

    let goal = create_budget_goal(&data, claims.user_id(), &connection)?;

    Ok((StatusCode::CREATED, Json(goal)))
}
