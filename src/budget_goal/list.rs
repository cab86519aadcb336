//! The budget goal listing endpoint.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    auth::Claims,
    budget_goal::{BudgetGoal, get_budget_goals_by_user},
};

/// Handle requests to list the authenticated user's budget goals.
pub async fn get_budget_goals(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<BudgetGoal>>, Error> {
    let connection = state.connection()?;

    get_budget_goals_by_user(claims.user_id(), &connection).map(Json)
}
