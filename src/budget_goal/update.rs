//! The budget goal update endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    auth::Claims,
    budget_goal::{BudgetGoal, BudgetGoalData, GoalId, update_budget_goal},
};

/// Handle budget goal updates.
///
/// # Errors
///
/// Responds with a 404 if the goal does not exist or belongs to another user,
/// or a validation error for invalid data. A failed request leaves the stored
/// goal untouched.
pub async fn update_budget_goal_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(goal_id): Path<GoalId>,
    Json(data): Json<BudgetGoalData>,
) -> Result<Json<BudgetGoal>, Error> {
    let connection = state.connection()?;

    let goal = update_budget_goal(goal_id, claims.user_id(), &data, &connection)?;

    Ok(Json(goal))
}

#[cfg(test)]
mod update_budget_goal_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        budget_goal::{BudgetGoal, GoalPeriod},
        endpoints::{self, format_endpoint},
        test_utils::{new_test_server, register_test_user},
    };

    #[tokio::test]
    async fn update_budget_goal_overwrites_fields() {
        let server = new_test_server();
        let auth = register_test_user(&server).await;

        let created = server
            .post(endpoints::BUDGET_GOALS)
            .authorization_bearer(&auth.token)
            .content_type("application/json")
            .json(&json!({
                "category": "Groceries",
                "amount": 200.0,
                "period": "monthly",
            }))
            .await
            .json::<BudgetGoal>();

        let response = server
            .put(&format_endpoint(endpoints::BUDGET_GOAL, created.id))
            .authorization_bearer(&auth.token)
            .content_type("application/json")
            .json(&json!({
                "category": "Entertainment",
                "amount": 80.0,
                "period": "weekly",
            }))
            .await;

        response.assert_status_ok();

        let updated = response.json::<BudgetGoal>();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.category, "Entertainment");
        assert_eq!(updated.period, GoalPeriod::Weekly);

        let goals = server
            .get(endpoints::BUDGET_GOALS)
            .authorization_bearer(&auth.token)
            .await
            .json::<Vec<BudgetGoal>>();
        assert_eq!(goals, vec![updated]);
    }

    #[tokio::test]
    async fn update_budget_goal_fails_on_missing_id() {
        let server = new_test_server();
        let auth = register_test_user(&server).await;

        server
            .put(&format_endpoint(endpoints::BUDGET_GOAL, 1337))
            .authorization_bearer(&auth.token)
            .content_type("application/json")
            .json(&json!({
                "category": "Groceries",
                "amount": 200.0,
                "period": "monthly",
            }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
