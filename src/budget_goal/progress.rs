//! Derived spend-to-date and progress for budget goals.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    auth::Claims,
    budget_goal::{BudgetGoal, GoalId, GoalPeriod, get_budget_goals_by_user},
    transaction::{Transaction, TransactionKind, get_transactions_by_user},
};

/// A budget goal together with its derived spend and progress percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// The ID of the budget goal.
    pub id: GoalId,
    /// The name of the category the ceiling applies to.
    pub category: String,
    /// The target ceiling.
    pub amount: f64,
    /// The period the ceiling applies to.
    pub period: GoalPeriod,
    /// The sum of matching expenses in the current calendar month.
    pub spent: f64,
    /// `spent / amount * 100`. Zero when the goal amount is not positive.
    pub progress: f64,
}

/// Compute how much of `goal` has been spent as of `today`.
///
/// Counts expense transactions in the goal's category dated in `today`'s
/// calendar month and year. The goal's period does not change which
/// transactions are counted, progress is always measured against the current
/// month.
pub fn goal_progress(goal: &BudgetGoal, transactions: &[Transaction], today: Date) -> GoalProgress {
    let spent: f64 = transactions
        .iter()
        .filter(|transaction| {
            transaction.kind == TransactionKind::Expense
                && transaction.category == goal.category
                && transaction.date.month() == today.month()
                && transaction.date.year() == today.year()
        })
        .map(|transaction| transaction.amount)
        .sum();

    // Stored goals always have a positive amount, but the division is guarded
    // so a zero ceiling can never produce an infinite percentage.
    let progress = if goal.amount > 0.0 {
        spent / goal.amount * 100.0
    } else {
        0.0
    };

    GoalProgress {
        id: goal.id,
        category: goal.category.clone(),
        amount: goal.amount,
        period: goal.period,
        spent,
        progress,
    }
}

/// Handle requests for the authenticated user's goals with derived progress.
pub async fn get_budget_goal_progress(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<GoalProgress>>, Error> {
    let connection = state.connection()?;

    let goals = get_budget_goals_by_user(claims.user_id(), &connection)?;
    let transactions = get_transactions_by_user(claims.user_id(), &connection)?;

    let today = OffsetDateTime::now_utc().date();
    let progress = goals
        .iter()
        .map(|goal| goal_progress(goal, &transactions, today))
        .collect();

    Ok(Json(progress))
}
