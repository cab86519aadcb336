//! The derived income/expense/balance totals.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::Claims,
    transaction::{Transaction, TransactionKind, get_transactions_by_user},
};

/// Aggregate totals over a transaction list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
}

/// Compute the totals for `transactions`.
///
/// This is a pure function of the list: calling it twice on the same list, or
/// on the same list in a different order, gives the same result.
pub fn calculate_summary(transactions: &[Transaction]) -> Summary {
    let total_income: f64 = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Income)
        .map(|transaction| transaction.amount)
        .sum();

    let total_expense: f64 = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
        .map(|transaction| transaction.amount)
        .sum();

    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

/// Handle requests for the authenticated user's totals.
pub async fn get_summary(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Summary>, Error> {
    let connection = state.connection()?;

    let transactions = get_transactions_by_user(claims.user_id(), &connection)?;

    Ok(Json(calculate_summary(&transactions)))
}


#[cfg(test)]
mod get_summary_tests {
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        summary::Summary,
        test_utils::{new_test_server, post_test_transaction, register_test_user},
    };

    #[tokio::test]
    async fn summary_reflects_stored_transactions() {
        let server = new_test_server();
        let auth = register_test_user(&server).await;

        post_test_transaction(
            &server,
            &auth.token,
            json!({
                "description": "Monthly salary",
                "amount": 3000.0,
                "kind": "income",
                "category": "Salary",
                "date": "2025-05-28",
            }),
        )
        .await;
        let shop = post_test_transaction(
            &server,
            &auth.token,
            json!({
                "description": "Weekly shop",
                "amount": 42.5,
                "kind": "expense",
                "category": "Groceries",
                "date": "2025-05-03",
            }),
        )
        .await;

        let summary = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&auth.token)
            .await
            .json::<Summary>();

        assert_eq!(summary.total_income, 3000.0);
        assert_eq!(summary.total_expense, 42.5);
        assert_eq!(summary.balance, 2957.5);

        // Deleting a transaction is reflected in the recomputed totals.
        server
            .delete(&format_endpoint(endpoints::TRANSACTION, shop.id))
            .authorization_bearer(&auth.token)
            .await
            .assert_status_success();

        let summary = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&auth.token)
            .await
            .json::<Summary>();

        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.balance, 3000.0);
    }
}
