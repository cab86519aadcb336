//! The transaction update endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    auth::Claims,
    transaction::{Transaction, TransactionData, TransactionId, update_transaction},
};

/// Handle transaction updates.
///
/// The full set of client-supplied fields is overwritten.
///
/// # Errors
///
/// Responds with a 404 if the transaction does not exist or belongs to
/// another user, or a validation error for invalid data. A failed request
/// leaves the stored transaction untouched.
pub async fn update_transaction_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(transaction_id): Path<TransactionId>,
    Json(data): Json<TransactionData>,
) -> Result<Json<Transaction>, Error> {
    let connection = state.connection()?;

    let transaction = update_transaction(transaction_id, claims.user_id(), &data, &connection)?;

    Ok(Json(transaction))
}

#[cfg(test)]
mod update_transaction_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{new_test_server, post_test_transaction, register_test_user},
        transaction::{Transaction, TransactionKind},
    };

    fn weekly_shop() -> serde_json::Value {
        json!({
            "description": "Weekly shop",
            "amount": 42.5,
            "kind": "expense",
            "category": "Groceries",
            "date": "2025-05-03",
        })
    }

    #[tokio::test]
    async fn update_transaction_overwrites_fields() {
        let server = new_test_server();
        let auth = register_test_user(&server).await;
        let created = post_test_transaction(&server, &auth.token, weekly_shop()).await;

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, created.id))
            .authorization_bearer(&auth.token)
            .content_type("application/json")
            .json(&json!({
                "description": "Monthly salary",
                "amount": 3000.0,
                "kind": "income",
                "category": "Salary",
                "date": "2025-05-28",
            }))
            .await;

        response.assert_status_ok();

        let updated = response.json::<Transaction>();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.kind, TransactionKind::Income);
        assert_eq!(updated.amount, 3000.0);

        // The stored list reflects the update.
        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&auth.token)
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(transactions, vec![updated]);
    }

    #[tokio::test]
    async fn update_transaction_fails_on_missing_id() {
        let server = new_test_server();
        let auth = register_test_user(&server).await;

        server
            .put(&format_endpoint(endpoints::TRANSACTION, 1337))
            .authorization_bearer(&auth.token)
            .content_type("application/json")
            .json(&weekly_shop())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_transaction_fails_on_invalid_amount() {
        let server = new_test_server();
        let auth = register_test_user(&server).await;
        let created = post_test_transaction(&server, &auth.token, weekly_shop()).await;

        let mut body = weekly_shop();
        body["amount"] = json!(0.0);

        server
            .put(&format_endpoint(endpoints::TRANSACTION, created.id))
            .authorization_bearer(&auth.token)
            .content_type("application/json")
            .json(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        // The stored transaction is untouched.
        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&auth.token)
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(transactions, vec![created]);
    }
}
