//! Helpers shared by the endpoint tests.

use axum::http::StatusCode;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, auth::AuthResponse, build_router, endpoints, transaction::Transaction};

/// The password used by [register_test_user].
pub const TEST_PASSWORD: &str = "averysafeandsecurepassword";

/// Create an [AppState] backed by a fresh in-memory database.
pub fn new_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, "a test secret").expect("Could not create app state")
}

/// Create a test server running the full application router.
pub fn new_test_server() -> TestServer {
    TestServer::new(build_router(new_test_state()))
}

/// Register an account through the API and return its session and profile.
pub async fn register_test_user(server: &TestServer) -> AuthResponse {
    let response = server
        .post(endpoints::REGISTER)
        .content_type("application/json")
        .json(&json!({
            "name": "Test User",
            "email": "test@example.com",
            "password": TEST_PASSWORD,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    response.json::<AuthResponse>()
}

/// Create a transaction through the API and return the stored row.
pub async fn post_test_transaction(
    server: &TestServer,
    token: &str,
    body: serde_json::Value,
) -> Transaction {
    let response = server
        .post(endpoints::TRANSACTIONS)
        .authorization_bearer(token)
        .content_type("application/json")
        .json(&body)
        .await;

    response.assert_status(StatusCode::CREATED);

    response.json::<Transaction>()
}
