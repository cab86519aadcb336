//! Application router configuration.
//!
//! Routes under `/api` that establish a session (register, log in) are open;
//! every other route authenticates by extracting the bearer token claims, so
//! an unauthenticated request is rejected before its handler runs.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState, Error,
    auth::{get_current_user, post_log_in, register_user, update_profile},
    budget_goal::{
        create_budget_goal_endpoint, delete_budget_goal_endpoint, get_budget_goal_progress,
        get_budget_goals, update_budget_goal_endpoint,
    },
    category::get_categories_endpoint,
    chart::get_monthly_summary,
    endpoints,
    summary::get_summary,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::ME, get(get_current_user))
        .route(endpoints::PROFILE, put(update_profile))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .route(
            endpoints::BUDGET_GOALS,
            get(get_budget_goals).post(create_budget_goal_endpoint),
        )
        .route(
            endpoints::BUDGET_GOAL,
            put(update_budget_goal_endpoint).delete(delete_budget_goal_endpoint),
        )
        .route(endpoints::BUDGET_GOAL_PROGRESS, get(get_budget_goal_progress))
        .route(endpoints::SUMMARY, get(get_summary))
        .route(endpoints::MONTHLY_SUMMARY, get(get_monthly_summary))
        .fallback(get_unknown_route)
        .with_state(state)
}

/// Respond to requests outside the API surface with the standard error body.
async fn get_unknown_route() -> Error {
    Error::NotFound
}
