//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route for registering a new account. Issues a session token.
pub const REGISTER: &str = "/api/users/register";
/// The route for logging in a user. Issues a session token.
pub const LOG_IN: &str = "/api/users/login";
/// The route for fetching the authenticated user, used for session validation.
pub const ME: &str = "/api/users/me";
/// The route for updating the authenticated user's name, email and password.
pub const PROFILE: &str = "/api/users/profile";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list the category reference data.
pub const CATEGORIES: &str = "/api/categories";
/// The route to list and create budget goals.
pub const BUDGET_GOALS: &str = "/api/budget-goals";
/// The route to update or delete a single budget goal.
pub const BUDGET_GOAL: &str = "/api/budget-goals/{goal_id}";
/// The route to list budget goals with their derived spend and progress.
pub const BUDGET_GOAL_PROGRESS: &str = "/api/budget-goals/progress";
/// The route for the income/expense/balance totals.
pub const SUMMARY: &str = "/api/summary";
/// The route for the trailing six-month income/expense chart series.
pub const MONTHLY_SUMMARY: &str = "/api/summary/monthly";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
