//! Centsible is a self-hosted service for tracking your personal budget.
//!
//! It exposes a JSON REST API for recording income and expense transactions,
//! setting per-category budget goals, and reading derived summaries (totals,
//! goal progress, and a six-month income/expense trend).

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod logging;
mod password;
mod routing;

pub mod auth;
pub mod budget_goal;
pub mod category;
pub mod chart;
pub mod endpoints;
pub mod summary;
pub mod transaction;
pub mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an email or password that did not match a registered
    /// account, or a current password that did not verify on a profile update.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The bearer token was missing, malformed, expired, or signed with the
    /// wrong key. Clients should discard their stored credential.
    #[error("invalid or expired session token")]
    InvalidAuthToken,

    /// An unexpected error occurred while signing a session token.
    #[error("could not create a session token")]
    TokenCreation,

    /// The email used to register already belongs to an account.
    #[error("an account with this email already exists")]
    DuplicateEmail,

    /// The given string could not be parsed as an email address.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// An empty string was given for a user's name.
    #[error("name cannot be empty")]
    EmptyName,

    /// An empty string was given for a transaction description.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// An empty string was given for a transaction or goal category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// A zero or negative amount was given for a transaction or goal.
    ///
    /// Amounts are stored as positive numbers, the transaction kind decides
    /// the sign when amounts are aggregated.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// The given string is not `income` or `expense`.
    #[error("{0} is not a valid transaction kind")]
    InvalidKind(String),

    /// The given string is not `weekly`, `monthly` or `yearly`.
    #[error("{0} is not a valid budget period")]
    InvalidPeriod(String),

    /// The given string could not be parsed as a `YYYY-MM-DD` calendar date.
    #[error("{0} is not a valid date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The user chose a password shorter than the minimum length.
    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    /// The new password and its confirmation did not match on a profile update.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The requested resource was not found.
    ///
    /// Clients should check that the ID is correct and that the resource
    /// belongs to the authenticated user.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidCredentials | Error::InvalidAuthToken => StatusCode::UNAUTHORIZED,
            Error::DuplicateEmail => StatusCode::CONFLICT,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::TokenCreation
            | Error::HashingError(_)
            | Error::DatabaseLock
            | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        // Internal errors are logged server-side and replaced with a generic
        // message so database or crypto details never reach the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {self}");
            "an unexpected error occurred, try again later".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
