//! The registration endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    AppState, Error, PasswordHash,
    auth::{AuthResponse, encode_token},
    user::{UserProfile, create_user, parse_email},
};

/// The request body for registering a new account.
#[derive(Debug, Deserialize)]
pub struct RegisterData {
    /// The display name for the new account.
    pub name: String,
    /// The email address to register with. Must not belong to an existing account.
    pub email: String,
    /// The plain-text password to register with.
    pub password: String,
}

/// Handle account registration.
///
/// Creates the account and establishes a session in one step, responding with
/// the same body as the log in route.
///
/// # Errors
///
/// Responds with an error if the name is empty, the email is malformed or
/// already registered, or the password is too short.
pub async fn register_user(
    State(state): State<AppState>,
    Json(data): Json<RegisterData>,
) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }

    let email = parse_email(&data.email)?;
    let password_hash = PasswordHash::from_raw_password(&data.password, PasswordHash::DEFAULT_COST)?;

    let connection = state.connection()?;
    let user = create_user(name, email, password_hash, &connection)?;

    let token = encode_token(user.id, &state.token_encoding_key, state.token_duration)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserProfile::from(&user),
        }),
    ))
}
