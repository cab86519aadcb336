//! The profile update endpoint.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    AppState, Error, PasswordHash, ValidatedPassword,
    auth::Claims,
    user::{UserProfile, get_user_by_id, parse_email, update_user},
};

/// The request body for updating the authenticated user's profile.
///
/// A password change is requested by sending the full triple. Sending an
/// empty or absent `new_password` leaves the password untouched.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    /// The new display name.
    pub name: String,
    /// The new email address.
    pub email: String,
    /// The current password, required when changing the password.
    #[serde(default)]
    pub current_password: Option<String>,
    /// The password to change to.
    #[serde(default)]
    pub new_password: Option<String>,
    /// Must repeat `new_password` exactly.
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Handle profile updates for the authenticated user.
///
/// The whole request is validated before any state changes: a rejected
/// password change leaves the name and email untouched as well.
///
/// # Errors
///
/// Responds with an error if the name or email is invalid, the new password
/// and its confirmation differ, the new password is too short, or the current
/// password does not verify against the stored hash.
pub async fn update_profile(
    State(state): State<AppState>,
    claims: Claims,
    Json(data): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, Error> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }

    let email = parse_email(&data.email)?;

    let connection = state.connection()?;
    let user = get_user_by_id(claims.user_id(), &connection).map_err(|error| match error {
        Error::NotFound => Error::InvalidAuthToken,
        error => error,
    })?;

    let new_password_hash = match data.new_password.as_deref().filter(|p| !p.is_empty()) {
        Some(new_password) => {
            if Some(new_password) != data.confirm_password.as_deref() {
                return Err(Error::PasswordMismatch);
            }

            let validated_password = ValidatedPassword::new(new_password)?;

            let current_password = data.current_password.as_deref().unwrap_or_default();
            let current_is_correct = user
                .password_hash
                .verify(current_password)
                .map_err(|error| Error::HashingError(error.to_string()))?;

            if !current_is_correct {
                return Err(Error::InvalidCredentials);
            }

            Some(PasswordHash::new(
                validated_password,
                PasswordHash::DEFAULT_COST,
            )?)
        }
        None => None,
    };

    let updated_user = update_user(
        user.id,
        name,
        &email,
        new_password_hash.as_ref(),
        &connection,
    )?;

    Ok(Json(UserProfile::from(&updated_user)))
}
