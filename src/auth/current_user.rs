//! The session validation endpoint.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    auth::Claims,
    user::{UserProfile, get_user_by_id},
};

/// Handle requests for the authenticated user's profile.
///
/// Clients call this once at startup with a stored token to check whether the
/// session is still valid. A token that refers to a deleted account is
/// reported the same way as an expired one so the client discards it.
pub async fn get_current_user(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<UserProfile>, Error> {
    let connection = state.connection()?;

    let user = get_user_by_id(claims.user_id(), &connection).map_err(|error| match error {
        Error::NotFound => Error::InvalidAuthToken,
        error => error,
    })?;

    Ok(Json(UserProfile::from(&user)))
}
