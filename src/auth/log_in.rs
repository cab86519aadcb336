//! The log in endpoint.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::{AuthResponse, encode_token},
    user::{UserProfile, get_user_by_email, parse_email},
};

/// The request body for logging in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Email entered during sign-in.
    pub email: String,
    /// Password entered during sign-in.
    pub password: String,
}

/// Handle log in requests.
///
/// Whether the email is unknown or the password is wrong, the response is the
/// same 401 so the route does not reveal which emails are registered.
pub async fn post_log_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, Error> {
    let email = parse_email(&credentials.email).map_err(|_| Error::InvalidCredentials)?;

    let connection = state.connection()?;
    let user = get_user_by_email(&email, &connection).map_err(|error| match error {
        Error::NotFound => Error::InvalidCredentials,
        error => error,
    })?;

    let password_is_correct = user
        .password_hash
        .verify(&credentials.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(user.id, &state.token_encoding_key, state.token_duration)?;

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(&user),
    }))
}

#[cfg(test)]
mod post_log_in_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        auth::AuthResponse,
        endpoints,
        test_utils::{TEST_PASSWORD, new_test_server, register_test_user},
    };

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let server = new_test_server();
        let registered = register_test_user(&server).await;

        let response = server
            .post(endpoints::LOG_IN)
            .content_type("application/json")
            .json(&json!({
                "email": registered.user.email,
                "password": TEST_PASSWORD,
            }))
            .await;

        response.assert_status_ok();

        let auth = response.json::<AuthResponse>();
        assert_eq!(auth.user, registered.user);
        assert!(!auth.token.is_empty());
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let server = new_test_server();
        let registered = register_test_user(&server).await;

        let response = server
            .post(endpoints::LOG_IN)
            .content_type("application/json")
            .json(&json!({
                "email": registered.user.email,
                "password": "definitelyNotTheCorrectPassword",
            }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["message"], "invalid email or password");
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_email() {
        let server = new_test_server();
        register_test_user(&server).await;

        let response = server
            .post(endpoints::LOG_IN)
            .content_type("application/json")
            .json(&json!({
                "email": "wrongemail@example.com",
                "password": TEST_PASSWORD,
            }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        // Same message as a wrong password, so registered emails are not revealed.
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["message"], "invalid email or password");
    }

    #[tokio::test]
    async fn log_in_fails_with_missing_credentials() {
        let server = new_test_server();

        server
            .post(endpoints::LOG_IN)
            .content_type("application/json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
