//! Session token creation, verification, and extraction.

// Code in this module is adapted from https://github.com/tokio-rs/axum/blob/main/examples/jwt/src/main.rs

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{AppState, Error, user::UserID};

/// The duration for which newly issued session tokens are valid.
///
/// Tokens are expected to be kept by clients across page reloads, so the
/// lifetime is a week rather than minutes. Sessions end earlier when the
/// client discards the token (log out).
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::days(7);

/// The contents of a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the user the session belongs to.
    pub sub: i64,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
}

impl Claims {
    /// The ID of the user the session belongs to.
    pub fn user_id(&self) -> UserID {
        UserID::new(self.sub)
    }
}

impl<S> FromRequestParts<S> for Claims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::InvalidAuthToken)?;

        let state = AppState::from_ref(state);

        decode_token(bearer.token(), &state.token_decoding_key)
    }
}

/// Create a signed session token for `user_id` that expires after `duration`.
///
/// # Errors
///
/// Returns an [Error::TokenCreation] if the token could not be signed.
pub fn encode_token(
    user_id: UserID,
    encoding_key: &EncodingKey,
    duration: Duration,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.as_i64(),
        iat: now.unix_timestamp() as usize,
        exp: (now + duration).unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|error| {
        tracing::error!("could not sign session token: {error}");
        Error::TokenCreation
    })
}

/// Verify a session token and return its claims.
///
/// # Errors
///
/// Returns an [Error::InvalidAuthToken] if the token is malformed, expired,
/// or was signed with a different key.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|_| Error::InvalidAuthToken)
}

#[cfg(test)]
mod token_tests {
    use jsonwebtoken::{DecodingKey, EncodingKey};
    use time::Duration;

    use crate::{
        Error,
        auth::token::{DEFAULT_TOKEN_DURATION, decode_token, encode_token},
        user::UserID,
    };

    fn get_test_keys() -> (EncodingKey, DecodingKey) {
        let secret = "foobar";

        (
            EncodingKey::from_secret(secret.as_bytes()),
            DecodingKey::from_secret(secret.as_bytes()),
        )
    }

    #[test]
    fn decode_token_gives_correct_user_id() {
        let (encoding_key, decoding_key) = get_test_keys();
        let user_id = UserID::new(42);

        let token = encode_token(user_id, &encoding_key, DEFAULT_TOKEN_DURATION).unwrap();
        let claims = decode_token(&token, &decoding_key).unwrap();

        assert_eq!(claims.user_id(), user_id);
    }

    #[test]
    fn decode_token_fails_with_wrong_key() {
        let (encoding_key, _) = get_test_keys();
        let wrong_key = DecodingKey::from_secret(b"not the signing secret");

        let token = encode_token(UserID::new(1), &encoding_key, DEFAULT_TOKEN_DURATION).unwrap();

        assert_eq!(
            decode_token(&token, &wrong_key),
            Err(Error::InvalidAuthToken)
        );
    }

    #[test]
    fn decode_token_fails_when_expired() {
        let (encoding_key, decoding_key) = get_test_keys();

        // Well past the default validation leeway.
        let token = encode_token(UserID::new(1), &encoding_key, Duration::days(-1)).unwrap();

        assert_eq!(
            decode_token(&token, &decoding_key),
            Err(Error::InvalidAuthToken)
        );
    }

    #[test]
    fn decode_token_fails_on_garbage() {
        let (_, decoding_key) = get_test_keys();

        assert_eq!(
            decode_token("definitely.not.ajwt", &decoding_key),
            Err(Error::InvalidAuthToken)
        );
    }
}
