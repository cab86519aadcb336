//! User registration, log in, session validation, and profile updates.
//!
//! A session is a signed bearer token issued at registration or log in and
//! presented in the `Authorization` header on every subsequent call. There is
//! no log out route, clients end a session by discarding the token.

mod current_user;
mod log_in;
mod profile;
mod register;
mod token;

pub use current_user::get_current_user;
pub use log_in::post_log_in;
pub use profile::update_profile;
pub use register::register_user;
pub use token::{Claims, DEFAULT_TOKEN_DURATION, encode_token};

use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

/// The response body for routes that establish a session.
///
/// `token` is the bearer credential the client must present on subsequent
/// calls, and `user` is the profile of the account the session belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The signed session token.
    pub token: String,
    /// The profile of the authenticated user.
    pub user: UserProfile,
}
