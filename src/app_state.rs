//! Implements the struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;
use time::Duration;

use crate::{Error, auth::DEFAULT_TOKEN_DURATION, db::initialize};

/// The state of the REST server.
///
/// This is the single process-wide owner of the application data: the
/// database connection and the keys used to sign and verify session tokens.
#[derive(Clone)]
pub struct AppState {
    /// The key used to sign session tokens.
    pub token_encoding_key: EncodingKey,

    /// The key used to verify session tokens.
    pub token_decoding_key: DecodingKey,

    /// The duration for which newly issued session tokens are valid.
    pub token_duration: Duration,

    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models and seeding the category reference data. `secret` is
    /// used to derive the session token signing keys.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, secret: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            token_encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            token_decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_duration: DEFAULT_TOKEN_DURATION,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }

    /// Acquire the database lock.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLock] if the lock has been poisoned by a
    /// panicking thread.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLock
        })
    }
}
