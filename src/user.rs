//! Code for creating the user table and fetching and updating users.

use std::fmt::Display;

use email_address::EmailAddress;
use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered user of the application.
///
/// The caller should ensure that `id` is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The display name the user registered with.
    pub name: String,
    /// The email address the user registered with. Unique across users.
    pub email: EmailAddress,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// The publicly visible fields of a [User], returned by the API.
///
/// The password hash never leaves the server, so this type is what handlers
/// serialize in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The display name the user registered with.
    pub name: String,
    /// The email address the user registered with.
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.to_string(),
        }
    }
}

/// Parse and validate an email address from client input.
///
/// # Errors
///
/// Returns an [Error::InvalidEmail] with the offending string if it is not a
/// well-formed email address.
pub fn parse_email(raw_email: &str) -> Result<EmailAddress, Error> {
    raw_email
        .trim()
        .parse::<EmailAddress>()
        .map_err(|_| Error::InvalidEmail(raw_email.to_string()))
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let name = row.get(1)?;

    let raw_email: String = row.get(2)?;
    let email = raw_email
        .parse::<EmailAddress>()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;

    let raw_password_hash: String = row.get(3)?;

    Ok(User {
        id: UserID::new(raw_id),
        name,
        email,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
    })
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns an [Error::DuplicateEmail] if `email` already belongs to a
/// registered user, or an [Error::SqlError] if an SQL related error occurred.
pub fn create_user(
    name: &str,
    email: EmailAddress,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (name, email, password) VALUES (?1, ?2, ?3)",
        (name, email.to_string(), password_hash.as_ref()),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        name: name.to_string(),
        email,
        password_hash,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the database.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, name, email, password FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], map_user_row)
        .map_err(|error| error.into())
}

/// Get the user from the database with an email equal to `email`.
///
/// # Errors
///
/// This function will return an error if:
/// - `email` does not belong to a registered user.
/// - there was an error trying to access the database.
pub fn get_user_by_email(email: &EmailAddress, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, name, email, password FROM user WHERE email = :email")?
        .query_row(&[(":email", &email.to_string())], map_user_row)
        .map_err(|error| error.into())
}

/// Update a user's name, email and, when given, password hash.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user,
/// - `email` is already in use by another user,
/// - or there was an error trying to access the database.
pub fn update_user(
    user_id: UserID,
    name: &str,
    email: &EmailAddress,
    password_hash: Option<&PasswordHash>,
    connection: &Connection,
) -> Result<User, Error> {
    let rows_updated = match password_hash {
        Some(password_hash) => connection.execute(
            "UPDATE user SET name = ?1, email = ?2, password = ?3 WHERE id = ?4",
            (
                name,
                email.to_string(),
                password_hash.as_ref(),
                user_id.as_i64(),
            ),
        )?,
        None => connection.execute(
            "UPDATE user SET name = ?1, email = ?2 WHERE id = ?3",
            (name, email.to_string(), user_id.as_i64()),
        )?,
    };

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    get_user_by_id(user_id, connection)
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::{
        Error, PasswordHash,
        user::{
            UserID, create_user, create_user_table, get_user_by_email, get_user_by_id, parse_email,
            update_user,
        },
    };

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_user_table(&conn).expect("Could not create user table");

        conn
    }

    #[test]
    fn insert_user_succeeds() {
        let conn = get_db_connection();
        let password_hash = PasswordHash::new_unchecked("hunter2");
        let email = parse_email("foo@bar.baz").unwrap();

        let inserted_user = create_user("Foo Bar", email, password_hash.clone(), &conn).unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.name, "Foo Bar");
        assert_eq!(inserted_user.password_hash, password_hash);
    }

    #[test]
    fn insert_user_fails_on_duplicate_email() {
        let conn = get_db_connection();
        let email = parse_email("foo@bar.baz").unwrap();

        create_user("Foo", email.clone(), PasswordHash::new_unchecked("one"), &conn).unwrap();
        let duplicate = create_user("Bar", email, PasswordHash::new_unchecked("two"), &conn);

        assert_eq!(duplicate, Err(Error::DuplicateEmail));
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let conn = get_db_connection();

        let id = UserID::new(42);

        assert_eq!(get_user_by_id(id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn get_user_by_email_succeeds() {
        let conn = get_db_connection();
        let email = parse_email("foo@bar.baz").unwrap();
        let test_user = create_user(
            "Foo Bar",
            email.clone(),
            PasswordHash::new_unchecked("hunter2"),
            &conn,
        )
        .unwrap();

        let retrieved_user = get_user_by_email(&email, &conn).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn update_user_changes_profile_fields() {
        let conn = get_db_connection();
        let test_user = create_user(
            "Foo Bar",
            parse_email("foo@bar.baz").unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &conn,
        )
        .unwrap();

        let new_email = parse_email("new@bar.baz").unwrap();
        let updated_user =
            update_user(test_user.id, "New Name", &new_email, None, &conn).unwrap();

        assert_eq!(updated_user.name, "New Name");
        assert_eq!(updated_user.email, new_email);
        // The password is untouched when no new hash is given.
        assert_eq!(updated_user.password_hash, test_user.password_hash);
    }

    #[test]
    fn update_user_fails_with_non_existent_id() {
        let conn = get_db_connection();
        let email = parse_email("foo@bar.baz").unwrap();

        let result = update_user(UserID::new(1337), "Foo", &email, None, &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn parse_email_rejects_malformed_address() {
        let result = parse_email("not-an-email");

        assert_eq!(result, Err(Error::InvalidEmail("not-an-email".to_string())));
    }
}
