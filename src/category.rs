//! The category reference data and its listing endpoint.
//!
//! Categories are read-only from the client's perspective. They are seeded
//! once at database initialization and used to populate selection inputs and
//! to group transactions and budget goals by name.

use axum::{Json, extract::State};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, auth::Claims};

/// Database identifier for a category.
pub type CategoryId = i64;

/// A named grouping for transactions and budget goals (e.g., 'Groceries').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: String,
}

/// The categories seeded into a fresh database.
const DEFAULT_CATEGORIES: [&str; 12] = [
    "Salary",
    "Freelance",
    "Investments",
    "Groceries",
    "Rent",
    "Utilities",
    "Transportation",
    "Entertainment",
    "Dining Out",
    "Healthcare",
    "Shopping",
    "Other",
];

/// Create the category table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

/// Insert the default category set if the table is empty.
///
/// # Errors
///
/// Returns an [rusqlite::Error] if an SQL related error occurred.
pub fn seed_default_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM category", [], |row| row.get(0))?;

    if count > 0 {
        return Ok(());
    }

    let mut statement = connection.prepare("INSERT INTO category (name) VALUES (?1)")?;

    for name in DEFAULT_CATEGORIES {
        statement.execute((name,))?;
    }

    Ok(())
}

/// Retrieve all categories, in insertion order.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY id ASC")?
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .map(|maybe_category| maybe_category.map_err(Error::SqlError))
        .collect()
}

/// Handle requests to list the category reference data.
pub async fn get_categories_endpoint(
    State(state): State<AppState>,
    _claims: Claims,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state.connection()?;

    get_categories(&connection).map(Json)
}
