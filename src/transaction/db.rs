//! Creating, querying, updating and deleting transactions in the database.
//!
//! Every query is scoped to a user ID so one user can never read or mutate
//! another user's transactions, a missing row and a row owned by someone else
//! are indistinguishable to the client.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    transaction::{Transaction, TransactionData, TransactionId, TransactionKind},
    user::UserID,
};

/// Create the transaction table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_kind: String = row.get(3)?;
    let kind = TransactionKind::from_str(&raw_kind)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error)))?;

    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        kind,
        category: row.get(4)?,
        date: row.get(5)?,
        user_id: UserID::new(row.get(6)?),
    })
}

/// Create a new transaction owned by `user_id`.
///
/// # Errors
///
/// This function will return the validation error for invalid `data`, or an
/// [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    data: &TransactionData,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    data.validate()?;

    connection.execute(
        "INSERT INTO \"transaction\" (description, amount, kind, category, date, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            data.description.trim(),
            data.amount,
            data.kind.to_string(),
            data.category.trim(),
            data.date,
            user_id.as_i64(),
        ),
    )?;

    Ok(Transaction {
        id: connection.last_insert_rowid(),
        description: data.description.trim().to_string(),
        amount: data.amount,
        kind: data.kind,
        category: data.category.trim().to_string(),
        date: data.date,
        user_id,
    })
}

/// Retrieve all of `user_id`'s transactions, most recent date first.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_transactions_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, kind, category, date, user_id
             FROM \"transaction\" WHERE user_id = :user_id
             ORDER BY date DESC, id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Overwrite the client-supplied fields of the transaction `id` owned by
/// `user_id`.
///
/// # Errors
///
/// This function will return:
/// - the validation error for invalid `data`,
/// - an [Error::NotFound] if `id` does not refer to a transaction owned by
///   `user_id`,
/// - or an [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    user_id: UserID,
    data: &TransactionData,
    connection: &Connection,
) -> Result<Transaction, Error> {
    data.validate()?;

    let rows_updated = connection.execute(
        "UPDATE \"transaction\"
         SET description = ?1, amount = ?2, kind = ?3, category = ?4, date = ?5
         WHERE id = ?6 AND user_id = ?7",
        (
            data.description.trim(),
            data.amount,
            data.kind.to_string(),
            data.category.trim(),
            data.date,
            id,
            user_id.as_i64(),
        ),
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(Transaction {
        id,
        description: data.description.trim().to_string(),
        amount: data.amount,
        kind: data.kind,
        category: data.category.trim().to_string(),
        date: data.date,
        user_id,
    })
}

/// Delete the transaction `id` owned by `user_id`.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if `id` does not refer to a
/// transaction owned by `user_id`, or an [Error::SqlError] if there is some
/// other SQL error.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

#[cfg(test)]
mod transaction_db_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error, PasswordHash,
        db::initialize,
        transaction::{
            TransactionData, TransactionKind, create_transaction, delete_transaction,
            get_transactions_by_user, update_transaction,
        },
        user::{User, create_user, parse_email},
    };

    fn create_database_and_insert_test_user() -> (Connection, User) {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        initialize(&conn).expect("Could not initialize database");

        let test_user = create_user(
            "Foo Bar",
            parse_email("foo@bar.baz").unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &conn,
        )
        .unwrap();

        (conn, test_user)
    }

    fn groceries(amount: f64, day: u8) -> TransactionData {
        TransactionData {
            description: "Weekly shop".to_string(),
            amount,
            kind: TransactionKind::Expense,
            category: "Groceries".to_string(),
            date: date!(2025 - 06 - 01).replace_day(day).unwrap(),
        }
    }

    #[test]
    fn insert_and_select_round_trip() {
        let (conn, test_user) = create_database_and_insert_test_user();

        let inserted = create_transaction(&groceries(42.5, 14), test_user.id, &conn).unwrap();

        assert!(inserted.id > 0);

        let selected = get_transactions_by_user(test_user.id, &conn).unwrap();
        assert_eq!(selected, vec![inserted]);
    }

    #[test]
    fn insert_rejects_invalid_amount() {
        let (conn, test_user) = create_database_and_insert_test_user();

        let result = create_transaction(&groceries(0.0, 14), test_user.id, &conn);

        assert_eq!(result, Err(Error::NonPositiveAmount(0.0)));
        assert_eq!(get_transactions_by_user(test_user.id, &conn).unwrap(), []);
    }

    #[test]
    fn select_returns_most_recent_first() {
        let (conn, test_user) = create_database_and_insert_test_user();

        let older = create_transaction(&groceries(10.0, 2), test_user.id, &conn).unwrap();
        let newer = create_transaction(&groceries(20.0, 20), test_user.id, &conn).unwrap();

        let selected = get_transactions_by_user(test_user.id, &conn).unwrap();

        assert_eq!(selected, vec![newer, older]);
    }

    #[test]
    fn select_excludes_other_users() {
        let (conn, test_user) = create_database_and_insert_test_user();
        let other_user = create_user(
            "Someone Else",
            parse_email("bar@baz.qux").unwrap(),
            PasswordHash::new_unchecked("hunter3"),
            &conn,
        )
        .unwrap();

        create_transaction(&groceries(42.5, 14), test_user.id, &conn).unwrap();

        assert_eq!(get_transactions_by_user(other_user.id, &conn).unwrap(), []);
    }

    #[test]
    fn update_overwrites_fields() {
        let (conn, test_user) = create_database_and_insert_test_user();
        let inserted = create_transaction(&groceries(42.5, 14), test_user.id, &conn).unwrap();

        let updated_data = TransactionData {
            description: "Monthly salary".to_string(),
            amount: 3000.0,
            kind: TransactionKind::Income,
            category: "Salary".to_string(),
            date: date!(2025 - 06 - 30),
        };
        let updated = update_transaction(inserted.id, test_user.id, &updated_data, &conn).unwrap();

        assert_eq!(updated.id, inserted.id);
        assert_eq!(
            get_transactions_by_user(test_user.id, &conn).unwrap(),
            vec![updated]
        );
    }

    #[test]
    fn update_fails_for_other_users_transaction() {
        let (conn, test_user) = create_database_and_insert_test_user();
        let other_user = create_user(
            "Someone Else",
            parse_email("bar@baz.qux").unwrap(),
            PasswordHash::new_unchecked("hunter3"),
            &conn,
        )
        .unwrap();

        let inserted = create_transaction(&groceries(42.5, 14), test_user.id, &conn).unwrap();

        let result = update_transaction(inserted.id, other_user.id, &groceries(1.0, 1), &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_exactly_one_row() {
        let (conn, test_user) = create_database_and_insert_test_user();

        let keep_older = create_transaction(&groceries(10.0, 2), test_user.id, &conn).unwrap();
        let to_delete = create_transaction(&groceries(20.0, 10), test_user.id, &conn).unwrap();
        let keep_newer = create_transaction(&groceries(30.0, 20), test_user.id, &conn).unwrap();

        delete_transaction(to_delete.id, test_user.id, &conn).unwrap();

        // The surviving rows keep their order and values.
        assert_eq!(
            get_transactions_by_user(test_user.id, &conn).unwrap(),
            vec![keep_newer, keep_older]
        );
    }

    #[test]
    fn delete_fails_on_missing_id() {
        let (conn, test_user) = create_database_and_insert_test_user();

        assert_eq!(
            delete_transaction(1337, test_user.id, &conn),
            Err(Error::NotFound)
        );
    }
}
