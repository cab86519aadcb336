//! Creating, querying, updating and deleting budget goals in the database.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    budget_goal::{BudgetGoal, BudgetGoalData, GoalId, GoalPeriod},
    user::UserID,
};

/// Create the budget goal table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_budget_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget_goal (
                id INTEGER PRIMARY KEY,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                period TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_budget_goal_row(row: &Row) -> Result<BudgetGoal, rusqlite::Error> {
    let raw_period: String = row.get(3)?;
    let period = GoalPeriod::from_str(&raw_period)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error)))?;

    Ok(BudgetGoal {
        id: row.get(0)?,
        category: row.get(1)?,
        amount: row.get(2)?,
        period,
        user_id: UserID::new(row.get(4)?),
    })
}

/// Create a new budget goal owned by `user_id`.
///
/// # Errors
///
/// This function will return the validation error for invalid `data`, or an
/// [Error::SqlError] if there is some other SQL error.
pub fn create_budget_goal(
    data: &BudgetGoalData,
    user_id: UserID,
    connection: &Connection,
) -> Result<BudgetGoal, Error> {
    data.validate()?;

    connection.execute(
        "INSERT INTO budget_goal (category, amount, period, user_id) VALUES (?1, ?2, ?3, ?4)",
        (
            data.category.trim(),
            data.amount,
            data.period.to_string(),
            user_id.as_i64(),
        ),
    )?;

    Ok(BudgetGoal {
        id: connection.last_insert_rowid(),
        category: data.category.trim().to_string(),
        amount: data.amount,
        period: data.period,
        user_id,
    })
}

/// Retrieve all of `user_id`'s budget goals in the order they were created.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_budget_goals_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<BudgetGoal>, Error> {
    connection
        .prepare(
            "SELECT id, category, amount, period, user_id FROM budget_goal
             WHERE user_id = :user_id ORDER BY id ASC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_budget_goal_row)?
        .map(|maybe_goal| maybe_goal.map_err(Error::SqlError))
        .collect()
}

/// Overwrite the client-supplied fields of the budget goal `id` owned by
/// `user_id`.
///
/// # Errors
///
/// This function will return:
/// - the validation error for invalid `data`,
/// - an [Error::NotFound] if `id` does not refer to a goal owned by `user_id`,
/// - or an [Error::SqlError] if there is some other SQL error.
pub fn update_budget_goal(
    id: GoalId,
    user_id: UserID,
    data: &BudgetGoalData,
    connection: &Connection,
) -> Result<BudgetGoal, Error> {
    data.validate()?;

    let rows_updated = connection.execute(
        "UPDATE budget_goal SET category = ?1, amount = ?2, period = ?3
         WHERE id = ?4 AND user_id = ?5",
        (
            data.category.trim(),
            data.amount,
            data.period.to_string(),
            id,
            user_id.as_i64(),
        ),
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(BudgetGoal {
        id,
        category: data.category.trim().to_string(),
        amount: data.amount,
        period: data.period,
        user_id,
    })
}

/// Delete the budget goal `id` owned by `user_id`.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if `id` does not refer to a
/// goal owned by `user_id`, or an [Error::SqlError] if there is some other
/// SQL error.
pub fn delete_budget_goal(
    id: GoalId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM budget_goal WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}
