use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Month, OffsetDateTime};

use centsible::{
    PasswordHash, initialize_db,
    budget_goal::{BudgetGoalData, GoalPeriod, create_budget_goal},
    transaction::{TransactionData, TransactionKind, create_transaction},
    user::{create_user, parse_email},
};

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demopassword";

/// Create and populate a database for manual testing.
///
/// The demo account has six months of income and expenses so the dashboard
/// summary, goal progress and trend chart all have data to show.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to write the SQLite database to. Must not already exist.
    #[arg(long)]
    db_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if Path::new(&args.db_path).exists() {
        eprintln!("A file already exists at {}, refusing to overwrite.", args.db_path);
        exit(1);
    }

    let connection = Connection::open(&args.db_path)?;
    initialize_db(&connection)?;

    let user = create_user(
        "Demo User",
        parse_email(DEMO_EMAIL)?,
        PasswordHash::from_raw_password(DEMO_PASSWORD, PasswordHash::DEFAULT_COST)?,
        &connection,
    )?;

    let today = OffsetDateTime::now_utc().date();

    for months_ago in (0..6u8).rev() {
        let month = nth_month_back(today, months_ago);

        create_transaction(
            &TransactionData {
                description: "Monthly salary".to_string(),
                amount: 3200.0,
                kind: TransactionKind::Income,
                category: "Salary".to_string(),
                date: month.replace_day(1)?,
            },
            user.id,
            &connection,
        )?;

        create_transaction(
            &TransactionData {
                description: "Rent".to_string(),
                amount: 1100.0,
                kind: TransactionKind::Expense,
                category: "Rent".to_string(),
                date: month.replace_day(3)?,
            },
            user.id,
            &connection,
        )?;

        create_transaction(
            &TransactionData {
                description: "Weekly shop".to_string(),
                amount: 85.0 + f64::from(months_ago) * 5.0,
                kind: TransactionKind::Expense,
                category: "Groceries".to_string(),
                date: month.replace_day(12)?,
            },
            user.id,
            &connection,
        )?;
    }

    create_transaction(
        &TransactionData {
            description: "Cinema tickets".to_string(),
            amount: 28.0,
            kind: TransactionKind::Expense,
            category: "Entertainment".to_string(),
            date: today,
        },
        user.id,
        &connection,
    )?;

    create_budget_goal(
        &BudgetGoalData {
            category: "Groceries".to_string(),
            amount: 400.0,
            period: GoalPeriod::Monthly,
        },
        user.id,
        &connection,
    )?;

    create_budget_goal(
        &BudgetGoalData {
            category: "Entertainment".to_string(),
            amount: 60.0,
            period: GoalPeriod::Monthly,
        },
        user.id,
        &connection,
    )?;

    println!(
        "Created demo database at {} (log in as {DEMO_EMAIL} / {DEMO_PASSWORD}).",
        args.db_path
    );

    Ok(())
}

/// The 15th of the month `months_ago` calendar months before `date`.
fn nth_month_back(date: Date, months_ago: u8) -> Date {
    let mut year = date.year();
    let mut month = date.month();

    for _ in 0..months_ago {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    Date::from_calendar_date(year, month, 15).expect("the 15th exists in every month")
}
