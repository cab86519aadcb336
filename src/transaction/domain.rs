//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, user::UserID};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// Whether a transaction brings money in or takes money out.
///
/// Amounts are stored as positive numbers, the kind decides the sign when
/// amounts are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. salary.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

/// A single recorded income or expense event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned. Always positive.
    pub amount: f64,
    /// Whether this is income or an expense.
    pub kind: TransactionKind,
    /// The name of the category the transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// The user that owns the transaction.
    pub user_id: UserID,
}

/// The client-supplied fields of a transaction, used to create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionData {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned. Must be positive.
    pub amount: f64,
    /// Whether this is income or an expense.
    pub kind: TransactionKind,
    /// The name of the category the transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl TransactionData {
    /// Check the invariants the client must uphold.
    ///
    /// # Errors
    ///
    /// Returns an [Error::EmptyDescription], [Error::EmptyCategory] or
    /// [Error::NonPositiveAmount] describing the first violated rule.
    pub fn validate(&self) -> Result<(), Error> {
        if self.description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        if !(self.amount > 0.0) {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}
