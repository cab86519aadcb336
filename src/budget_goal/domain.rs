//! Core budget goal domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, user::UserID};

/// Database identifier for a budget goal.
pub type GoalId = i64;

/// The period a budget goal's ceiling applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    /// The ceiling applies per week.
    Weekly,
    /// The ceiling applies per month.
    Monthly,
    /// The ceiling applies per year.
    Yearly,
}

impl Display for GoalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalPeriod::Weekly => write!(f, "weekly"),
            GoalPeriod::Monthly => write!(f, "monthly"),
            GoalPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for GoalPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(GoalPeriod::Weekly),
            "monthly" => Ok(GoalPeriod::Monthly),
            "yearly" => Ok(GoalPeriod::Yearly),
            _ => Err(Error::InvalidPeriod(s.to_string())),
        }
    }
}

/// A spending ceiling for a category over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetGoal {
    /// The ID of the budget goal.
    pub id: GoalId,
    /// The name of the category the ceiling applies to.
    pub category: String,
    /// The target ceiling. Always positive.
    pub amount: f64,
    /// The period the ceiling applies to.
    pub period: GoalPeriod,
    /// The user that owns the goal.
    pub user_id: UserID,
}

/// The client-supplied fields of a budget goal, used to create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetGoalData {
    /// The name of the category the ceiling applies to.
    pub category: String,
    /// The target ceiling. Must be positive.
    pub amount: f64,
    /// The period the ceiling applies to.
    pub period: GoalPeriod,
}

impl BudgetGoalData {
    /// Check the invariants the client must uphold.
    ///
    /// # Errors
    ///
    /// Returns an [Error::EmptyCategory] or [Error::NonPositiveAmount]
    /// describing the first violated rule.
    pub fn validate(&self) -> Result<(), Error> {
        if self.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        if !(self.amount > 0.0) {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}


#[cfg(test)]
mod budget_goal_data_tests {
    use crate::{
        Error,
        budget_goal::{BudgetGoalData, GoalPeriod},
    };

    #[test]
    fn validate_rejects_blank_category() {
        let data = BudgetGoalData {
            category: " ".to_string(),
            amount: 200.0,
            period: GoalPeriod::Monthly,
        };

        assert_eq!(data.validate(), Err(Error::EmptyCategory));
    }

    #[test]
    fn validate_rejects_zero_amount() {
        let data = BudgetGoalData {
            category: "Groceries".to_string(),
            amount: 0.0,
            period: GoalPeriod::Monthly,
        };

        assert_eq!(data.validate(), Err(Error::NonPositiveAmount(0.0)));
    }
}
