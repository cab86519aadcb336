//! Budget goals: per-category spending ceilings over a period.
//!
//! The derived spend-to-date and progress percentage are computed on read,
//! never stored.

mod create;
mod db;
mod delete;
mod domain;
mod list;
mod progress;
mod update;

pub use create::create_budget_goal_endpoint;
pub use db::{
    create_budget_goal, create_budget_goal_table, delete_budget_goal, get_budget_goals_by_user,
    update_budget_goal,
};
pub use delete::delete_budget_goal_endpoint;
pub use domain::{BudgetGoal, BudgetGoalData, GoalId, GoalPeriod};
pub use list::get_budget_goals;
pub use progress::{GoalProgress, get_budget_goal_progress, goal_progress};
pub use update::update_budget_goal_endpoint;
