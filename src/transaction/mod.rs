//! Transactions: the recorded income and expense events.
//!
//! Each endpoint lives in its own submodule, with the domain types, database
//! access, and the pure history filter alongside them.

mod create;
mod db;
mod delete;
mod domain;
mod filter;
mod list;
mod update;

pub use create::create_transaction_endpoint;
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_transactions_by_user,
    update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{Transaction, TransactionData, TransactionId, TransactionKind};
pub use filter::{HistoryFilter, filter_transactions};
pub use list::get_transactions;
pub use update::update_transaction_endpoint;
