//! The history filter: a pure function over the transaction list.

use time::Date;

use crate::transaction::{Transaction, TransactionKind};

/// The optional criteria for filtering the transaction history.
///
/// A `None` field disables that filter; the set criteria are combined with
/// logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    /// Keep only transactions of this kind.
    pub kind: Option<TransactionKind>,
    /// Keep only transactions with exactly this category name.
    pub category: Option<String>,
    /// Keep only transactions dated on or after this date.
    pub start_date: Option<Date>,
    /// Keep only transactions dated on or before this date.
    pub end_date: Option<Date>,
    /// Keep only transactions whose description contains this string,
    /// compared case-insensitively.
    pub search: Option<String>,
}

/// Apply `filter` to `transactions` and sort the result by date descending.
pub fn filter_transactions(
    transactions: Vec<Transaction>,
    filter: &HistoryFilter,
) -> Vec<Transaction> {
    let search = filter.search.as_ref().map(|search| search.to_lowercase());

    let mut filtered: Vec<Transaction> = transactions
        .into_iter()
        .filter(|transaction| {
            if filter.kind.is_some_and(|kind| transaction.kind != kind) {
                return false;
            }

            if filter
                .category
                .as_ref()
                .is_some_and(|category| &transaction.category != category)
            {
                return false;
            }

            if filter.start_date.is_some_and(|start| transaction.date < start) {
                return false;
            }

            if filter.end_date.is_some_and(|end| transaction.date > end) {
                return false;
            }

            if let Some(search) = &search {
                if !transaction.description.to_lowercase().contains(search) {
                    return false;
                }
            }

            true
        })
        .collect();

    filtered.sort_by(|a, b| b.date.cmp(&a.date));

    filtered
}
