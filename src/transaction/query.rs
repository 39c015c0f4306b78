//! Filtering and sorting of transaction lists into views.

use std::cmp::Ordering;

use time::OffsetDateTime;

use super::{
    core::Transaction,
    filter::{FilterSpecification, SortBy, SortOrder},
};

/// Get the transactions that match `spec`, sorted as `spec` describes.
///
/// The status filter is applied first, then the date range filter, then a
/// stable sort. A descending order negates the comparison rather than
/// reversing the sorted list, so transactions that compare equal keep their
/// input order in both directions.
///
/// # Arguments
/// * `transactions` - The transactions to filter, in any order. Never modified.
/// * `spec` - The filters and ordering to apply.
/// * `now` - The current instant. Its offset determines the local calendar
///   used for "today" and custom ranges.
///
/// # Returns
/// A newly allocated list, empty if nothing matches.
pub fn filter_and_sort(
    transactions: &[Transaction],
    spec: &FilterSpecification,
    now: OffsetDateTime,
) -> Vec<Transaction> {
    let mut view: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| spec.status.matches(transaction.status))
        .filter(|transaction| spec.date_range.contains(transaction.due_date, now))
        .cloned()
        .collect();

    view.sort_by(|a, b| compare(a, b, spec.sort_by, spec.sort_order));

    tracing::debug!(
        "kept {} of {} transactions for {spec:?}",
        view.len(),
        transactions.len()
    );

    view
}

fn compare(a: &Transaction, b: &Transaction, sort_by: SortBy, sort_order: SortOrder) -> Ordering {
    let ordering = match sort_by {
        SortBy::Date => a.due_date.cmp(&b.due_date),
        SortBy::Status => a.status.sort_rank().cmp(&b.status.sort_rank()),
        SortBy::Amount => a.amount.cmp(&b.amount),
        SortBy::Client => compare_clients(
            a.client.as_deref().unwrap_or_default(),
            b.client.as_deref().unwrap_or_default(),
        ),
    };

    match sort_order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

/// Case-insensitive comparison, falling back to the raw strings so that
/// names differing only by case still have a fixed order.
fn compare_clients(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
