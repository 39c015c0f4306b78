//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `FilterSpecification` describing a view, and its validation
//! - Filtering, sorting and aggregation of transaction lists
//! - Display attributes for statuses and types

mod aggregation;
mod badge;
mod core;
mod filter;
mod query;

pub use aggregation::{
    Aggregate, CategoryTotal, MonthlyTotals, StatusCounts, UNCATEGORIZED_LABEL, aggregate,
    aggregate_by_category, aggregate_by_month, count_by_status,
};
pub use badge::Badge;
pub use self::core::{
    Recurrence, Transaction, TransactionBuilder, TransactionId, TransactionStatus, TransactionType,
};
pub use filter::{
    DateRangeFilter, FilterQuery, FilterSpecification, SortBy, SortOrder, StatusFilter,
};
pub use query::filter_and_sort;
