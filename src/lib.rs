//! Finboard is a finance tracker for small businesses.
//!
//! This library filters, sorts and totals lists of income and expense
//! transactions, builds reports over them, and models subscription plans and
//! their trials. The `finboard` binary is a command line front end.
//!
//! ```
//! use finboard_rs::{FilterQuery, aggregate, filter_and_sort, seed::sample_transactions};
//! use time::OffsetDateTime;
//!
//! let now = OffsetDateTime::now_utc();
//! let transactions = sample_transactions(now);
//! let spec = FilterQuery::from_query_string("status=overdue&sort_by=amount&order=asc")?
//!     .parse()?;
//!
//! let view = filter_and_sort(&transactions, &spec, now);
//! let summary = aggregate(&view);
//!
//! assert_eq!(summary.count, view.len());
//! # Ok::<(), finboard_rs::Error>(())
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod config;
mod error;
pub mod import;
pub mod report;
pub mod seed;
pub mod subscription;
pub mod timezone;
mod transaction;

pub use error::Error;
pub use transaction::{
    Aggregate, Badge, CategoryTotal, DateRangeFilter, FilterQuery, FilterSpecification,
    MonthlyTotals, Recurrence, SortBy, SortOrder, StatusCounts, StatusFilter, Transaction,
    TransactionBuilder, TransactionId, TransactionStatus, TransactionType, UNCATEGORIZED_LABEL,
    aggregate, aggregate_by_category, aggregate_by_month, count_by_status, filter_and_sort,
};
