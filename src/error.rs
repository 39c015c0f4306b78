//! Defines the crate level error type.

use crate::{subscription::Plan, transaction::TransactionId};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A filter or sort dimension was given a value it does not recognise.
    ///
    /// `field` names the dimension (e.g. "status", "date_range") and `value`
    /// is the rejected input exactly as it was supplied.
    #[error("invalid value \"{value}\" for filter field \"{field}\"")]
    InvalidFilterValue {
        /// The name of the filter dimension.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A date or date-time in imported data could not be parsed.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not parse date: {0}")]
    InvalidDate(String),

    /// Two transactions in the same collection share an ID.
    #[error("the transaction ID {0} appears more than once")]
    DuplicateTransactionId(TransactionId),

    /// A transaction was given a negative amount.
    ///
    /// Whether money was spent or earned is carried by the transaction type,
    /// so amounts are always zero or positive.
    #[error("transaction {0} has a negative amount")]
    NegativeAmount(TransactionId),

    /// The JSON input could not be parsed, or the output could not be serialized.
    #[error("invalid JSON: {0}")]
    Json(String),

    /// The CSV input could not be parsed, or the output could not be written.
    #[error("invalid CSV: {0}")]
    Csv(String),

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(String),

    /// The input file does not have an extension that maps to a known format.
    #[error("unsupported file format \"{0}\", expected a .json or .csv file")]
    UnsupportedFormat(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The plan name does not match any plan.
    #[error("unknown plan \"{0}\"")]
    InvalidPlan(String),

    /// Tried to start a trial on a plan that does not offer one.
    #[error("the {0} plan does not have a trial")]
    TrialNotAvailable(Plan),

    /// Tried to move a subscription to a plan that is not an upgrade.
    #[error("cannot change plan from {from} to {to}")]
    InvalidPlanChange {
        /// The current plan.
        from: Plan,
        /// The requested plan.
        to: Plan,
    },
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Csv(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<time::error::Parse> for Error {
    fn from(value: time::error::Parse) -> Self {
        Error::InvalidDate(value.to_string())
    }
}
