//! The filter specification for transaction views and its validation.
//!
//! A [FilterQuery] holds the raw values supplied by a query string, CLI flags
//! or a form. [FilterQuery::parse] turns it into a typed
//! [FilterSpecification], rejecting any value it does not recognise.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, macros::format_description};

use crate::Error;

use super::core::TransactionStatus;

/// Which payment statuses to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    /// Keep every transaction.
    #[default]
    All,
    /// Keep paid transactions only.
    Paid,
    /// Keep pending transactions only.
    Pending,
    /// Keep overdue transactions only.
    Overdue,
}

impl StatusFilter {
    /// The value used for this filter in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    /// Whether a transaction with `status` passes the filter.
    pub fn matches(self, status: TransactionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Paid => status == TransactionStatus::Paid,
            Self::Pending => status == TransactionStatus::Pending,
            Self::Overdue => status == TransactionStatus::Overdue,
        }
    }

    fn parse(value: &str) -> Result<Self, Error> {
        match value.trim() {
            "all" => Ok(Self::All),
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            _ => Err(invalid("status", value)),
        }
    }
}

/// Which due dates to keep, relative to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRangeFilter {
    /// Keep every transaction.
    #[default]
    All,
    /// Keep transactions due on the current local calendar day.
    Today,
    /// Keep transactions due in the seven days up to and including now.
    #[serde(rename = "last-7-days")]
    Last7Days,
    /// Keep transactions due in the thirty days up to and including now.
    #[serde(rename = "last-30-days")]
    Last30Days,
    /// Keep transactions due between two local calendar days, inclusive.
    ///
    /// If either bound is missing the range keeps every transaction.
    Custom {
        /// The first day of the range.
        start: Option<Date>,
        /// The last day of the range.
        end: Option<Date>,
    },
}

impl DateRangeFilter {
    /// Whether a transaction due at `due_date` passes the filter.
    ///
    /// `now` is the current instant, its offset decides which calendar day
    /// "today" is and where custom ranges start and end.
    pub fn contains(self, due_date: OffsetDateTime, now: OffsetDateTime) -> bool {
        match self {
            Self::All => true,
            Self::Today => local_date(due_date, now) == now.date(),
            Self::Last7Days => within_days(due_date, now, 7),
            Self::Last30Days => within_days(due_date, now, 30),
            Self::Custom {
                start: Some(start),
                end: Some(end),
            } => {
                let date = local_date(due_date, now);
                start <= date && date <= end
            }
            Self::Custom { .. } => true,
        }
    }

    fn parse(value: &str, start: Option<&str>, end: Option<&str>) -> Result<Self, Error> {
        match value.trim() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "last-7-days" => Ok(Self::Last7Days),
            "last-30-days" => Ok(Self::Last30Days),
            "custom" => Ok(Self::Custom {
                start: start.and_then(parse_bound),
                end: end.and_then(parse_bound),
            }),
            _ => Err(invalid("date_range", value)),
        }
    }
}

fn local_date(due_date: OffsetDateTime, now: OffsetDateTime) -> Date {
    due_date.to_offset(now.offset()).date()
}

fn within_days(due_date: OffsetDateTime, now: OffsetDateTime, days: i64) -> bool {
    now - time::Duration::days(days) <= due_date && due_date <= now
}

/// Parse a custom range bound, treating malformed dates as absent.
fn parse_bound(value: &str) -> Option<Date> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    match Date::parse(value, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Some(date),
        Err(error) => {
            tracing::debug!("ignoring malformed custom range bound {value:?}: {error}");
            None
        }
    }
}

/// The field transactions are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Order by due date.
    #[default]
    Date,
    /// Order by status, overdue then pending then paid.
    Status,
    /// Order by amount.
    Amount,
    /// Order by client name.
    Client,
}

impl SortBy {
    /// The value used for this field in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Status => "status",
            Self::Amount => "amount",
            Self::Client => "client",
        }
    }

    fn parse(value: &str) -> Result<Self, Error> {
        match value.trim() {
            "date" => Ok(Self::Date),
            "status" => Ok(Self::Status),
            "amount" => Ok(Self::Amount),
            "client" => Ok(Self::Client),
            _ => Err(invalid("sort_by", value)),
        }
    }
}

/// The order to sort transactions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    #[default]
    Descending,
}

impl SortOrder {
    /// The short value used for this order in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    fn parse(value: &str) -> Result<Self, Error> {
        match value.trim() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(invalid("sort_order", value)),
        }
    }
}

/// Describes which transactions to show and how to order them.
///
/// The default shows every transaction, most recent due date first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterSpecification {
    /// Which payment statuses to keep.
    pub status: StatusFilter,
    /// Which due dates to keep.
    pub date_range: DateRangeFilter,
    /// The field to sort by.
    pub sort_by: SortBy,
    /// The direction to sort in.
    pub sort_order: SortOrder,
}

/// The unvalidated form of a [FilterSpecification].
///
/// Missing fields take the [FilterSpecification] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterQuery {
    /// One of `all`, `paid`, `pending` or `overdue`.
    pub status: Option<String>,
    /// One of `all`, `today`, `last-7-days`, `last-30-days` or `custom`.
    #[serde(alias = "range")]
    pub date_range: Option<String>,
    /// One of `date`, `status`, `amount` or `client`.
    pub sort_by: Option<String>,
    /// One of `asc`, `ascending`, `desc` or `descending`.
    #[serde(alias = "order")]
    pub sort_order: Option<String>,
    /// The first day of a custom range as `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// The last day of a custom range as `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl FilterQuery {
    /// Deserialize a query from a URL query string, e.g. `status=paid&range=today`.
    ///
    /// # Errors
    /// Returns [Error::InvalidFilterValue] if the query string is not valid
    /// `application/x-www-form-urlencoded` data.
    pub fn from_query_string(query: &str) -> Result<Self, Error> {
        serde_urlencoded::from_str(query).map_err(|error| {
            tracing::debug!("could not parse filter query {query:?}: {error}");
            invalid("query", query)
        })
    }

    /// Validate the query and convert it into a [FilterSpecification].
    ///
    /// Malformed custom range dates are not errors, they leave that bound
    /// unset which turns the custom range into a no-op.
    ///
    /// # Errors
    /// Returns [Error::InvalidFilterValue] naming the first dimension whose
    /// value is not recognised.
    pub fn parse(&self) -> Result<FilterSpecification, Error> {
        let defaults = FilterSpecification::default();

        let status = match &self.status {
            Some(value) => StatusFilter::parse(value)?,
            None => defaults.status,
        };
        let date_range = match &self.date_range {
            Some(value) => DateRangeFilter::parse(
                value,
                self.start_date.as_deref(),
                self.end_date.as_deref(),
            )?,
            None => defaults.date_range,
        };
        let sort_by = match &self.sort_by {
            Some(value) => SortBy::parse(value)?,
            None => defaults.sort_by,
        };
        let sort_order = match &self.sort_order {
            Some(value) => SortOrder::parse(value)?,
            None => defaults.sort_order,
        };

        Ok(FilterSpecification {
            status,
            date_range,
            sort_by,
            sort_order,
        })
    }
}

impl TryFrom<&FilterQuery> for FilterSpecification {
    type Error = Error;

    fn try_from(query: &FilterQuery) -> Result<Self, Self::Error> {
        query.parse()
    }
}

impl Display for DateRangeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Today => f.write_str("today"),
            Self::Last7Days => f.write_str("last-7-days"),
            Self::Last30Days => f.write_str("last-30-days"),
            Self::Custom { start, end } => {
                let bound = |date: &Option<Date>| {
                    date.map(|date| date.to_string()).unwrap_or_else(|| "*".to_owned())
                };
                write!(f, "custom {}..{}", bound(start), bound(end))
            }
        }
    }
}

impl Display for FilterSpecification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "status={} range={} sort={} {}",
            self.status.as_str(),
            self.date_range,
            self.sort_by.as_str(),
            self.sort_order.as_str()
        )
    }
}

fn invalid(field: &'static str, value: &str) -> Error {
    Error::InvalidFilterValue {
        field,
        value: value.to_owned(),
    }
}
