//! Defines the core data model for transactions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionType {
    /// Money coming in, e.g. a paid invoice.
    Income,
    /// Money going out, e.g. rent or a supplier bill.
    Expense,
}

impl TransactionType {
    /// The value used for this type in query strings, JSON and CSV.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// The payment state of a transaction.
///
/// The status is supplied by whoever records the transaction, it is never
/// derived from the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionStatus {
    /// The money has moved.
    Paid,
    /// The money has not moved yet and the transaction is not late.
    Pending,
    /// The money has not moved and the due date has passed.
    Overdue,
}

impl TransactionStatus {
    /// The value used for this status in query strings, JSON and CSV.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    /// Position of the status when sorting by status, most urgent first.
    pub(crate) fn sort_rank(self) -> u8 {
        match self {
            Self::Overdue => 0,
            Self::Pending => 1,
            Self::Paid => 2,
        }
    }
}

/// How often a transaction repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    /// Every seven days.
    Weekly,
    /// Once a calendar month.
    Monthly,
    /// Once every three calendar months.
    Quarterly,
    /// Once a calendar year.
    Yearly,
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, unique within a collection.
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned. Never negative.
    pub amount: Decimal,
    /// When the transaction is due, or when it happened.
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
    /// Whether the transaction has been paid.
    pub status: TransactionStatus,
    /// The client or supplier on the other side of the transaction.
    #[serde(default)]
    pub client: Option<String>,
    /// A free text category, e.g. "Rent", "Consulting".
    #[serde(default)]
    pub category: Option<String>,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: String,
    /// How the transaction was or will be paid, e.g. "Bank transfer".
    #[serde(default)]
    pub payment_method: Option<String>,
    /// How often the transaction repeats, if at all.
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        id: TransactionId,
        transaction_type: TransactionType,
        amount: Decimal,
        due_date: OffsetDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id,
            transaction_type,
            amount,
            due_date,
            status: TransactionStatus::Pending,
            client: None,
            category: None,
            description: String::new(),
            payment_method: None,
            recurrence: None,
        }
    }

    /// Whether the transaction is income.
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}

/// A builder for creating [Transaction] instances.
///
/// Optional fields default to `None`, the description defaults to an empty
/// string and the status defaults to [TransactionStatus::Pending]. Call
/// [TransactionBuilder::finalize] to create the [Transaction].
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use time::macros::datetime;
///
/// use finboard_rs::{Transaction, TransactionStatus, TransactionType};
///
/// let transaction = Transaction::build(
///         1,
///         TransactionType::Income,
///         Decimal::new(1250, 0),
///         datetime!(2025-01-15 09:00 UTC),
///     )
///     .status(TransactionStatus::Paid)
///     .client("Acme Ltd")
///     .finalize();
///
/// assert!(transaction.is_income());
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: TransactionId,
    transaction_type: TransactionType,
    amount: Decimal,
    due_date: OffsetDateTime,
    status: TransactionStatus,
    client: Option<String>,
    category: Option<String>,
    description: String,
    payment_method: Option<String>,
    recurrence: Option<Recurrence>,
}

impl TransactionBuilder {
    /// Set the payment status.
    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the client name.
    pub fn client(mut self, client: &str) -> Self {
        self.client = Some(client.to_owned());
        self
    }

    /// Set the category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the payment method.
    pub fn payment_method(mut self, payment_method: &str) -> Self {
        self.payment_method = Some(payment_method.to_owned());
        self
    }

    /// Set how often the transaction repeats.
    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Create the [Transaction].
    pub fn finalize(self) -> Transaction {
        Transaction {
            id: self.id,
            transaction_type: self.transaction_type,
            amount: self.amount,
            due_date: self.due_date,
            status: self.status,
            client: self.client,
            category: self.category,
            description: self.description,
            payment_method: self.payment_method,
            recurrence: self.recurrence,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
