//! Totals and breakdowns over transaction lists.
//!
//! Provides the scalar summary shown above a transaction table, and the
//! monthly, category and status breakdowns used by dashboards and reports.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, UtcOffset};

use super::core::{Transaction, TransactionStatus, TransactionType};

/// The label used for expenses without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Sums and counts over a list of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Aggregate {
    /// The sum of all income amounts.
    pub total_income: Decimal,
    /// The sum of all expense amounts.
    pub total_expenses: Decimal,
    /// Income minus expenses.
    pub balance: Decimal,
    /// The number of transactions.
    pub count: usize,
}

/// Computes income and expense totals, the balance and the count.
///
/// Amounts are summed as decimals, so long lists do not accumulate rounding
/// errors.
pub fn aggregate(transactions: &[Transaction]) -> Aggregate {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => total_income += transaction.amount,
            TransactionType::Expense => total_expenses += transaction.amount,
        }
    }

    Aggregate {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        count: transactions.len(),
    }
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    /// The first day of the month.
    pub month: Date,
    /// The sum of income due in the month.
    pub income: Decimal,
    /// The sum of expenses due in the month.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
}

/// Aggregates transaction amounts by the calendar month they are due in.
///
/// # Arguments
/// * `transactions` - The transactions to aggregate
/// * `offset` - The UTC offset that decides which month a due date falls in
///
/// # Returns
/// One entry per month that has at least one transaction, in chronological order.
pub fn aggregate_by_month(transactions: &[Transaction], offset: UtcOffset) -> Vec<MonthlyTotals> {
    let mut totals: BTreeMap<Date, (Decimal, Decimal)> = BTreeMap::new();

    for transaction in transactions {
        let date = transaction.due_date.to_offset(offset).date();
        let month = date
            .replace_day(1)
            .expect("the first day exists in every month");
        let (income, expenses) = totals.entry(month).or_default();

        match transaction.transaction_type {
            TransactionType::Income => *income += transaction.amount,
            TransactionType::Expense => *expenses += transaction.amount,
        }
    }

    totals
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyTotals {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}

/// The expenses of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// The category name, or [UNCATEGORIZED_LABEL].
    pub category: String,
    /// The sum of expenses in the category.
    pub total: Decimal,
    /// The share of all expenses, as a percentage rounded to two decimal places.
    pub percent: Decimal,
}

/// Groups expenses by category.
///
/// Income is ignored. Categories are sorted by decreasing total and then by
/// name, with uncategorized expenses last.
pub fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        let category = transaction
            .category
            .as_deref()
            .unwrap_or(UNCATEGORIZED_LABEL);
        *totals.entry(category).or_default() += transaction.amount;
    }

    let total_expenses: Decimal = totals.values().copied().sum();
    let uncategorized = totals.remove(UNCATEGORIZED_LABEL);

    let mut categories: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| category_total(category, total, total_expenses))
        .collect();

    categories.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    if let Some(total) = uncategorized {
        categories.push(category_total(UNCATEGORIZED_LABEL, total, total_expenses));
    }

    categories
}

fn category_total(category: &str, total: Decimal, total_expenses: Decimal) -> CategoryTotal {
    let percent = if total_expenses.is_zero() {
        Decimal::ZERO
    } else {
        (total / total_expenses * Decimal::ONE_HUNDRED).round_dp(2)
    };

    CategoryTotal {
        category: category.to_owned(),
        total,
        percent,
    }
}

/// Transaction counts per status and the amounts still to be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    /// The number of paid transactions.
    pub paid: usize,
    /// The number of pending transactions.
    pub pending: usize,
    /// The number of overdue transactions.
    pub overdue: usize,
    /// Unpaid income, i.e. money owed to the business.
    pub receivable: Decimal,
    /// Unpaid expenses, i.e. money the business owes.
    pub payable: Decimal,
}

/// Counts transactions by status and sums what is still outstanding.
pub fn count_by_status(transactions: &[Transaction]) -> StatusCounts {
    let mut counts = StatusCounts::default();

    for transaction in transactions {
        match transaction.status {
            TransactionStatus::Paid => {
                counts.paid += 1;
                continue;
            }
            TransactionStatus::Pending => counts.pending += 1,
            TransactionStatus::Overdue => counts.overdue += 1,
        }

        match transaction.transaction_type {
            TransactionType::Income => counts.receivable += transaction.amount,
            TransactionType::Expense => counts.payable += transaction.amount,
        }
    }

    counts
}
