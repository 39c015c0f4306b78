//! Mock transactions for demos and manual testing.

use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

use crate::transaction::{Recurrence, Transaction, TransactionStatus, TransactionType};

/// A fixed set of transactions with due dates placed relative to `now`.
///
/// The list covers both types and every status, and has due dates today,
/// within the last week, within the last month, older than a month, and in
/// the future.
pub fn sample_transactions(now: OffsetDateTime) -> Vec<Transaction> {
    use TransactionStatus::{Overdue, Paid, Pending};
    use TransactionType::{Expense, Income};

    let days_ago = |days: i64| now - Duration::days(days);

    vec![
        Transaction::build(1, Income, Decimal::new(4_500_00, 2), days_ago(0))
            .status(Paid)
            .client("Northwind Traders")
            .category("Consulting")
            .description("Website redesign, final milestone")
            .payment_method("Bank transfer")
            .finalize(),
        Transaction::build(2, Expense, Decimal::new(1_800_00, 2), days_ago(2))
            .status(Paid)
            .client("Harbour Properties")
            .category("Rent")
            .description("Office rent")
            .payment_method("Direct debit")
            .recurrence(Recurrence::Monthly)
            .finalize(),
        Transaction::build(3, Expense, Decimal::new(49_00, 2), days_ago(3))
            .status(Paid)
            .client("Cloudline")
            .category("Software")
            .description("Hosting")
            .payment_method("Credit card")
            .recurrence(Recurrence::Monthly)
            .finalize(),
        Transaction::build(4, Income, Decimal::new(1_250_00, 2), days_ago(5))
            .status(Pending)
            .client("Contoso")
            .category("Consulting")
            .description("Quarterly audit support")
            .finalize(),
        Transaction::build(5, Expense, Decimal::new(320_75, 2), days_ago(9))
            .status(Overdue)
            .client("City Power")
            .category("Utilities")
            .description("Electricity")
            .finalize(),
        Transaction::build(6, Income, Decimal::new(2_100_00, 2), days_ago(12))
            .status(Overdue)
            .client("Fabrikam")
            .category("Development")
            .description("Mobile app sprint 3")
            .finalize(),
        Transaction::build(7, Expense, Decimal::new(89_90, 2), days_ago(15))
            .status(Paid)
            .client("Paper & Co")
            .category("Office supplies")
            .finalize(),
        Transaction::build(8, Expense, Decimal::new(640_00, 2), days_ago(21))
            .status(Pending)
            .client("Skyward Travel")
            .category("Travel")
            .description("Client visit flights")
            .finalize(),
        Transaction::build(9, Income, Decimal::new(980_00, 2), days_ago(28))
            .status(Paid)
            .client("adventure works")
            .category("Development")
            .description("Bug fix retainer")
            .recurrence(Recurrence::Monthly)
            .finalize(),
        Transaction::build(10, Expense, Decimal::new(150_00, 2), days_ago(45))
            .status(Overdue)
            .description("Accountant fees")
            .finalize(),
        Transaction::build(11, Income, Decimal::new(3_000_00, 2), days_ago(60))
            .status(Paid)
            .client("Northwind Traders")
            .category("Consulting")
            .description("Website redesign, first milestone")
            .finalize(),
        Transaction::build(12, Expense, Decimal::new(1_800_00, 2), days_ago(-5))
            .status(Pending)
            .client("Harbour Properties")
            .category("Rent")
            .description("Office rent")
            .payment_method("Direct debit")
            .recurrence(Recurrence::Monthly)
            .finalize(),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use time::macros::datetime;

    use crate::transaction::{
        DateRangeFilter, FilterSpecification, TransactionStatus, TransactionType, filter_and_sort,
    };

    use super::sample_transactions;

    #[test]
    fn ids_are_unique() {
        let transactions = sample_transactions(datetime!(2025-06-15 12:00 UTC));

        let ids: HashSet<_> = transactions.iter().map(|transaction| transaction.id).collect();

        assert_eq!(ids.len(), transactions.len());
    }

    #[test]
    fn covers_every_status_and_type() {
        let transactions = sample_transactions(datetime!(2025-06-15 12:00 UTC));

        for status in [
            TransactionStatus::Paid,
            TransactionStatus::Pending,
            TransactionStatus::Overdue,
        ] {
            assert!(
                transactions.iter().any(|transaction| transaction.status == status),
                "want at least one {status:?} transaction"
            );
        }
        assert!(transactions.iter().any(|transaction| transaction.is_income()));
        assert!(
            transactions
                .iter()
                .any(|transaction| transaction.transaction_type == TransactionType::Expense)
        );
    }

    #[test]
    fn has_one_transaction_due_today() {
        let now = datetime!(2025-06-15 12:00 UTC);
        let spec = FilterSpecification {
            date_range: DateRangeFilter::Today,
            ..Default::default()
        };

        let got = filter_and_sort(&sample_transactions(now), &spec, now);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, 1);
    }
}
