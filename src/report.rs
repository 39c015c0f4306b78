//! Reports over a filtered view of transactions.
//!
//! A [Report] bundles the view with its totals and breakdowns, and can be
//! written as plain text, CSV or JSON.

use std::{io::Write, sync::OnceLock};

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    import::{CSV_HEADER, CsvRow},
    transaction::{
        Aggregate, CategoryTotal, FilterSpecification, MonthlyTotals, StatusCounts, Transaction,
        aggregate, aggregate_by_category, aggregate_by_month, count_by_status, filter_and_sort,
    },
};

/// A filtered view of transactions with its totals and breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// When the report was built.
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// The filters used to build the view.
    pub filter: FilterSpecification,
    /// Totals over the view.
    pub summary: Aggregate,
    /// Counts and outstanding amounts per status.
    pub statuses: StatusCounts,
    /// Totals per calendar month, in chronological order.
    pub monthly: Vec<MonthlyTotals>,
    /// Expense totals per category.
    pub categories: Vec<CategoryTotal>,
    /// The filtered and sorted transactions.
    pub transactions: Vec<Transaction>,
}

impl Report {
    /// Build a report from the transactions that match `spec`.
    ///
    /// Months are calendar months in the offset of `now`.
    pub fn build(
        transactions: &[Transaction],
        spec: &FilterSpecification,
        now: OffsetDateTime,
    ) -> Self {
        let view = filter_and_sort(transactions, spec, now);
        let summary = aggregate(&view);

        tracing::info!(
            "building report for {spec} with {} of {} transactions",
            summary.count,
            transactions.len()
        );

        Self {
            generated_at: now,
            filter: *spec,
            summary,
            statuses: count_by_status(&view),
            monthly: aggregate_by_month(&view, now.offset()),
            categories: aggregate_by_category(&view),
            transactions: view,
        }
    }

    /// Write a human-readable summary followed by the transaction table.
    ///
    /// # Errors
    /// Returns [Error::Io] if the writer fails.
    pub fn write_text<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        writeln!(writer, "Report generated {}", self.generated_at.date())?;
        writeln!(writer, "Filter: {}", self.filter)?;
        writeln!(writer)?;
        writeln!(writer, "Transactions: {}", self.summary.count)?;
        writeln!(writer, "Income:       {}", format_currency(self.summary.total_income))?;
        writeln!(writer, "Expenses:     {}", format_currency(self.summary.total_expenses))?;
        writeln!(writer, "Balance:      {}", format_currency(self.summary.balance))?;
        writeln!(
            writer,
            "Status:       {} paid, {} pending, {} overdue",
            self.statuses.paid, self.statuses.pending, self.statuses.overdue
        )?;
        writeln!(writer, "Receivable:   {}", format_currency(self.statuses.receivable))?;
        writeln!(writer, "Payable:      {}", format_currency(self.statuses.payable))?;

        if !self.monthly.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "By month:")?;
            for month in &self.monthly {
                writeln!(
                    writer,
                    "  {}-{:02}  income {}  expenses {}  net {}",
                    month.month.year(),
                    u8::from(month.month.month()),
                    format_currency(month.income),
                    format_currency(month.expenses),
                    format_currency(month.net)
                )?;
            }
        }

        if !self.categories.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Expenses by category:")?;
            for category in &self.categories {
                writeln!(
                    writer,
                    "  {:<20} {:>14}  {}%",
                    category.category,
                    format_currency(category.total),
                    category.percent
                )?;
            }
        }

        writeln!(writer)?;
        write_table(&self.transactions, self.generated_at.offset(), writer)
    }

    /// Write the transactions as CSV, in the format read by [crate::import::read_csv].
    ///
    /// The header row is written even when there are no transactions.
    ///
    /// # Errors
    /// Returns [Error::Csv] if a row cannot be written.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(CSV_HEADER)?;

        for transaction in &self.transactions {
            csv_writer.serialize(CsvRow::from_transaction(transaction)?)?;
        }

        csv_writer.flush()?;

        Ok(())
    }

    /// Serialize the whole report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [Error::Json] if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write transactions as an aligned plain text table.
///
/// Due dates are shown as calendar dates in `offset`.
///
/// # Errors
/// Returns [Error::Io] if the writer fails.
pub fn write_table<W: Write>(
    transactions: &[Transaction],
    offset: UtcOffset,
    writer: &mut W,
) -> Result<(), Error> {
    writeln!(
        writer,
        "{:>4}  {:<10}  {:<7}  {:<7}  {:>14}  {:<20}  {}",
        "ID", "Due", "Type", "Status", "Amount", "Client", "Description"
    )?;

    for transaction in transactions {
        writeln!(
            writer,
            "{:>4}  {:<10}  {:<7}  {:<7}  {:>14}  {:<20}  {}",
            transaction.id,
            transaction.due_date.to_offset(offset).date().to_string(),
            transaction.transaction_type.badge().label,
            transaction.status.badge().label,
            format_currency(transaction.amount),
            transaction.client.as_deref().unwrap_or("-"),
            transaction.description
        )?;
    }

    Ok(())
}

/// Format an amount as dollars and cents, e.g. "$1,234.50" or "-$40.00".
pub fn format_currency(amount: Decimal) -> String {
    let amount = amount.round_dp(2);

    // numfmt switches to scientific notation past twelve integer digits.
    if amount.abs() >= Decimal::from(1_000_000_000_000_i64) {
        return format_large_currency(amount);
    }

    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("\"$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("\"-$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    let number = amount.to_f64().unwrap_or_default();

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3".
    match formatted_string.find('.') {
        None => formatted_string.push_str(".00"),
        Some(index) if formatted_string.len() - index == 2 => formatted_string.push('0'),
        Some(_) => {}
    }

    formatted_string
}

fn format_large_currency(amount: Decimal) -> String {
    let digits = format!("{:.2}", amount.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };

    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::{
        import::read_csv,
        transaction::{
            DateRangeFilter, FilterSpecification, Recurrence, SortBy, SortOrder, StatusFilter,
            Transaction, TransactionStatus, TransactionType,
        },
    };

    use super::{Report, format_currency, write_table};

    const T0: OffsetDateTime = datetime!(2025-06-15 12:00 UTC);

    fn scenario_transactions() -> Vec<Transaction> {
        vec![
            Transaction::build(1, TransactionType::Income, Decimal::from(100), T0)
                .status(TransactionStatus::Paid)
                .client("Acme")
                .finalize(),
            Transaction::build(
                2,
                TransactionType::Expense,
                Decimal::from(40),
                T0 + Duration::days(1),
            )
            .status(TransactionStatus::Pending)
            .category("Software")
            .payment_method("Card")
            .recurrence(Recurrence::Monthly)
            .finalize(),
            Transaction::build(
                3,
                TransactionType::Expense,
                Decimal::from(60),
                T0 - Duration::days(10),
            )
            .status(TransactionStatus::Overdue)
            .category("Rent")
            .description("June rent")
            .finalize(),
        ]
    }

    fn amount_spec() -> FilterSpecification {
        FilterSpecification {
            sort_by: SortBy::Amount,
            sort_order: SortOrder::Ascending,
            ..Default::default()
        }
    }

    #[test]
    fn build_filters_and_aggregates() {
        let report = Report::build(&scenario_transactions(), &amount_spec(), T0);

        let ids: Vec<_> = report.transactions.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(report.summary.total_income, Decimal::from(100));
        assert_eq!(report.summary.total_expenses, Decimal::from(100));
        assert_eq!(report.summary.balance, Decimal::ZERO);
        assert_eq!(report.summary.count, 3);
        assert_eq!(report.statuses.payable, Decimal::from(100));
        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.categories[0].category, "Rent");
    }

    #[test]
    fn build_aggregates_only_the_view() {
        let spec = FilterSpecification {
            status: StatusFilter::Overdue,
            ..Default::default()
        };

        let report = Report::build(&scenario_transactions(), &spec, T0);

        assert_eq!(report.summary.count, 1);
        assert_eq!(report.summary.total_income, Decimal::ZERO);
        assert_eq!(report.summary.balance, Decimal::from(-60));
    }

    #[test]
    fn text_report_contains_summary_and_rows() {
        let report = Report::build(&scenario_transactions(), &amount_spec(), T0);
        let mut output = Vec::new();

        report.write_text(&mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Transactions: 3"), "got:\n{text}");
        assert!(text.contains("1 paid, 1 pending, 1 overdue"), "got:\n{text}");
        assert!(text.contains("status=all range=all sort=amount asc"), "got:\n{text}");
        assert!(text.contains(&format_currency(Decimal::from(100))), "got:\n{text}");
        assert!(text.contains("June rent"), "got:\n{text}");
        assert!(text.contains("Overdue"), "got:\n{text}");
    }

    #[test]
    fn csv_report_can_be_read_back() {
        let report = Report::build(&scenario_transactions(), &amount_spec(), T0);
        let mut output = Vec::new();

        report.write_csv(&mut output).unwrap();

        let got = read_csv(output.as_slice()).unwrap();
        assert_eq!(got.len(), 3);
        assert_eq!(got[0].id, 2);
        assert_eq!(got[0].category.as_deref(), Some("Software"));
        assert_eq!(got[0].payment_method.as_deref(), Some("Card"));
        assert_eq!(got[0].recurrence, Some(Recurrence::Monthly));
        assert_eq!(got[2].client.as_deref(), Some("Acme"));
        assert_eq!(got[2].payment_method, None);
        assert_eq!(got[2].recurrence, None);
        assert_eq!(got[1].due_date, T0 - Duration::days(10));
        assert_eq!(got, report.transactions);
    }

    #[test]
    fn empty_csv_report_has_header() {
        let spec = FilterSpecification {
            status: StatusFilter::Paid,
            date_range: DateRangeFilter::Today,
            ..Default::default()
        };
        let report = Report::build(&scenario_transactions(), &spec, T0 + Duration::days(1));
        let mut output = Vec::new();

        report.write_csv(&mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "id,type,amount,due_date,status,client,category,description,payment_method,recurrence\n"
        );
        assert_eq!(read_csv(text.as_bytes()).unwrap(), Vec::new());
    }

    #[test]
    fn table_shows_due_dates_in_local_calendar() {
        let now = datetime!(2025-06-15 08:00 +12);
        let transactions = vec![
            Transaction::build(
                1,
                TransactionType::Expense,
                Decimal::from(5),
                datetime!(2025-06-14 20:00 UTC),
            )
            .finalize(),
        ];
        let spec = FilterSpecification {
            date_range: DateRangeFilter::Today,
            ..Default::default()
        };
        let report = Report::build(&transactions, &spec, now);
        let mut output = Vec::new();

        write_table(&report.transactions, now.offset(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(report.transactions.len(), 1);
        assert!(text.contains("2025-06-15"), "got:\n{text}");
        assert!(!text.contains("2025-06-14"), "got:\n{text}");
    }

    #[test]
    fn json_report_has_summary() {
        let report = Report::build(&scenario_transactions(), &amount_spec(), T0);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["summary"]["count"], 3);
        assert_eq!(json["filter"]["sort_by"], "amount");
        assert_eq!(json["generated_at"], "2025-06-15T12:00:00Z");
        assert_eq!(json["transactions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn format_currency_signs_and_zero() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert!(format_currency(Decimal::from(-40)).starts_with("-$"));
        assert!(format_currency(Decimal::new(1250, 2)).starts_with('$'));
        assert!(format_currency(Decimal::new(1250, 2)).ends_with(".50"));
    }

    #[test]
    fn format_currency_large_amounts_without_exponent() {
        let amount = Decimal::from_str("12345678901234567.89").unwrap();

        assert_eq!(format_currency(amount), "$12,345,678,901,234,567.89");
        assert_eq!(format_currency(-amount), "-$12,345,678,901,234,567.89");
        assert_eq!(
            format_currency(Decimal::from(1_000_000_000_000_i64)),
            "$1,000,000,000,000.00"
        );
    }
}
