//! Reading transaction lists from JSON and CSV files.
//!
//! CSV files use the header
//! `id,type,amount,due_date,status,client,category,description,payment_method,recurrence`
//! with due dates in RFC 3339 format. The last two columns may be left out.
//! The same layout is used when reports are written as CSV.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Error,
    transaction::{Recurrence, Transaction, TransactionId, TransactionStatus, TransactionType},
};

/// The header row of a transaction CSV file, in the field order of [CsvRow].
pub(crate) const CSV_HEADER: [&str; 10] = [
    "id",
    "type",
    "amount",
    "due_date",
    "status",
    "client",
    "category",
    "description",
    "payment_method",
    "recurrence",
];

/// One line of a transaction CSV file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    id: TransactionId,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: String,
    due_date: String,
    status: TransactionStatus,
    client: Option<String>,
    category: Option<String>,
    description: Option<String>,
    #[serde(default)]
    payment_method: Option<String>,
    #[serde(default)]
    recurrence: Option<Recurrence>,
}

impl CsvRow {
    pub(crate) fn from_transaction(transaction: &Transaction) -> Result<Self, Error> {
        let due_date = transaction
            .due_date
            .format(&Rfc3339)
            .map_err(|error| Error::InvalidDate(error.to_string()))?;

        Ok(Self {
            id: transaction.id,
            transaction_type: transaction.transaction_type,
            amount: transaction.amount.to_string(),
            due_date,
            status: transaction.status,
            client: transaction.client.clone(),
            category: transaction.category.clone(),
            description: Some(transaction.description.clone()).filter(|text| !text.is_empty()),
            payment_method: transaction.payment_method.clone(),
            recurrence: transaction.recurrence,
        })
    }

    fn into_transaction(self) -> Result<Transaction, Error> {
        let amount = Decimal::from_str(self.amount.trim()).map_err(|error| {
            Error::Csv(format!(
                "invalid amount \"{}\" for transaction {}: {error}",
                self.amount, self.id
            ))
        })?;
        let due_date = OffsetDateTime::parse(self.due_date.trim(), &Rfc3339)?;

        Ok(Transaction {
            id: self.id,
            transaction_type: self.transaction_type,
            amount,
            due_date,
            status: self.status,
            client: self.client,
            category: self.category,
            description: self.description.unwrap_or_default(),
            payment_method: self.payment_method,
            recurrence: self.recurrence,
        })
    }
}

/// Read a JSON array of transactions.
///
/// # Errors
/// This function will return a:
/// - [Error::Json] if the input is not a valid array of transactions,
/// - [Error::DuplicateTransactionId] if two transactions share an ID,
/// - or [Error::NegativeAmount] if a transaction has a negative amount.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Transaction>, Error> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;
    validate(&transactions)?;

    Ok(transactions)
}

/// Read transactions from CSV with a header row.
///
/// Empty optional cells are read as `None`.
///
/// # Errors
/// This function will return a:
/// - [Error::Csv] if a row cannot be parsed,
/// - [Error::InvalidDate] if a due date is not in RFC 3339 format,
/// - [Error::DuplicateTransactionId] if two transactions share an ID,
/// - or [Error::NegativeAmount] if a transaction has a negative amount.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Transaction>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let transactions = csv_reader
        .deserialize::<CsvRow>()
        .map(|row| row.map_err(Error::from)?.into_transaction())
        .collect::<Result<Vec<_>, _>>()?;
    validate(&transactions)?;

    Ok(transactions)
}

/// Read transactions from a `.json` or `.csv` file.
///
/// # Errors
/// Returns [Error::UnsupportedFormat] for any other extension, [Error::Io] if
/// the file cannot be opened, or any error from [read_json] and [read_csv].
pub fn load_path(path: &Path) -> Result<Vec<Transaction>, Error> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let transactions = match extension.as_str() {
        "json" => read_json(BufReader::new(File::open(path)?))?,
        "csv" => read_csv(BufReader::new(File::open(path)?))?,
        _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
    };

    tracing::info!(
        "loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );

    Ok(transactions)
}

fn validate(transactions: &[Transaction]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(transactions.len());

    for transaction in transactions {
        if !seen.insert(transaction.id) {
            tracing::warn!("rejecting import: duplicate transaction ID {}", transaction.id);
            return Err(Error::DuplicateTransactionId(transaction.id));
        }

        if transaction.amount.is_sign_negative() && !transaction.amount.is_zero() {
            tracing::warn!(
                "rejecting import: transaction {} has a negative amount",
                transaction.id
            );
            return Err(Error::NegativeAmount(transaction.id));
        }
    }

    Ok(())
}
