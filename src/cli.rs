//! Command line arguments and the commands they run.

use std::{io::Write, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Error,
    config::AppConfig,
    import::load_path,
    report::{Report, format_currency, write_table},
    seed::sample_transactions,
    subscription::{Plan, Subscription},
    transaction::{FilterQuery, Transaction, aggregate, filter_and_sort},
};

/// View, filter and report on business transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File path to a .json or .csv file of transactions. Uses sample data if not set.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// The canonical timezone that decides which calendar day is "today".
    #[arg(long, default_value = "UTC")]
    pub timezone: String,

    /// The log filter, e.g. "debug" or "finboard_rs=trace".
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// The commands the app can run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the filtered transactions and their totals.
    List {
        /// Which transactions to show and in what order.
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print a report with monthly and category breakdowns.
    Report {
        /// Which transactions to include and in what order.
        #[command(flatten)]
        filter: FilterArgs,

        /// The output format.
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Print the state of a trial that started at a given time.
    Trial {
        /// The plan being trialled, e.g. "starter".
        #[arg(long)]
        plan: String,

        /// When the trial started, in RFC 3339 format.
        #[arg(long)]
        started: String,
    },
}

/// The raw filter flags, validated when the command runs.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// One of all, paid, pending or overdue.
    #[arg(long)]
    pub status: Option<String>,

    /// One of all, today, last-7-days, last-30-days or custom.
    #[arg(long)]
    pub range: Option<String>,

    /// One of date, status, amount or client.
    #[arg(long)]
    pub sort_by: Option<String>,

    /// One of asc or desc.
    #[arg(long)]
    pub order: Option<String>,

    /// The first day of a custom range, YYYY-MM-DD.
    #[arg(long)]
    pub start_date: Option<String>,

    /// The last day of a custom range, YYYY-MM-DD.
    #[arg(long)]
    pub end_date: Option<String>,
}

impl From<FilterArgs> for FilterQuery {
    fn from(args: FilterArgs) -> Self {
        Self {
            status: args.status,
            date_range: args.range,
            sort_by: args.sort_by,
            sort_order: args.order,
            start_date: args.start_date,
            end_date: args.end_date,
        }
    }
}

/// How a report is written.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// A human-readable summary and table.
    Text,
    /// One CSV row per transaction.
    Csv,
    /// The whole report as JSON.
    Json,
}

/// Run `command`, writing its output to `writer`.
///
/// # Errors
/// Returns any error from loading transactions, validating filters or writing
/// the output.
pub fn run<W: Write>(config: &AppConfig, command: Command, writer: &mut W) -> Result<(), Error> {
    let now = config.now();

    match command {
        Command::List { filter } => {
            let spec = FilterQuery::from(filter).parse()?;
            let transactions = load_transactions(config, now)?;
            let view = filter_and_sort(&transactions, &spec, now);
            let summary = aggregate(&view);

            write_table(&view, now.offset(), writer)?;
            writeln!(writer)?;
            writeln!(
                writer,
                "{} transactions, income {}, expenses {}, balance {}",
                summary.count,
                format_currency(summary.total_income),
                format_currency(summary.total_expenses),
                format_currency(summary.balance)
            )?;
        }
        Command::Report { filter, format } => {
            let spec = FilterQuery::from(filter).parse()?;
            let transactions = load_transactions(config, now)?;
            let report = Report::build(&transactions, &spec, now);

            match format {
                ReportFormat::Text => report.write_text(writer)?,
                ReportFormat::Csv => report.write_csv(&mut *writer)?,
                ReportFormat::Json => writeln!(writer, "{}", report.to_json()?)?,
            }
        }
        Command::Trial { plan, started } => {
            let plan: Plan = plan.parse()?;
            let started = OffsetDateTime::parse(&started, &Rfc3339)?;
            let subscription = Subscription::start_trial(plan, started)?;

            writeln!(writer, "Plan:           {plan}")?;
            writeln!(
                writer,
                "Status:         {:?}",
                subscription.effective_status(now)
            )?;
            writeln!(
                writer,
                "Days remaining: {}",
                subscription.trial_days_remaining(now)
            )?;
            writeln!(
                writer,
                "Price after trial: {} per month",
                format_currency(plan.monthly_price())
            )?;
        }
    }

    Ok(())
}

fn load_transactions(config: &AppConfig, now: OffsetDateTime) -> Result<Vec<Transaction>, Error> {
    match &config.input {
        Some(path) => load_path(path),
        None => {
            tracing::debug!("no input file given, using sample transactions");
            Ok(sample_transactions(now))
        }
    }
}
