use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use finboard_rs::{
    Error,
    cli::{Args, run},
    config::AppConfig,
};

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_level);

    let config = match AppConfig::from_args(&args) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!("running {:?} with {config:?}", args.command);

    let mut stdout = io::stdout().lock();

    match run(&config, args.command, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error @ Error::InvalidFilterValue { .. }) => {
            eprintln!("{error}");
            ExitCode::from(2)
        }
        Err(error) => {
            tracing::error!("command failed: {error}");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|error| {
        eprintln!("invalid log level {log_level:?} ({error}), falling back to \"info\"");
        EnvFilter::new("info")
    });

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}
