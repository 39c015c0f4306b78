//! Runtime configuration for the command line app.

use std::path::PathBuf;

use time::{OffsetDateTime, UtcOffset};

use crate::{Error, cli::Args, timezone::get_local_offset};

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Where to read transactions from, `None` to use the sample data.
    pub input: Option<PathBuf>,
    /// The UTC offset of the configured timezone.
    pub local_offset: UtcOffset,
    /// The log filter directive, e.g. "info" or "finboard_rs=debug".
    pub log_level: String,
}

impl AppConfig {
    /// Resolve the command line arguments into a config.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the timezone is not a canonical
    /// timezone name.
    pub fn from_args(args: &Args) -> Result<Self, Error> {
        let local_offset = get_local_offset(&args.timezone)
            .ok_or_else(|| Error::InvalidTimezone(args.timezone.clone()))?;

        Ok(Self {
            input: args.input.clone(),
            local_offset,
            log_level: args.log_level.clone(),
        })
    }

    /// The current instant in the configured timezone.
    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.local_offset)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use time::UtcOffset;

    use crate::{Error, cli::Args};

    use super::AppConfig;

    #[test]
    fn defaults_to_utc_and_sample_data() {
        let args = Args::parse_from(["finboard", "list"]);

        let config = AppConfig::from_args(&args).unwrap();

        assert_eq!(config.input, None);
        assert_eq!(config.local_offset, UtcOffset::UTC);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.now().offset(), UtcOffset::UTC);
    }

    #[test]
    fn rejects_unknown_timezone() {
        let args = Args::parse_from(["finboard", "--timezone", "Nowhere/Special", "list"]);

        let got = AppConfig::from_args(&args);

        assert_eq!(got, Err(Error::InvalidTimezone("Nowhere/Special".to_owned())));
    }
}
