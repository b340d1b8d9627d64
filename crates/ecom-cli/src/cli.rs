//! CLI argument definitions.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use ecom_cli::logging::{LogConfig, LogFormat};

use ecom_model::options::{DEFAULT_CITY_LIMIT, DEFAULT_DROP_THRESHOLD, DEFAULT_TOP_CATEGORIES};

#[derive(Parser)]
#[command(
    name = "ecom-eda",
    version,
    about = "Exploratory analysis of e-commerce order extracts",
    long_about = "Join the order, customer, payment, item, review, product and seller\n\
                  extracts, impute missing values, and report category demand,\n\
                  payment preferences and customer spend segments."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging setup for this invocation.
    ///
    /// `--log-level` wins over `-v/-q`; `RUST_LOG` applies only when neither
    /// is given. ANSI output follows `--color`, and `auto` only colors an
    /// interactive stderr.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.verbosity.is_present() || self.log_level.is_some();
        LogConfig {
            level_filter: self
                .log_level
                .map_or_else(|| self.verbosity.tracing_level_filter(), LevelFilter::from),
            use_env_filter: !explicit,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            with_ansi: match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
            },
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the analysis over a data directory.
    Analyze(AnalyzeArgs),

    /// List the expected source extracts and their required columns.
    Datasets,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Directory holding the CSV extracts.
    #[arg(value_name = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Number of product categories in the demand ranking.
    #[arg(long = "top-categories", default_value_t = DEFAULT_TOP_CATEGORIES)]
    pub top_categories: usize,

    /// Number of distinct cities in the payment-by-city view.
    ///
    /// Cities are taken in alphabetical order of the grouped table, not by
    /// order volume.
    #[arg(long = "city-limit", default_value_t = DEFAULT_CITY_LIMIT)]
    pub city_limit: usize,

    /// Drop columns whose missing fraction is at least this value.
    #[arg(long = "drop-threshold", default_value_t = DEFAULT_DROP_THRESHOLD)]
    pub drop_threshold: f64,

    /// Handling of order items without a payment value.
    #[arg(long = "missing-payment", value_enum, default_value = "unknown")]
    pub missing_payment: MissingPaymentArg,

    /// Export derived tables and summary.json to this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also export the cleaned joined table.
    #[arg(long = "include-cleaned", requires = "output_dir")]
    pub include_cleaned: bool,

    /// Rows shown per table preview.
    #[arg(long = "preview-rows", default_value_t = 5)]
    pub preview_rows: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MissingPaymentArg {
    /// Label the row `Unknown`.
    Unknown,
    /// Abort the run.
    Reject,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_config(args: &[&str]) -> LogConfig {
        Cli::try_parse_from(args).unwrap().log_config()
    }

    #[test]
    fn log_level_flag_overrides_verbosity() {
        let config = log_config(&["ecom-eda", "-vv", "--log-level", "error", "datasets"]);
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn verbosity_flags_disable_rust_log() {
        let config = log_config(&["ecom-eda", "-v", "datasets"]);
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = log_config(&["ecom-eda", "--color", "never", "datasets"]);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.with_ansi);
    }

    #[test]
    fn log_file_and_format_are_forwarded() {
        let config = log_config(&[
            "ecom-eda",
            "--log-format",
            "json",
            "--log-file",
            "run.log",
            "analyze",
            "data",
        ]);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert!(!config.with_ansi);
    }
}
