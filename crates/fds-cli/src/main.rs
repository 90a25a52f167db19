//! `fds`: regulatory friction dataset CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use fds_cli::logging::{LogConfig, LogFormat, init_logging};
use fds_cli::summary::{print_findings, print_update_summary, print_validation_summary};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_update, run_validate};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Update(args) => match run_update(&args) {
            Ok(outcome) => {
                print_update_summary(&outcome);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Validate(args) => match run_validate(&args) {
            Ok(summary) => {
                print_validation_summary(&summary);
                0
            }
            Err(error) => {
                print_findings(&error);
                eprintln!("error: {error}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };

    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_ansi(ansi);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_shape_log_config() {
        let cli = Cli::parse_from([
            "fds",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--log-file",
            "fds.log",
            "--color",
            "never",
            "validate",
        ]);
        let config = log_config_from_cli(&cli);

        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_file.as_deref(), Some(std::path::Path::new("fds.log")));
        assert!(!config.with_ansi);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn defaults_defer_to_env_filter() {
        let cli = Cli::parse_from(["fds", "validate"]);
        let config = log_config_from_cli(&cli);

        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.log_file.is_none());
        assert!(config.use_env_filter);
    }
}
