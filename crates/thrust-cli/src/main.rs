//! `thrust` command-line tool.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use thrust_cli::logging::{LogConfig, LogFormat, init_logging};
use thrust_cli::report::{BatchReport, InspectReport};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use crate::commands::{run_analyze, run_compare, run_inspect};
use crate::summary::{print_analysis, print_comparison, print_inspection, print_json};
use crate::types::CompareReport;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Runs a subcommand and returns the process exit code.
fn run(command: &Command) -> anyhow::Result<i32> {
    match command {
        Command::Analyze(args) => {
            let batch = run_analyze(args)?;
            match args.format {
                OutputFormatArg::Table => print_analysis(&batch),
                OutputFormatArg::Json => print_json(&BatchReport::new(&batch))?,
            }
            Ok(i32::from(batch.has_errors()))
        }
        Command::Compare(args) => {
            let result = run_compare(args)?;
            match args.format {
                OutputFormatArg::Table => print_comparison(&result),
                OutputFormatArg::Json => print_json(&CompareReport::new(&result))?,
            }
            Ok(i32::from(result.batch.has_errors()))
        }
        Command::Inspect(args) => {
            let result = run_inspect(args)?;
            match args.format {
                OutputFormatArg::Table => print_inspection(&result),
                OutputFormatArg::Json => print_json(&InspectReport::new(
                    &result.file_name,
                    &result.dataset,
                    &result.roles,
                ))?,
            }
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level_filter(cli.verbosity.tracing_level_filter());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone())
}
