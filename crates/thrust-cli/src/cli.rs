//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use thrust_cli::options::OptionOverrides;
use thrust_core::AlignmentMode;

#[derive(Parser)]
#[command(
    name = "thrust",
    version,
    about = "Static-fire thrust curve analysis",
    long_about = "Analyse rocket motor static-fire sensor exports.\n\n\
                  Reads CSV, TSV and JSON files, detects the time and thrust columns,\n\
                  and reports peak thrust, rise time, burn duration and total impulse."
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

#[derive(Subcommand)]
pub enum Command {
    /// Extract propulsion metrics from one or more files.
    Analyze(AnalyzeArgs),

    /// Compare the metrics of several runs against the first one.
    Compare(CompareArgs),

    /// Show the columns, inferred types and detected roles of a file.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Sensor export files (.csv, .tsv, .json).
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub metrics: MetricArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Runs to compare. The first one is the baseline.
    #[arg(value_name = "FILE", required = true, num_args = 2..)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub metrics: MetricArgs,

    /// Reference point used to align the runs' time axes.
    #[arg(long = "align", value_enum, default_value = "start")]
    pub align: AlignArg,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct InspectArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

/// Metric options shared by `analyze` and `compare`.
#[derive(Args)]
pub struct MetricArgs {
    /// JSON options file (thrustThreshold, riseTimeStart, riseTimeEnd,
    /// minBurnDuration, timeColumn, thrustColumn).
    #[arg(long = "options", value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Minimum thrust considered active burn, in the units of the input.
    #[arg(long = "threshold", value_name = "VALUE")]
    pub threshold: Option<f64>,

    /// Fraction of peak where the rise starts.
    #[arg(long = "rise-start", value_name = "FRACTION")]
    pub rise_start: Option<f64>,

    /// Fraction of peak where the rise ends.
    #[arg(long = "rise-end", value_name = "FRACTION")]
    pub rise_end: Option<f64>,

    /// Burns shorter than this are flagged with a warning.
    #[arg(long = "min-burn", value_name = "SECONDS")]
    pub min_burn: Option<f64>,

    /// Use this column as the time axis.
    #[arg(long = "time-column", value_name = "NAME")]
    pub time_column: Option<String>,

    /// Use this column as thrust.
    #[arg(long = "thrust-column", value_name = "NAME")]
    pub thrust_column: Option<String>,
}

impl MetricArgs {
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            thrust_threshold: self.threshold,
            rise_time_start: self.rise_start,
            rise_time_end: self.rise_end,
            min_burn_duration: self.min_burn,
            time_column: self.time_column.clone(),
            thrust_column: self.thrust_column.clone(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum AlignArg {
    /// t = 0 at burn start.
    Start,
    /// t = 0 at peak thrust.
    Peak,
    /// Raw timestamps.
    None,
}

impl From<AlignArg> for AlignmentMode {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Start => AlignmentMode::BurnStart,
            AlignArg::Peak => AlignmentMode::Peak,
            AlignArg::None => AlignmentMode::None,
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_collects_overrides() {
        let cli = Cli::try_parse_from([
            "thrust",
            "analyze",
            "a.csv",
            "b.json",
            "--threshold",
            "2.5",
            "--thrust-column",
            "load",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.format, OutputFormatArg::Json);
        let overrides = args.metrics.overrides();
        assert_eq!(overrides.thrust_threshold, Some(2.5));
        assert_eq!(overrides.thrust_column.as_deref(), Some("load"));
        assert_eq!(overrides.rise_time_start, None);
    }

    #[test]
    fn compare_needs_two_files() {
        assert!(Cli::try_parse_from(["thrust", "compare", "a.csv"]).is_err());
        let cli = Cli::try_parse_from(["thrust", "compare", "a.csv", "b.csv", "--align", "peak"])
            .unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(AlignmentMode::from(args.align), AlignmentMode::Peak);
    }

    #[test]
    fn compare_aligns_on_burn_start_by_default() {
        let cli = Cli::try_parse_from(["thrust", "compare", "a.csv", "b.csv"]).unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.align, AlignArg::Start);
    }
}
