#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::equatable_if_let,
    clippy::option_if_let_else,
    clippy::use_self
)]
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Error, Result};
use aoc2023::solutions;
use aoc_framework::PartKind;
use aoc_framework::runner::OutputHandler;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

/// Advent of Code 2023 puzzle solver.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's solution to run (14 or 17).
    day: u8,

    /// Sets an alternative input file to use over default input.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Measure and print the durations of parsing and solving parts.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,

    /// Log solver progress at debug level, unless `RUST_LOG` says otherwise.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Install a stderr logger filtered by `RUST_LOG`, falling back to `warn` or `debug`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// The default input file path for a day.
fn default_input_path(day: u8) -> PathBuf {
    PathBuf::from("inputs").join(format!("day{day:02}.txt"))
}

/// Read the input file for a day, the default one unless `input_file` is given.
fn read_input(day: u8, input_file: Option<&Path>) -> Result<String> {
    match input_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read input file at: {}", path.display())),
        None => {
            let path = default_input_path(day);
            fs::read_to_string(&path).with_context(|| {
                format!(
                    "default input file missing: {}\n\n\
                    please create the file or provide the input file argument",
                    path.display()
                )
            })
        }
    }
}

struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl CliOutputHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {
        // do nothing
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("Input parsed in {formatted_duration}");
        }
    }

    fn part_start(&mut self, part: PartKind) {
        println!("-- {part} --");
    }

    fn part_output(
        &mut self,
        _part: PartKind,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("{output} ({formatted_duration})");
        } else {
            println!("{output}");
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let input_str = read_input(args.day, args.input.as_deref())?;
    tracing::debug!(day = args.day, bytes = input_str.len(), "input read");

    let mut handler = CliOutputHandler::new(Duration::from_millis(args.min_timing_ms));
    solutions::run_day(args.day, &input_str, &mut handler, args.timed).map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context("failed to run solution")
    })
}
