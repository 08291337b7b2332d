//! Solutions implemented for Advent of Code 2023.
//!
//! A day becomes runnable by implementing [`SolutionRunner`] for [`AdventOfCode2023<DAY>`] in
//! its submodule, usually with [`#[solution_runner]`][aoc_framework::runner::solution_runner],
//! and adding a match case to [`run_day`].

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

mod day14;
mod day17;

/// Solutions collected by day.
pub struct AdventOfCode2023<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(pub u8);

/// Run a solution based on the day.
///
/// # Errors
///
/// Returns [`DayNotAvailable`] for a day without a solution. Errors from parsing or solving are
/// propagated.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    match day {
        14 => AdventOfCode2023::<14>::run(input, handler, timed),
        17 => AdventOfCode2023::<17>::run(input, handler, timed),
        _ => Err(DayNotAvailable(day).into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;
    use std::time::Duration;

    use aoc_framework::PartKind;

    use super::*;

    /// Collects part outputs.
    #[derive(Default)]
    struct Outputs(Vec<(PartKind, String)>);

    impl OutputHandler for Outputs {
        fn solution_name(&mut self, _name: &str) {}

        fn parse_start(&mut self) {}

        fn parse_end(&mut self, _duration_opt: Option<Duration>) {}

        fn part_start(&mut self, _part: PartKind) {}

        fn part_output(&mut self, part: PartKind, output: &dyn Display, _duration_opt: Option<Duration>) {
            self.0.push((part, output.to_string()));
        }
    }

    #[test]
    fn runs_day_17() -> DynamicResult<()> {
        let mut outputs = Outputs::default();
        run_day(17, "11111\n99991\n99991\n99991\n99991\n", &mut outputs, false)?;
        assert_eq!(
            outputs.0,
            vec![(PartKind::One, "16".to_string()), (PartKind::Two, "8".to_string())]
        );
        Ok(())
    }

    #[test]
    fn unknown_day_is_not_available() {
        let mut outputs = Outputs::default();
        let error = run_day(1, "", &mut outputs, false).err().map(|error| error.to_string());
        assert_eq!(error.as_deref(), Some("no solution available for day 1"));
        assert!(outputs.0.is_empty());
    }
}
