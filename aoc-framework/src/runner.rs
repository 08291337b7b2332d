//! Running solutions and reporting their progress.
//!
//! Days are usually wired with the [`#[solution_runner]`][solution_runner] attribute:
//!
//! ```
//! # use aoc_framework::runner::solution_runner;
//! # use aoc_framework::{DynamicResult, PartOne, Solution};
//! #
//! struct LineCount;
//!
//! impl Solution<PartOne> for LineCount {
//!     type Input = str;
//!     type Output = usize;
//!
//!     fn solve(input: &str) -> DynamicResult<usize> {
//!         Ok(input.lines().count())
//!     }
//! }
//!
//! #[solution_runner(name = "Line count", part_one = LineCount)]
//! struct LineCountRunner;
//! ```

use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

pub use aoc_framework_macros::solution_runner;

/// Receives the events of running a solution.
pub trait OutputHandler {
    /// The solution is starting; called once with its display name.
    fn solution_name(&mut self, name: &str);

    /// Parsing of the input starts.
    fn parse_start(&mut self);

    /// Parsing finished, optionally with the time it took.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// A part starts solving.
    fn part_start(&mut self, part: PartKind);

    /// A part produced its answer, optionally with the time it took.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);
}

/// Evaluate `step`, measuring it when `timed` is set.
fn measure<T>(timed: bool, step: impl FnOnce() -> T) -> (T, Option<Duration>) {
    if timed {
        let start = Instant::now();
        let result = step();
        (result, Some(start.elapsed()))
    } else {
        (step(), None)
    }
}

fn run_part<S, P>(input: &S::Input, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    let _span = tracing::debug_span!("part", %part).entered();
    handler.part_start(part);
    let (result, duration_opt) = measure(timed, || S::solve(input));
    let output = result.inspect_err(|error| tracing::debug!(%error, "part failed"))?;
    tracing::debug!(%output, ?duration_opt, "part solved");
    handler.part_output(part, &output, duration_opt);
    Ok(())
}

fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = measure(timed, || D::parse(input));
    let parsed = result?;
    tracing::debug!(?duration_opt, "input parsed");
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Run part one of a solution taking the raw input string.
///
/// # Errors
///
/// Errors of the solution are propagated.
pub fn solve_half_solution<S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
{
    handler.solution_name(name);
    run_part::<S1, PartOne>(input, handler, timed)
}

/// Run both parts of a solution taking the raw input string.
///
/// # Errors
///
/// Errors of either part are propagated; part two does not run if part one fails.
pub fn solve_full_solution<S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
    S2: Solution<PartTwo, Input = str>,
{
    handler.solution_name(name);
    run_part::<S1, PartOne>(input, handler, timed)?;
    run_part::<S2, PartTwo>(input, handler, timed)
}

/// Parse the input into `D`, then run part one on it.
///
/// # Errors
///
/// Parsing and solution errors are propagated.
pub fn solve_parsed_half_solution<D, S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
{
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, handler, timed)
}

/// Parse the input into `D` once, then run both parts on it.
///
/// # Errors
///
/// Parsing and solution errors are propagated.
pub fn solve_parsed_full_solution<D, S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, handler, timed)?;
    run_part::<S2, PartTwo>(&parsed, handler, timed)
}

/// A runnable day, usually implemented through [`solution_runner`].
pub trait SolutionRunner {
    /// Run the day on `input`, reporting to `handler` and timing steps when `timed` is set.
    ///
    /// # Errors
    ///
    /// Parsing and solution errors are propagated.
    fn run(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>;
}
