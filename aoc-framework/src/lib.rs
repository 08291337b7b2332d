//! Traits and runners shared by the Advent of Code 2023 solutions.
//!
//! A day is made of a parsed input type implementing [`ParseData`] and one or two types
//! implementing [`Solution`] for the [`PartOne`] / [`PartTwo`] markers. The [`runner`] module
//! drives them and reports events to an [`OutputHandler`][runner::OutputHandler].
//!
//! ```
//! use aoc_framework::{DynamicResult, ParseData, PartOne, Solution};
//!
//! /// Digits of a single-row cost grid.
//! struct Costs(Vec<u32>);
//!
//! impl ParseData for Costs {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let digits = input
//!             .trim()
//!             .chars()
//!             .map(|ch| ch.to_digit(10).ok_or("not a digit"))
//!             .collect::<Result<Vec<_>, _>>()?;
//!         Ok(Self(digits))
//!     }
//! }
//!
//! struct WalkEast;
//!
//! impl Solution<PartOne> for WalkEast {
//!     type Input = Costs;
//!     type Output = u32;
//!
//!     fn solve(input: &Costs) -> DynamicResult<u32> {
//!         // the starting cell is never entered
//!         Ok(input.0.iter().skip(1).sum())
//!     }
//! }
//!
//! let costs = Costs::parse("2413").unwrap();
//! assert_eq!(WalkEast::solve(&costs).unwrap(), 8);
//! ```

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::option_if_let_else,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod parsing;
pub mod runner;

mod private {
    /// Sealing trait so that only this crate can define solution parts.
    pub trait Sealed {}
}

/// A boxed, dynamically dispatched error.
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that fails with a [`DynamicError`].
pub type DynamicResult<T> = Result<T, DynamicError>;

/// Identifies a solution part at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}

/// Marker for a solution part, used as the generic parameter of [`Solution<P>`].
pub trait Part: private::Sealed {
    /// The [`PartKind`] of this marker.
    fn kind() -> PartKind;
}

/// Marks a [`Solution`] for part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Marks a [`Solution`] for part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solution to one [`Part`] of a day's puzzle.
pub trait Solution<P: Part> {
    /// The data passed by reference to [`Solution::solve`]; `str` for raw input.
    type Input: ?Sized;

    /// The answer type, printed by the runner.
    type Output: Display;

    /// Solve the part for the given input.
    ///
    /// # Errors
    ///
    /// Any failure while solving (invalid input, an unsolvable configuration) is returned as a
    /// [`DynamicError`].
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// Data built by parsing a day's input string.
pub trait ParseData {
    /// Parse the input string.
    ///
    /// # Errors
    ///
    /// Parsing failures are returned as a [`DynamicError`].
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}
