use aoc_framework::parsing::parse_char_rows;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::grid::Grid;
use crate::heat_loss::solve_path;

#[solution_runner(
    name = "Day 17: Clumsy Crucible",
    parsed = City,
    part_one = Day17,
    part_two = Day17
)]
impl super::AdventOfCode2023<17> {}

/*
Input is a character grid for heat loss moving through city blocks, represented with digits.
*/

#[derive(Debug)]
struct City(Grid<u8>);

#[derive(thiserror::Error, Debug)]
enum ParseCityError {
    #[error("invalid digit character: {0:?}")]
    InvalidDigit(char),
}

fn parse_block(ch: char) -> Result<u8, ParseCityError> {
    ch.to_digit(10)
        .and_then(|digit| u8::try_from(digit).ok())
        .ok_or(ParseCityError::InvalidDigit(ch))
}

impl ParseData for City {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let rows = parse_char_rows(input, parse_block)?;
        Ok(Self(Grid::from_rows(rows)?))
    }
}

impl City {
    /// Minimal heat loss from the top left block to the bottom right one.
    fn min_heat_loss(&self, min_run: u8, max_run: u8) -> DynamicResult<u32> {
        let heat_loss = solve_path(
            &self.0,
            self.0.top_left(),
            self.0.bottom_right(),
            min_run,
            max_run,
        )?;
        Ok(heat_loss)
    }
}

/*
For part 1, a crucible moves at most 3 blocks in a straight line before turning 90 degrees, and
never reverses. Heat loss is incurred when entering a block.
*/

struct Day17;

impl Solution<PartOne> for Day17 {
    type Input = City;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        input.min_heat_loss(0, 3)
    }
}

/*
For part 2, an ultra crucible moves at least 4 and at most 10 blocks in a straight line before
turning or stopping at the end.
*/

impl Solution<PartTwo> for Day17 {
    type Input = City;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        input.min_heat_loss(4, 10)
    }
}
