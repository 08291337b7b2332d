use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

use crate::grid::Direction;
use crate::platform::{Platform, solve_cycled_load};

#[solution_runner(
    name = "Day 14: Parabolic Reflector Dish",
    parsed = Platform,
    part_one = Day14,
    part_two = Day14
)]
impl super::AdventOfCode2023<14> {}

/*
Input is a character grid of rock placements on a platform: `O` for round rocks, `#` for cubed
rocks, and `.` for empty space.
*/

impl ParseData for Platform {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        Ok(input.parse()?)
    }
}

/*
For part 1, tilt the platform to roll round rocks north, then calculate the total load on the north
support beams.
*/

struct Day14;

impl Solution<PartOne> for Day14 {
    type Input = Platform;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut platform = input.clone();
        platform.tilt(Direction::North);
        Ok(platform.north_load())
    }
}

/*
The platform can "spin cycle", tilting four times: north, west, south, and finally east.

For part 2, spin the platform 1,000,000,000 times and recalculate the total north load.
*/

const SPIN_CYCLES: u64 = 1_000_000_000;

impl Solution<PartTwo> for Day14 {
    type Input = Platform;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut platform = input.clone();
        Ok(solve_cycled_load(&mut platform, SPIN_CYCLES)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Platform::parse(EXAMPLE_INPUT)?;
        let result = <Day14 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 136);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Platform::parse(EXAMPLE_INPUT)?;
        let result = <Day14 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 64);
        Ok(())
    }

    #[test]
    fn parse_reports_invalid_character() {
        let error = Platform::parse("O.\n.@\n").err().map(|error| error.to_string());
        assert_eq!(error.as_deref(), Some("failure parsing line 2"));
    }
}
