//! A platform of round rocks that roll when it's tilted, and cube rocks that don't.
//!
//! Spinning the platform a huge number of times is answered by detecting when the rock
//! configuration starts repeating and projecting the target cycle into the repeating window.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use aoc_framework::parsing::{InvalidLine, parse_char_rows};
use checked_sum::CheckedSum;

use crate::grid::{Cell, Direction, Grid, GridError};

/// Most spin cycles simulated while looking for a repeated configuration.
pub const CYCLE_DETECTION_BOUND: usize = 1000;

/// Tilt order of one spin cycle.
pub const SPIN_CYCLE: [Direction; 4] = [
    Direction::North,
    Direction::West,
    Direction::South,
    Direction::East,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    RoundRock,
    CubeRock,
}

impl TryFrom<char> for Tile {
    type Error = ParsePlatformError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            '.' => Ok(Self::Empty),
            'O' => Ok(Self::RoundRock),
            '#' => Ok(Self::CubeRock),
            _ => Err(ParsePlatformError::InvalidChar(ch)),
        }
    }
}

impl From<Tile> for char {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Empty => '.',
            Tile::RoundRock => 'O',
            Tile::CubeRock => '#',
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ParsePlatformError {
    #[error("invalid character in grid: {0:?}")]
    InvalidChar(char),

    #[error(transparent)]
    InvalidLine(#[from] InvalidLine),

    #[error("invalid platform grid")]
    InvalidGrid(#[from] GridError),
}

/// No configuration repeated within the detection bound.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("no repeated platform configuration within {bound} spin cycles")]
pub struct NoCycleDetected {
    pub bound: usize,
}

/// The canonical form of a configuration: round rock cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(Vec<Cell>);

impl Fingerprint {
    #[must_use]
    pub fn round_rocks(&self) -> &[Cell] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    grid: Grid<Tile>,
}

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rows = parse_char_rows(input, Tile::try_from)?;
        Ok(Self::new(Grid::from_rows(rows)?))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (cell, &tile) in self.grid.entries() {
            write!(f, "{}", char::from(tile))?;
            if cell.col + 1 == self.size().col {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Platform {
    #[must_use]
    pub fn new(grid: Grid<Tile>) -> Self {
        Self { grid }
    }

    /// Rows and columns as a cell just past the bottom right corner.
    fn size(&self) -> Cell {
        self.grid.bottom_right() + Cell::new(1, 1)
    }

    /// Cells holding round rocks, in row-major order.
    pub fn round_rocks(&self) -> impl Iterator<Item = Cell> + '_ {
        self.grid
            .entries()
            .filter(|&(_, &tile)| tile == Tile::RoundRock)
            .map(|(cell, _)| cell)
    }

    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(self.round_rocks().collect())
    }

    /// The load on the north edge: each round rock weighs its distance in rows from the south
    /// edge, its own row included.
    #[must_use]
    pub fn north_load(&self) -> u64 {
        let rows = self.size().row;
        self.round_rocks()
            .map(|cell| u64::from((rows - cell.row).unsigned_abs()))
            .checked_sum()
            .expect("north load is bounded by the platform area times its rows")
    }

    /// Tilt the platform so every round rock rolls toward `direction` until blocked by the edge,
    /// a cube rock or another settled round rock.
    ///
    /// Each line along `direction` is compacted in a single pass from its leading edge, keeping a
    /// cursor on the next free slot.
    pub fn tilt(&mut self, direction: Direction) {
        let size = self.size();
        let bottom_right = self.grid.bottom_right();
        let leading_corner = match direction {
            Direction::North | Direction::West => Cell::ORIGIN,
            Direction::South => Cell::new(bottom_right.row, 0),
            Direction::East => Cell::new(0, bottom_right.col),
        };
        let (across, line_count, line_len) = if direction.is_vertical() {
            (Direction::East, size.col, size.row)
        } else {
            (Direction::South, size.row, size.col)
        };
        let scan = direction.opposite();

        for line in 0..line_count {
            let line_start = leading_corner.step_by(across, line);
            let mut free = line_start;
            for offset in 0..line_len {
                let cell = line_start.step_by(scan, offset);
                let tile = self.grid[cell];
                match tile {
                    Tile::RoundRock => {
                        if cell != free {
                            self.grid[free] = Tile::RoundRock;
                            self.grid[cell] = Tile::Empty;
                        }
                        free = free.step(scan);
                    }
                    Tile::CubeRock => free = cell.step(scan),
                    Tile::Empty => {}
                }
            }
        }
    }

    /// Tilt north, west, south, then east.
    pub fn spin_cycle(&mut self) {
        for direction in SPIN_CYCLE {
            self.tilt(direction);
        }
    }

    /// Spin the platform until a configuration repeats, recording every configuration and load.
    ///
    /// Index `0` of the history is the configuration before spinning. At most `bound` spin
    /// cycles are run; the platform is left in the last configuration reached.
    ///
    /// # Errors
    ///
    /// Returns [`NoCycleDetected`] if no configuration repeats within `bound` spin cycles.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn detect_cycle(&mut self, bound: usize) -> Result<CycleHistory, NoCycleDetected> {
        let mut first_seen = HashMap::new();
        let mut configurations = Vec::new();
        let mut loads = Vec::new();

        for index in 0..=bound {
            if index > 0 {
                self.spin_cycle();
            }
            let fingerprint = self.fingerprint();
            let load = self.north_load();
            tracing::trace!(index, load, "spin cycle\n{self}");
            loads.push(load);

            // map lookup compares whole fingerprints, so equal hashes alone never match
            if let Some(&first_occurrence) = first_seen.get(&fingerprint) {
                configurations.push(fingerprint);
                let cycle_length = index - first_occurrence;
                tracing::debug!(first_occurrence, cycle_length, "configuration repeats");
                return Ok(CycleHistory {
                    configurations,
                    loads,
                    first_occurrence,
                    cycle_length,
                });
            }
            first_seen.insert(fingerprint.clone(), index);
            configurations.push(fingerprint);
        }

        Err(NoCycleDetected { bound })
    }
}

/// Configurations and loads per spin cycle up to the first repeat.
#[derive(Debug, Clone)]
pub struct CycleHistory {
    configurations: Vec<Fingerprint>,
    loads: Vec<u64>,
    first_occurrence: usize,
    cycle_length: usize,
}

impl CycleHistory {
    /// The earliest spin cycle index of the repeating configuration.
    #[must_use]
    pub fn first_occurrence(&self) -> usize {
        self.first_occurrence
    }

    /// Spin cycles between repeats of a configuration.
    #[must_use]
    pub fn cycle_length(&self) -> usize {
        self.cycle_length
    }

    /// The recorded configuration after `index` spin cycles.
    #[must_use]
    pub fn configuration_at(&self, index: usize) -> Option<&Fingerprint> {
        self.configurations.get(index)
    }

    /// The recorded north load after `index` spin cycles.
    #[must_use]
    pub fn load_at(&self, index: usize) -> Option<u64> {
        self.loads.get(index).copied()
    }

    /// The recorded index holding the same configuration as after `cycles` spin cycles.
    #[must_use]
    pub fn equivalent_index(&self, cycles: u64) -> usize {
        match usize::try_from(cycles) {
            Ok(index) if index < self.loads.len() => index,
            _ => {
                let first = self.first_occurrence as u64;
                let offset = (cycles - first) % self.cycle_length as u64;
                // offset is below the cycle length, which is a recorded index
                self.first_occurrence + offset as usize
            }
        }
    }

    /// The north load after `cycles` spin cycles.
    #[must_use]
    pub fn load_after(&self, cycles: u64) -> u64 {
        self.loads[self.equivalent_index(cycles)]
    }
}

/// The north load after spinning `platform` for `target_cycles`, within the default
/// [`CYCLE_DETECTION_BOUND`].
///
/// # Errors
///
/// Returns [`NoCycleDetected`] if the configuration doesn't repeat within the bound.
pub fn solve_cycled_load(platform: &mut Platform, target_cycles: u64) -> Result<u64, NoCycleDetected> {
    solve_cycled_load_within(platform, target_cycles, CYCLE_DETECTION_BOUND)
}

/// The north load after spinning `platform` for `target_cycles`, simulating at most `bound` spin
/// cycles. The platform is mutated through the simulation.
///
/// Targets up to `bound` are spun directly; only larger ones need a detected cycle.
///
/// # Errors
///
/// Returns [`NoCycleDetected`] if the target exceeds `bound` and the configuration doesn't repeat
/// within it.
#[tracing::instrument(level = "debug", skip(platform))]
pub fn solve_cycled_load_within(
    platform: &mut Platform,
    target_cycles: u64,
    bound: usize,
) -> Result<u64, NoCycleDetected> {
    if let Ok(target) = usize::try_from(target_cycles)
        && target <= bound
    {
        for _ in 0..target {
            platform.spin_cycle();
        }
        return Ok(platform.north_load());
    }

    let history = platform.detect_cycle(bound)?;
    let index = history.equivalent_index(target_cycles);
    tracing::debug!(index, "projected target cycle");
    Ok(history.loads[index])
}
