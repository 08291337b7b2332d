//! Minimum heat loss paths for crucibles that can only travel straight for a bounded run.
//!
//! A crucible moves one block at a time, never reverses, must keep straight for at least
//! `min_run` blocks after entering a direction and may keep straight for at most `max_run`
//! blocks. Entering a block costs its heat loss; the starting block is free.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::grid::{Cell, Direction, Grid, GridError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid grid for a path search")]
    InvalidGrid(#[from] GridError),

    #[error("straight run bounds {min_run}..={max_run} are invalid")]
    InvalidRunBounds { min_run: u8, max_run: u8 },

    #[error("no path from {start} to {goal} with straight runs of {min_run} to {max_run} blocks")]
    PathNotFound {
        start: Cell,
        goal: Cell,
        min_run: u8,
        max_run: u8,
    },
}

/// The unique key of a state of traversing the grid for heat loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct StateKey {
    cell: Cell,
    /// The direction of the last move, `None` at the start.
    direction: Option<Direction>,
    /// How many moves in a straight line led to the cell.
    run: u8,
}

impl StateKey {
    /// Whether this state ends a path at `goal`; the final run must reach `min_run` unless no
    /// move was made.
    fn reaches(self, goal: Cell, min_run: u8) -> bool {
        self.cell == goal && (self.direction.is_none() || self.run >= min_run)
    }

    /// The states reachable with one more move, possibly outside the grid.
    fn successors(self, min_run: u8, max_run: u8) -> impl Iterator<Item = Self> {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let run = match self.direction {
                None => 1,
                Some(last) if last == direction => {
                    if self.run >= max_run {
                        return None;
                    }
                    self.run + 1
                }
                Some(last) if last.opposite() == direction => return None,
                Some(_) => {
                    if self.run < min_run {
                        return None;
                    }
                    1
                }
            };
            Some(Self {
                cell: self.cell.step(direction),
                direction: Some(direction),
                run,
            })
        })
    }
}

/// A pending state in the search frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    heat_loss: u32,
    key: StateKey,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // flip heat loss comparison for min-heap on it
        other
            .heat_loss
            .cmp(&self.heat_loss)
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A minimal heat loss path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatLossPath {
    pub heat_loss: u32,
    /// Every visited cell, from the start to the goal inclusive.
    pub cells: Vec<Cell>,
}

impl HeatLossPath {
    /// The direction of each move along the path.
    pub fn moves(&self) -> impl Iterator<Item = Direction> + '_ {
        self.cells.windows(2).filter_map(|pair| {
            let offset = pair[1] - pair[0];
            Direction::ALL
                .into_iter()
                .find(|direction| direction.offset() == offset)
        })
    }
}

/// Find a path of minimal heat loss from `start` to `goal`.
///
/// It's Dijkstra's search over states of cell, last direction and straight run length. The
/// first goal state popped from the frontier is minimal.
///
/// # Errors
///
/// - [`PathError::InvalidGrid`] if `start` or `goal` is outside the grid.
/// - [`PathError::InvalidRunBounds`] if `max_run` is zero or below `min_run`.
/// - [`PathError::PathNotFound`] if no path satisfies the run bounds.
#[tracing::instrument(level = "debug", skip(grid), fields(rows = grid.rows(), cols = grid.cols()))]
pub fn find_path(
    grid: &Grid<u8>,
    start: Cell,
    goal: Cell,
    min_run: u8,
    max_run: u8,
) -> Result<HeatLossPath, PathError> {
    grid.ensure_contains(start)?;
    grid.ensure_contains(goal)?;
    if max_run == 0 || min_run > max_run {
        return Err(PathError::InvalidRunBounds { min_run, max_run });
    }

    let mut best_heat_loss = HashMap::new();
    let mut parents = HashMap::new();
    let mut processed = HashSet::new();
    let mut heap = BinaryHeap::new();

    let start_key = StateKey {
        cell: start,
        direction: None,
        run: 0,
    };
    best_heat_loss.insert(start_key, 0);
    heap.push(State {
        heat_loss: 0,
        key: start_key,
    });

    while let Some(State { heat_loss, key }) = heap.pop() {
        // stale entries of an already settled state
        if !processed.insert(key) {
            continue;
        }

        if key.reaches(goal, min_run) {
            tracing::debug!(heat_loss, processed = processed.len(), "goal reached");
            return Ok(HeatLossPath {
                heat_loss,
                cells: trace_back(&parents, key),
            });
        }

        for next_key in key.successors(min_run, max_run) {
            let Some(&block_heat_loss) = grid.get(next_key.cell) else {
                continue;
            };
            if processed.contains(&next_key) {
                continue;
            }

            let next_heat_loss = heat_loss
                .checked_add(u32::from(block_heat_loss))
                .expect("adding heat loss should not overflow");
            if best_heat_loss
                .get(&next_key)
                .is_none_or(|&existing| next_heat_loss < existing)
            {
                best_heat_loss.insert(next_key, next_heat_loss);
                parents.insert(next_key, key);
                heap.push(State {
                    heat_loss: next_heat_loss,
                    key: next_key,
                });
            }
        }
    }

    tracing::debug!(processed = processed.len(), "frontier exhausted");
    Err(PathError::PathNotFound {
        start,
        goal,
        min_run,
        max_run,
    })
}

/// Minimal heat loss from `start` to `goal`, see [`find_path`].
///
/// # Errors
///
/// Fails as [`find_path`] does.
pub fn solve_path(
    grid: &Grid<u8>,
    start: Cell,
    goal: Cell,
    min_run: u8,
    max_run: u8,
) -> Result<u32, PathError> {
    find_path(grid, start, goal, min_run, max_run).map(|path| path.heat_loss)
}

/// Follow parent links from `end` back to the start state, returning cells start first.
fn trace_back(parents: &HashMap<StateKey, StateKey>, end: StateKey) -> Vec<Cell> {
    let mut cells = vec![end.cell];
    let mut key = end;
    while let Some(&parent) = parents.get(&key) {
        cells.push(parent.cell);
        key = parent;
    }
    cells.reverse();
    cells
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    const EXAMPLE_ROWS: [&str; 13] = [
        "2413432311323",
        "3215453535623",
        "3255245654254",
        "3446585845452",
        "4546657867536",
        "1438598798454",
        "4457876987766",
        "3637877979653",
        "4654967986887",
        "4564679986453",
        "1224686865563",
        "2546548887735",
        "4322674655533",
    ];

    fn grid_of(rows: &[&str]) -> Grid<u8> {
        let rows = rows
            .iter()
            .map(|row| {
                row.bytes()
                    .map(|byte| byte - b'0')
                    .collect::<Vec<_>>()
            })
            .collect();
        Grid::from_rows(rows).expect("test grid is rectangular")
    }

    fn solve_corners(grid: &Grid<u8>, min_run: u8, max_run: u8) -> Result<u32, PathError> {
        solve_path(grid, grid.top_left(), grid.bottom_right(), min_run, max_run)
    }

    /// Lengths of the straight runs along a path.
    fn run_lengths(path: &HeatLossPath) -> Vec<usize> {
        let mut runs: Vec<(Direction, usize)> = Vec::new();
        for direction in path.moves() {
            match runs.last_mut() {
                Some((last, len)) if *last == direction => *len += 1,
                _ => runs.push((direction, 1)),
            }
        }
        runs.into_iter().map(|(_, len)| len).collect()
    }

    #[rstest]
    #[case::unrestricted_turns(0, 3, 102)]
    #[case::ultra_crucible(4, 10, 94)]
    fn solves_example(
        #[case] min_run: u8,
        #[case] max_run: u8,
        #[case] expected: u32,
    ) -> Result<(), PathError> {
        let grid = grid_of(&EXAMPLE_ROWS);
        assert_eq!(solve_corners(&grid, min_run, max_run)?, expected);
        Ok(())
    }

    #[test]
    fn ultra_crucible_runs_to_the_goal() -> Result<(), PathError> {
        let grid = grid_of(&[
            "111111111111",
            "999999999991",
            "999999999991",
            "999999999991",
            "999999999991",
        ]);
        assert_eq!(solve_corners(&grid, 4, 10)?, 71);
        Ok(())
    }

    #[test]
    fn found_path_respects_run_bounds() -> Result<(), PathError> {
        let grid = grid_of(&EXAMPLE_ROWS);
        let path = find_path(&grid, grid.top_left(), grid.bottom_right(), 4, 10)?;

        assert_eq!(path.cells.first(), Some(&grid.top_left()));
        assert_eq!(path.cells.last(), Some(&grid.bottom_right()));
        let entered: u32 = path.cells[1..].iter().map(|&cell| u32::from(grid[cell])).sum();
        assert_eq!(entered, path.heat_loss);

        let moves: Vec<_> = path.moves().collect();
        assert_eq!(moves.len() + 1, path.cells.len());
        assert!(moves.windows(2).all(|pair| pair[1] != pair[0].opposite()));
        assert!(run_lengths(&path).iter().all(|len| (4..=10).contains(len)));
        Ok(())
    }

    #[rstest]
    #[case::too_small_for_min_run(&["123", "456", "789"], 4, 10)]
    #[case::single_row(&["1111"], 4, 10)]
    fn reports_path_not_found(
        #[case] rows: &[&str],
        #[case] min_run: u8,
        #[case] max_run: u8,
    ) {
        let grid = grid_of(rows);
        assert!(matches!(
            solve_corners(&grid, min_run, max_run),
            Err(PathError::PathNotFound { .. })
        ));
    }

    #[test]
    fn single_straight_run_reaches_goal() -> Result<(), PathError> {
        let grid = grid_of(&["12345"]);
        assert_eq!(solve_corners(&grid, 4, 10)?, 14);
        Ok(())
    }

    #[test]
    fn start_at_goal_costs_nothing() -> Result<(), PathError> {
        let grid = grid_of(&["99", "99"]);
        assert_eq!(solve_path(&grid, Cell::new(1, 1), Cell::new(1, 1), 4, 10)?, 0);
        Ok(())
    }

    #[test]
    fn rejects_cells_outside_grid() {
        let grid = grid_of(&["12", "34"]);
        assert_eq!(
            solve_path(&grid, Cell::ORIGIN, Cell::new(2, 1), 0, 3),
            Err(PathError::InvalidGrid(GridError::OutOfBounds {
                cell: Cell::new(2, 1),
                rows: 2,
                cols: 2
            }))
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(5, 4)]
    fn rejects_invalid_run_bounds(#[case] min_run: u8, #[case] max_run: u8) {
        let grid = grid_of(&["12", "34"]);
        assert_eq!(
            solve_corners(&grid, min_run, max_run),
            Err(PathError::InvalidRunBounds { min_run, max_run })
        );
    }

    /// Plain Dijkstra over cells, without run lengths or reversal rules.
    fn plain_dijkstra(grid: &Grid<u8>, start: Cell, goal: Cell) -> Option<u32> {
        let mut best = HashMap::from([(start, 0)]);
        let mut heap = BinaryHeap::from([Reverse((0, start))]);
        while let Some(Reverse((heat_loss, cell))) = heap.pop() {
            if cell == goal {
                return Some(heat_loss);
            }
            if best.get(&cell).is_some_and(|&known| heat_loss > known) {
                continue;
            }
            for direction in Direction::ALL {
                let next = cell.step(direction);
                if let Some(&cost) = grid.get(next) {
                    let next_heat_loss = heat_loss + u32::from(cost);
                    if best.get(&next).is_none_or(|&known| next_heat_loss < known) {
                        best.insert(next, next_heat_loss);
                        heap.push(Reverse((next_heat_loss, next)));
                    }
                }
            }
        }
        None
    }

    fn cost_grid(max_cost: u8) -> impl Strategy<Value = Grid<u8>> {
        (1usize..=6, 1usize..=6)
            .prop_flat_map(move |(rows, cols)| {
                prop::collection::vec(prop::collection::vec(1..=max_cost, cols), rows)
            })
            .prop_map(|rows| Grid::from_rows(rows).expect("generated grid is rectangular"))
    }

    fn cell_in(grid: &Grid<u8>, row: usize, col: usize) -> Cell {
        Cell::new((row % grid.rows()) as i32, (col % grid.cols()) as i32)
    }

    proptest! {
        #[test]
        fn unrestricted_runs_match_plain_dijkstra(
            grid in cost_grid(9),
            start in (0usize..6, 0usize..6),
            goal in (0usize..6, 0usize..6),
        ) {
            let start = cell_in(&grid, start.0, start.1);
            let goal = cell_in(&grid, goal.0, goal.1);
            let expected = plain_dijkstra(&grid, start, goal);
            prop_assert_eq!(solve_path(&grid, start, goal, 0, u8::MAX).ok(), expected);
        }

        #[test]
        fn unit_costs_give_manhattan_distance(
            grid in cost_grid(1),
            start in (0usize..6, 0usize..6),
            goal in (0usize..6, 0usize..6),
        ) {
            let start = cell_in(&grid, start.0, start.1);
            let goal = cell_in(&grid, goal.0, goal.1);
            prop_assert_eq!(
                solve_path(&grid, start, goal, 0, u8::MAX),
                Ok(start.manhattan_distance(goal))
            );
        }

        #[test]
        fn raising_min_run_never_lowers_heat_loss(grid in cost_grid(9), max_run in 3u8..=6) {
            let costs: Vec<u32> = (0..=3)
                .map(|min_run| solve_corners(&grid, min_run, max_run).unwrap_or(u32::MAX))
                .collect();
            prop_assert!(costs.windows(2).all(|pair| pair[0] <= pair[1]), "costs {:?}", costs);
        }
    }
}
