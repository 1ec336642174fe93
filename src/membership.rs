//! Decides which cells lie on at least one optimal route, given the labels of a forward search
//! from the start and of a search on the reversed problem from the goal.
use grid_util::point::Point;

use crate::maze::Maze;
use crate::search::CostLabels;
use crate::state::{Facing, OrientedState};
use crate::{Cost, FxIndexSet};

/// How forward and reverse labels are combined into the set of cells on optimal routes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MembershipRule {
    /// Compares labels per oriented state. Needs reverse labels from the direction-reversed search
    /// (seeded at the goal in every facing), where the label of `(c, f)` is the cost of the cheapest
    /// route from `(c, f.opposite())` to the goal. Exact.
    #[default]
    Oriented,
    /// Collapses both label sets to per-cell minima first and accepts a cell whose sum is the
    /// optimal cost or the optimal cost plus one turn. Needs reverse labels from a forward search on
    /// the maze with start and goal swapped. The per-cell minimum forgets the facing a cell is
    /// crossed with, so cells whose reverse labels were pruned away are missed.
    Collapsed,
}

/// A state lies on an optimal route iff reaching it plus finishing from it costs exactly `best`.
pub fn oriented_tiles(
    maze: &Maze,
    forward: &CostLabels,
    reverse: &CostLabels,
    best: Cost,
) -> FxIndexSet<Point> {
    maze.open_cells()
        .filter(|cell| {
            Facing::ALL.iter().any(|facing| {
                let state = OrientedState::new(*cell, *facing);
                match (forward.get(&state), reverse.get(&state.reversed())) {
                    (Some(to), Some(from)) => to + from == best,
                    _ => false,
                }
            })
        })
        .collect()
}

/// Per-cell comparison with a one-turn allowance for the facing lost in the collapse.
pub fn collapsed_tiles(
    maze: &Maze,
    forward: &CostLabels,
    reverse: &CostLabels,
    best: Cost,
    turn_cost: Cost,
) -> FxIndexSet<Point> {
    let to_cells = forward.cell_costs();
    let from_cells = reverse.cell_costs();
    maze.open_cells()
        .filter(|cell| {
            let ix = maze.cell_index(*cell);
            match (to_cells[ix], from_cells[ix]) {
                (Some(to), Some(from)) => {
                    let sum = to + from;
                    sum == best || sum == best + turn_cost
                }
                _ => false,
            }
        })
        .collect()
}

pub fn path_tiles(
    rule: MembershipRule,
    maze: &Maze,
    forward: &CostLabels,
    reverse: &CostLabels,
    best: Cost,
    turn_cost: Cost,
) -> FxIndexSet<Point> {
    match rule {
        MembershipRule::Oriented => oriented_tiles(maze, forward, reverse, best),
        MembershipRule::Collapsed => collapsed_tiles(maze, forward, reverse, best, turn_cost),
    }
}
