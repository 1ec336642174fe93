use grid_util::point::Point;
use log::{info, warn};

use crate::error::Error;
use crate::maze::Maze;
use crate::membership::{self, MembershipRule};
use crate::search::{label_costs, CostLabels};
use crate::state::{Facing, OrientedState, StateSpace};
use crate::{Cost, FxIndexSet, MOVE_COST, TURN_COST};

/// Solves mazes for an agent that starts at the start cell with a fixed facing and may end at the
/// goal cell in any facing.
#[derive(Clone, Debug)]
pub struct Solver {
    pub move_cost: Cost,
    pub turn_cost: Cost,
    pub start_facing: Facing,
    pub membership: MembershipRule,
}

impl Default for Solver {
    fn default() -> Solver {
        Solver::new()
    }
}

impl Solver {
    pub fn new() -> Solver {
        Solver {
            move_cost: MOVE_COST,
            turn_cost: TURN_COST,
            start_facing: Facing::East,
            membership: MembershipRule::Oriented,
        }
    }

    pub fn state_space<'a>(&self, maze: &'a Maze) -> StateSpace<'a> {
        StateSpace::with_costs(maze, self.move_cost, self.turn_cost)
    }

    /// Labels states from the start, stopping at any state on the goal cell.
    pub fn search_forward(&self, maze: &Maze, bound: Option<Cost>) -> CostLabels {
        let goal = maze.goal();
        label_costs(
            &self.state_space(maze),
            &[OrientedState::new(maze.start(), self.start_facing)],
            bound,
            |state| state.cell == goal,
        )
    }

    /// Labels states on the direction-reversed problem: the search starts at the goal in every
    /// facing and stops at the start state turned around. The label of `state.reversed()` is the
    /// cheapest cost from `state` to the goal.
    pub fn search_reverse(&self, maze: &Maze, bound: Option<Cost>) -> CostLabels {
        let origins = Facing::ALL.map(|facing| OrientedState::new(maze.goal(), facing));
        let target = OrientedState::new(maze.start(), self.start_facing).reversed();
        label_costs(&self.state_space(maze), &origins, bound, |state| {
            *state == target
        })
    }

    /// The minimum cost from start to goal, `None` if the goal cannot be reached.
    pub fn lowest_cost(&self, maze: &Maze) -> Option<Cost> {
        if !maze.reachable(maze.start(), maze.goal()) {
            info!("Goal is not on the same component as the start");
            return None;
        }
        self.search_forward(maze, None).best()
    }

    /// Computes the optimal cost, every cell on some optimal route and one such route.
    pub fn solve(&self, maze: &Maze) -> Result<Solution, Error> {
        let unreachable = Error::Unreachable {
            start: maze.start(),
            goal: maze.goal(),
        };
        if !maze.reachable(maze.start(), maze.goal()) {
            info!("Goal is not on the same component as the start");
            return Err(unreachable);
        }
        let forward = self.search_forward(maze, None);
        let Some(best) = forward.best() else {
            warn!("Reachable goal could not be pathed to, is the component map correct?");
            return Err(unreachable);
        };

        let (reverse, reverse_best) = match self.membership {
            MembershipRule::Oriented => {
                let reverse = self.search_reverse(maze, Some(best));
                let reverse_best = reverse.best();
                (reverse, reverse_best)
            }
            MembershipRule::Collapsed => {
                // A swapped problem that cannot finish within `best` leaves the start unlabeled.
                let reverse = self.search_forward(&maze.reversed(), Some(best));
                let reverse_best = reverse.best();
                (reverse, reverse_best)
            }
        };
        if reverse_best != Some(best) {
            warn!(
                "Forward cost {} and reversed cost {:?} disagree",
                best, reverse_best
            );
            return Err(Error::Inconsistent {
                forward: best,
                reverse: reverse_best,
            });
        }

        let tiles = membership::path_tiles(
            self.membership,
            maze,
            &forward,
            &reverse,
            best,
            self.turn_cost,
        );
        let route = forward
            .best_state()
            .and_then(|end| forward.trace(&end))
            .unwrap_or_default();
        info!(
            "Optimal cost {} with {} tiles on optimal routes",
            best,
            tiles.len()
        );
        Ok(Solution {
            cost: best,
            tiles,
            route,
        })
    }
}

/// The result of [Solver::solve].
#[derive(Clone, Debug)]
pub struct Solution {
    cost: Cost,
    tiles: FxIndexSet<Point>,
    route: Vec<OrientedState>,
}

impl Solution {
    /// The minimum total cost from start to goal.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Every cell on at least one optimal route, in row-major order.
    pub fn tiles(&self) -> &FxIndexSet<Point> {
        &self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, cell: &Point) -> bool {
        self.tiles.contains(cell)
    }

    /// One optimal route as a sequence of oriented states, from the start state to a goal state.
    pub fn route(&self) -> &[OrientedState] {
        &self.route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(start: Point, goal: Point) -> Maze {
        let mut text = String::new();
        for y in 0..4 {
            for x in 0..4 {
                let p = Point::new(x, y);
                text.push(if p == start {
                    'S'
                } else if p == goal {
                    'E'
                } else {
                    '.'
                });
            }
            text.push('\n');
        }
        Maze::parse(&text).unwrap()
    }

    fn cells(points: &[(i32, i32)]) -> Vec<Point> {
        points.iter().map(|(x, y)| Point::new(*x, *y)).collect()
    }

    #[test]
    fn straight_east_costs_three() {
        let maze = open_grid(Point::new(0, 0), Point::new(3, 0));
        let solution = Solver::new().solve(&maze).unwrap();
        assert_eq!(solution.cost(), 3);
        assert_eq!(
            solution.tiles().iter().copied().collect::<Vec<_>>(),
            cells(&[(0, 0), (1, 0), (2, 0), (3, 0)])
        );
        assert_eq!(solution.route().len(), 4);
    }

    #[test]
    fn straight_down_costs_one_turn() {
        let maze = open_grid(Point::new(0, 0), Point::new(0, 3));
        let solution = Solver::new().solve(&maze).unwrap();
        assert_eq!(solution.cost(), 1003);
        assert_eq!(
            solution.tiles().iter().copied().collect::<Vec<_>>(),
            cells(&[(0, 0), (0, 1), (0, 2), (0, 3)])
        );
        // One rotation, three steps.
        assert_eq!(solution.route().len(), 5);
    }

    #[test]
    fn lowest_cost_matches_solve() {
        let maze = open_grid(Point::new(0, 0), Point::new(3, 3));
        let solver = Solver::new();
        assert_eq!(
            solver.lowest_cost(&maze),
            Some(solver.solve(&maze).unwrap().cost())
        );
        assert_eq!(solver.lowest_cost(&maze), Some(1006));
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        // |S#E|
        let maze = Maze::parse("S#E\n").unwrap();
        let solver = Solver::new();
        assert_eq!(solver.lowest_cost(&maze), None);
        let err = solver.solve(&maze).unwrap_err();
        assert!(err.is_unreachable());
        assert_eq!(err.code(), "UNREACHABLE");
    }

    #[test]
    fn custom_costs_change_the_optimum() {
        // |S...|
        // |.##.|
        // |...E|
        let maze = Maze::parse("S...\n.##.\n...E\n").unwrap();
        let mut solver = Solver::new();
        assert_eq!(solver.solve(&maze).unwrap().cost(), 1005);
        solver.turn_cost = 1;
        let solution = solver.solve(&maze).unwrap();
        assert_eq!(solution.cost(), 6);
        assert_eq!(solution.tile_count(), 6);
        // Free turns make both ways around the block optimal.
        solver.turn_cost = 0;
        let solution = solver.solve(&maze).unwrap();
        assert_eq!(solution.cost(), 5);
        assert_eq!(solution.tile_count(), 10);
    }

    #[test]
    fn start_facing_is_configurable() {
        let maze = open_grid(Point::new(0, 0), Point::new(0, 3));
        let mut solver = Solver::new();
        solver.start_facing = Facing::South;
        assert_eq!(solver.solve(&maze).unwrap().cost(), 3);
        solver.start_facing = Facing::North;
        assert_eq!(solver.solve(&maze).unwrap().cost(), 2003);
    }

    #[test]
    fn reverse_labels_are_costs_to_goal() {
        let maze = open_grid(Point::new(0, 0), Point::new(3, 0));
        let solver = Solver::new();
        let reverse = solver.search_reverse(&maze, None);
        // From (1, 0) facing East two steps remain; the label lives on the reversed state.
        let state = OrientedState::new(Point::new(1, 0), Facing::East);
        assert_eq!(reverse.get(&state.reversed()), Some(2));
        assert_eq!(reverse.best(), Some(3));
    }

    #[test]
    fn collapsed_rule_reports_costlier_swapped_corridor() {
        // Swapped, the corridor starts facing away from the old start.
        let maze = Maze::parse("S..E\n").unwrap();
        let mut solver = Solver::new();
        solver.membership = MembershipRule::Collapsed;
        assert_eq!(
            solver.solve(&maze).unwrap_err(),
            Error::Inconsistent {
                forward: 3,
                reverse: None
            }
        );
        // The oriented rule handles the same corridor.
        solver.membership = MembershipRule::Oriented;
        let solution = solver.solve(&maze).unwrap();
        assert!(solution.contains(&maze.start()));
        assert_eq!(solution.tile_count(), 4);
    }

    #[test]
    fn collapsed_rule_reports_cheaper_swapped_corridor() {
        let maze = Maze::parse("S..E\n").unwrap();
        let mut solver = Solver::new();
        solver.membership = MembershipRule::Collapsed;
        solver.start_facing = Facing::West;
        let err = solver.solve(&maze).unwrap_err();
        assert_eq!(
            err,
            Error::Inconsistent {
                forward: 2003,
                reverse: Some(3)
            }
        );
        assert_eq!(err.code(), "INCONSISTENT");
    }

    #[test]
    fn collapsed_rule_on_a_single_turn() {
        let maze = open_grid(Point::new(0, 0), Point::new(0, 3));
        let mut solver = Solver::new();
        solver.membership = MembershipRule::Collapsed;
        let solution = solver.solve(&maze).unwrap();
        assert_eq!(solution.cost(), 1003);
        assert_eq!(
            solution.tiles().iter().copied().collect::<Vec<_>>(),
            cells(&[(0, 0), (0, 1), (0, 2), (0, 3)])
        );
    }
}
