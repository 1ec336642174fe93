use grid_util::point::Point;
use smallvec::SmallVec;

use crate::maze::Maze;
use crate::{Cost, MOVE_COST, N_SMALLVEC_SIZE, TURN_COST};

/// Compass orientation of the agent. The numbering (North = 0, clockwise) is part of the dense
/// state encoding used by [StateSpace].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    pub fn num(&self) -> usize {
        *self as usize
    }

    pub fn from_num(num: usize) -> Facing {
        Facing::ALL[num % 4]
    }

    pub fn clockwise(&self) -> Facing {
        Facing::from_num(self.num() + 1)
    }

    pub fn counter_clockwise(&self) -> Facing {
        Facing::from_num(self.num() + 3)
    }

    pub fn opposite(&self) -> Facing {
        Facing::from_num(self.num() + 2)
    }

    /// Unit step in this direction. Row 0 is the top of the maze, so North decreases `y`.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }

    /// The neighbouring cell in this direction.
    pub fn step(&self, cell: Point) -> Point {
        let (dx, dy) = self.offset();
        Point::new(cell.x + dx, cell.y + dy)
    }
}

/// The three transitions available from every oriented state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Forward,
    RotateClockwise,
    RotateCounterClockwise,
}

impl Move {
    pub const ALL: [Move; 3] = [
        Move::Forward,
        Move::RotateClockwise,
        Move::RotateCounterClockwise,
    ];
}

/// A cell together with a facing: the vertex type of the search graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrientedState {
    pub cell: Point,
    pub facing: Facing,
}

impl OrientedState {
    pub fn new(cell: Point, facing: Facing) -> OrientedState {
        OrientedState { cell, facing }
    }

    /// The same cell facing the other way. A route from `a` to `b` traversed backwards is a
    /// route from `b.reversed()` to `a.reversed()` with the same cost.
    pub fn reversed(&self) -> OrientedState {
        OrientedState::new(self.cell, self.facing.opposite())
    }
}

/// Dense index of a state on a grid `width` cells wide: `facing + 4 * x + 4 * width * y`.
pub(crate) fn encode(width: usize, state: &OrientedState) -> usize {
    state.facing.num() + 4 * (state.cell.x as usize + width * state.cell.y as usize)
}

/// Inverse of [encode].
pub(crate) fn decode(width: usize, index: usize) -> OrientedState {
    let cell_ix = index / 4;
    OrientedState::new(
        Point::new((cell_ix % width) as i32, (cell_ix / width) as i32),
        Facing::from_num(index % 4),
    )
}

/// The oriented state graph of a [Maze] under a given cost model. States are encoded densely as
/// `facing + 4 * x + 4 * width * y`, so cost tables can be flat vectors.
#[derive(Clone, Copy, Debug)]
pub struct StateSpace<'a> {
    maze: &'a Maze,
    pub move_cost: Cost,
    pub turn_cost: Cost,
}

impl<'a> StateSpace<'a> {
    pub fn new(maze: &'a Maze) -> StateSpace<'a> {
        StateSpace::with_costs(maze, MOVE_COST, TURN_COST)
    }

    pub fn with_costs(maze: &'a Maze, move_cost: Cost, turn_cost: Cost) -> StateSpace<'a> {
        StateSpace {
            maze,
            move_cost,
            turn_cost,
        }
    }

    pub fn maze(&self) -> &'a Maze {
        self.maze
    }

    /// Number of encodable states, reachable or not.
    pub fn len(&self) -> usize {
        self.maze.width() * self.maze.height() * 4
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dense index of a state whose cell is in bounds.
    pub fn index(&self, state: &OrientedState) -> usize {
        debug_assert!(self.maze.in_bounds(state.cell));
        encode(self.maze.width(), state)
    }

    /// Inverse of [index](Self::index).
    pub fn state(&self, index: usize) -> OrientedState {
        decode(self.maze.width(), index)
    }

    /// Applies a move, returning the target state and its cost if the move is legal. Rotations are
    /// always legal; moving forward requires the cell ahead to be open.
    pub fn transition(&self, state: &OrientedState, mv: Move) -> Option<(OrientedState, Cost)> {
        match mv {
            Move::Forward => {
                let ahead = state.facing.step(state.cell);
                self.maze
                    .is_open(ahead)
                    .then(|| (OrientedState::new(ahead, state.facing), self.move_cost))
            }
            Move::RotateClockwise => Some((
                OrientedState::new(state.cell, state.facing.clockwise()),
                self.turn_cost,
            )),
            Move::RotateCounterClockwise => Some((
                OrientedState::new(state.cell, state.facing.counter_clockwise()),
                self.turn_cost,
            )),
        }
    }

    pub fn successors(
        &self,
        state: &OrientedState,
    ) -> SmallVec<[(OrientedState, Cost); N_SMALLVEC_SIZE]> {
        Move::ALL
            .iter()
            .filter_map(|mv| self.transition(state, *mv))
            .collect()
    }
}
