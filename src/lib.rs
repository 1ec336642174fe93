//! # oriented_pathfinding
//!
//! Shortest paths on a grid for an agent that has a facing. Moving one cell
//! forward costs [MOVE_COST], rotating in place by a quarter turn costs
//! [TURN_COST], so the search runs over oriented states (cell × facing)
//! rather than over cells.
//!
//! Besides the optimal cost, the crate answers which cells lie on *any*
//! optimal route. This is done without enumerating routes: the same
//! cost-labeling search is run from the start and on the direction-reversed
//! problem from the goal, and a state lies on an optimal route exactly when
//! the two labels add up to the optimal cost.
//!
//! ```
//! use oriented_pathfinding::{Maze, Solver};
//!
//! let maze: Maze = "#####\n#S.E#\n#####".parse().unwrap();
//! let solution = Solver::new().solve(&maze).unwrap();
//! assert_eq!(solution.cost(), 2);
//! assert_eq!(solution.tile_count(), 3);
//! ```
pub mod error;
pub mod maze;
pub mod membership;
pub mod search;
pub mod solver;
pub mod state;

pub use error::{Error, MalformedGrid, Marker};
pub use maze::Maze;
pub use membership::MembershipRule;
pub use search::{label_costs, CostLabels};
pub use solver::{Solution, Solver};
pub use state::{Facing, Move, OrientedState, StateSpace};

use fxhash::FxBuildHasher;
use indexmap::IndexSet;

/// Accumulated cost of a route.
pub type Cost = u64;

/// Insertion-ordered set of cells, used for the path membership result.
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Cost of a single step forward.
pub const MOVE_COST: Cost = 1;
/// Cost of a quarter turn in place.
pub const TURN_COST: Cost = 1000;

/// Every oriented state has at most this many successors.
const N_SMALLVEC_SIZE: usize = 3;
