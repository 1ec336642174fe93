//! Single-source cost labeling over the oriented state space.
//!
//! This is Dijkstra's algorithm on dense arrays with one addition: every accepted label must stay
//! within a bound on the cost to reach a success state. The bound can be supplied by the caller
//! and tightens as soon as a success state is labeled, so no state is expanded beyond a cost that
//! is already known to be non-optimal.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use grid_util::point::Point;
use log::debug;

use crate::state::{decode, encode, Facing, OrientedState, StateSpace};
use crate::Cost;

struct SmallestCostHolder {
    cost: Cost,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.index == other.index
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: lowest cost first, ties go to the lowest state index
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Minimum costs from the origins of one search to every labeled oriented state, owned by that
/// search alone. Unlabeled states are `None`, which is distinct from a cost of zero.
#[derive(Clone, Debug)]
pub struct CostLabels {
    costs: Vec<Option<Cost>>,
    parents: Vec<Option<usize>>,
    width: usize,
    height: usize,
    best: Option<(Cost, usize)>,
    bound: Option<Cost>,
    expanded: usize,
}

impl CostLabels {
    fn new(space: &StateSpace) -> CostLabels {
        CostLabels {
            costs: vec![None; space.len()],
            parents: vec![None; space.len()],
            width: space.maze().width(),
            height: space.maze().height(),
            best: None,
            bound: None,
            expanded: 0,
        }
    }

    fn index(&self, state: &OrientedState) -> Option<usize> {
        let cell = state.cell;
        if cell.x < 0
            || cell.y < 0
            || cell.x as usize >= self.width
            || cell.y as usize >= self.height
        {
            return None;
        }
        Some(encode(self.width, state))
    }

    fn state(&self, index: usize) -> OrientedState {
        decode(self.width, index)
    }

    /// Minimum cost to reach `state`, `None` if it was never labeled.
    pub fn get(&self, state: &OrientedState) -> Option<Cost> {
        self.index(state).and_then(|ix| self.costs[ix])
    }

    /// Minimum over the four facings of a cell.
    pub fn cell_cost(&self, cell: Point) -> Option<Cost> {
        Facing::ALL
            .iter()
            .filter_map(|f| self.get(&OrientedState::new(cell, *f)))
            .min()
    }

    /// Collapses the oriented labels to one minimum per cell, in row-major order.
    pub fn cell_costs(&self) -> Vec<Option<Cost>> {
        self.costs
            .chunks(4)
            .map(|facings| facings.iter().flatten().min().copied())
            .collect()
    }

    /// Cost of the cheapest success state, `None` if no success state was reached.
    pub fn best(&self) -> Option<Cost> {
        self.best.map(|(cost, _)| cost)
    }

    /// The cheapest success state.
    pub fn best_state(&self) -> Option<OrientedState> {
        self.best.map(|(_, ix)| self.state(ix))
    }

    /// The bound the search finished with.
    pub fn bound(&self) -> Option<Cost> {
        self.bound
    }

    /// Number of labeled states.
    pub fn labeled(&self) -> usize {
        self.costs.iter().filter(|c| c.is_some()).count()
    }

    /// Number of frontier entries that were expanded.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Every labeled state with its cost, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (OrientedState, Cost)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .filter_map(move |(ix, cost)| cost.map(|c| (self.state(ix), c)))
    }

    /// Follows the recorded parents back from `state` to an origin. The returned route starts at
    /// the origin and ends at `state`; every step along it is a legal move.
    pub fn trace(&self, state: &OrientedState) -> Option<Vec<OrientedState>> {
        let start = self.index(state)?;
        self.costs[start]?;
        let mut route: Vec<OrientedState> =
            std::iter::successors(Some(start), |ix| self.parents[*ix])
                .map(|ix| self.state(ix))
                .collect();
        route.reverse();
        Some(route)
    }
}

/// Labels every state reachable from `origins` with its minimum cost, as long as that cost does
/// not exceed `bound` (`None` means unbounded). The bound is tightened whenever a state for which
/// `success` holds receives a cheaper label.
pub fn label_costs<FS>(
    space: &StateSpace,
    origins: &[OrientedState],
    bound: Option<Cost>,
    mut success: FS,
) -> CostLabels
where
    FS: FnMut(&OrientedState) -> bool,
{
    let mut labels = CostLabels::new(space);
    let mut bound = bound;
    let mut to_see = BinaryHeap::new();
    let within = |cost: Cost, bound: Option<Cost>| bound.map_or(true, |b| cost <= b);

    for origin in origins {
        let index = space.index(origin);
        if labels.costs[index].is_some() {
            continue;
        }
        labels.costs[index] = Some(0);
        if success(origin) {
            labels.best = Some((0, index));
            bound = Some(0);
        }
        to_see.push(SmallestCostHolder { cost: 0, index });
    }

    while let Some(SmallestCostHolder { cost, index }) = to_see.pop() {
        // The heap may hold several entries for a state whose label improved; only the one
        // matching the label is current.
        if labels.costs[index].map_or(true, |c| cost > c) {
            continue;
        }
        if !within(cost, bound) {
            break;
        }
        labels.expanded += 1;
        let state = space.state(index);
        for (successor, move_cost) in space.successors(&state) {
            let new_cost = cost + move_cost;
            if !within(new_cost, bound) {
                continue;
            }
            let n = space.index(&successor);
            if labels.costs[n].map_or(false, |c| c <= new_cost) {
                continue;
            }
            labels.costs[n] = Some(new_cost);
            labels.parents[n] = Some(index);
            if success(&successor) {
                if labels.best.map_or(true, |(c, _)| new_cost < c) {
                    labels.best = Some((new_cost, n));
                }
                bound = Some(bound.map_or(new_cost, |b| b.min(new_cost)));
            }
            to_see.push(SmallestCostHolder {
                cost: new_cost,
                index: n,
            });
        }
    }
    labels.bound = bound;
    debug!(
        "Labeled {} of {} states with {} expansions, best {:?}",
        labels.labeled(),
        space.len(),
        labels.expanded,
        labels.best()
    );
    labels
}
