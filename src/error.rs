//! Error types for maze construction and solving.

use std::fmt;

use grid_util::point::Point;

use crate::Cost;

/// One of the two distinguished cells of a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Start,
    Goal,
}

impl Marker {
    /// The character the marker is written as in maze text.
    pub fn symbol(&self) -> char {
        match self {
            Marker::Start => 'S',
            Marker::Goal => 'E',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Marker::Start => write!(f, "start"),
            Marker::Goal => write!(f, "goal"),
        }
    }
}

/// Reasons a maze cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedGrid {
    /// The input contains no rows.
    Empty,
    /// A row does not have the width of the first row.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside of `#`, `.`, `S` and `E`.
    UnknownTile { row: usize, column: usize, tile: char },
    /// The marker does not appear at all.
    MissingMarker(Marker),
    /// The marker appears more than once.
    DuplicateMarker {
        marker: Marker,
        first: Point,
        second: Point,
    },
    /// The marker lies outside of the grid.
    OutOfBounds { marker: Marker, cell: Point },
    /// The marker lies on a wall.
    MarkerOnWall { marker: Marker, cell: Point },
    /// Start and goal are the same cell.
    SameCell(Point),
}

impl fmt::Display for MalformedGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MalformedGrid::Empty => write!(f, "maze has no rows"),
            MalformedGrid::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has width {found}, expected {expected} like the first row"
            ),
            MalformedGrid::UnknownTile { row, column, tile } => {
                write!(f, "unknown tile {tile:?} at column {column}, row {row}")
            }
            MalformedGrid::MissingMarker(marker) => {
                write!(f, "no {marker} marker '{}' found", marker.symbol())
            }
            MalformedGrid::DuplicateMarker {
                marker,
                first,
                second,
            } => write!(
                f,
                "{marker} marker '{}' appears at ({}, {}) and again at ({}, {})",
                marker.symbol(),
                first.x,
                first.y,
                second.x,
                second.y
            ),
            MalformedGrid::OutOfBounds { marker, cell } => {
                write!(f, "{marker} ({}, {}) is outside the grid", cell.x, cell.y)
            }
            MalformedGrid::MarkerOnWall { marker, cell } => {
                write!(f, "{marker} ({}, {}) is a wall", cell.x, cell.y)
            }
            MalformedGrid::SameCell(cell) => {
                write!(f, "start and goal share the cell ({}, {})", cell.x, cell.y)
            }
        }
    }
}

impl std::error::Error for MalformedGrid {}

/// Errors reported by [Solver::solve](crate::Solver::solve).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The maze could not be built.
    MalformedGrid(MalformedGrid),
    /// No route connects start and goal. This is a regular outcome, not a defect.
    Unreachable { start: Point, goal: Point },
    /// The forward and the reversed search disagree on the optimal cost.
    Inconsistent {
        forward: Cost,
        reverse: Option<Cost>,
    },
}

impl Error {
    /// Short identifier for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MalformedGrid(_) => "MALFORMED_GRID",
            Error::Unreachable { .. } => "UNREACHABLE",
            Error::Inconsistent { .. } => "INCONSISTENT",
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::Unreachable { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedGrid(e) => write!(f, "malformed grid: {e}"),
            Error::Unreachable { start, goal } => write!(
                f,
                "goal ({}, {}) cannot be reached from ({}, {})",
                goal.x, goal.y, start.x, start.y
            ),
            Error::Inconsistent { forward, reverse } => match reverse {
                Some(reverse) => write!(
                    f,
                    "forward search found cost {forward} but reversed search found {reverse}"
                ),
                None => write!(
                    f,
                    "forward search found cost {forward} but reversed search found no route"
                ),
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedGrid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MalformedGrid> for Error {
    fn from(e: MalformedGrid) -> Self {
        Error::MalformedGrid(e)
    }
}
