use core::fmt;
use std::str::FromStr;

use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::error::{MalformedGrid, Marker};

/// An immutable maze: a [BoolGrid] of walls (`true` is blocked) together with the designated
/// start and goal cells. Connected components of the open cells are computed once on
/// construction so that unreachable goals can be reported without searching.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: BoolGrid,
    start: Point,
    goal: Point,
    components: UnionFind<usize>,
}

impl Maze {
    /// Builds a maze from a wall grid. Fails if either endpoint is outside the grid, on a wall,
    /// or if both endpoints share a cell.
    pub fn new(grid: BoolGrid, start: Point, goal: Point) -> Result<Maze, MalformedGrid> {
        let mut maze = Maze {
            components: UnionFind::new(grid.width() * grid.height()),
            grid,
            start,
            goal,
        };
        for (marker, cell) in [(Marker::Start, start), (Marker::Goal, goal)] {
            if !maze.in_bounds(cell) {
                return Err(MalformedGrid::OutOfBounds { marker, cell });
            }
            if !maze.is_open(cell) {
                return Err(MalformedGrid::MarkerOnWall { marker, cell });
            }
        }
        if start == goal {
            return Err(MalformedGrid::SameCell(start));
        }
        maze.generate_components();
        Ok(maze)
    }

    /// Parses the textual form: `#` is a wall, `.` is open, `S` and `E` are the open start and
    /// goal cells. Parsing stops at the first empty line.
    pub fn parse(text: &str) -> Result<Maze, MalformedGrid> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .take_while(|line| !line.is_empty())
            .collect();
        let width = match rows.first() {
            Some(row) => row.chars().count(),
            None => return Err(MalformedGrid::Empty),
        };
        let mut grid = BoolGrid::new(width, rows.len(), false);
        let mut start = None;
        let mut goal = None;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MalformedGrid::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, tile) in row.chars().enumerate() {
                let cell = Point::new(x as i32, y as i32);
                let (marker, slot) = match tile {
                    '#' => {
                        grid.set(cell.x as usize, cell.y as usize, true);
                        continue;
                    }
                    '.' => continue,
                    'S' => (Marker::Start, &mut start),
                    'E' => (Marker::Goal, &mut goal),
                    _ => {
                        return Err(MalformedGrid::UnknownTile {
                            row: y,
                            column: x,
                            tile,
                        })
                    }
                };
                if let Some(first) = *slot {
                    return Err(MalformedGrid::DuplicateMarker {
                        marker,
                        first,
                        second: cell,
                    });
                }
                *slot = Some(cell);
            }
        }
        let start = start.ok_or(MalformedGrid::MissingMarker(Marker::Start))?;
        let goal = goal.ok_or(MalformedGrid::MissingMarker(Marker::Goal))?;
        Maze::new(grid, start, goal)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn in_bounds(&self, cell: Point) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width()
            && (cell.y as usize) < self.height()
    }

    /// Cells outside of the grid are never open.
    pub fn is_open(&self, cell: Point) -> bool {
        self.in_bounds(cell) && !self.grid.get(cell.x as usize, cell.y as usize)
    }

    /// Row-major index of a cell that is in bounds.
    pub fn cell_index(&self, cell: Point) -> usize {
        cell.x as usize + self.width() * cell.y as usize
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        iproduct!(0..self.height() as i32, 0..self.width() as i32).map(|(y, x)| Point::new(x, y))
    }

    /// All open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells().filter(move |cell| self.is_open(*cell))
    }

    /// The same walls with start and goal swapped.
    pub fn reversed(&self) -> Maze {
        Maze {
            grid: self.grid.clone(),
            start: self.goal,
            goal: self.start,
            components: self.components.clone(),
        }
    }

    /// Retrieves the component id a given open cell belongs to.
    pub fn component(&self, cell: Point) -> usize {
        self.components.find(self.cell_index(cell))
    }

    /// Checks if two open cells are on the same connected component. Turning never changes the
    /// cell, so this is exactly whether some route connects them.
    pub fn reachable(&self, from: Point, to: Point) -> bool {
        if self.is_open(from) && self.is_open(to) {
            self.components
                .equiv(self.cell_index(from), self.cell_index(to))
        } else {
            info!(
                "({}, {}) or ({}, {}) is not an open cell",
                from.x, from.y, to.x, to.y
            );
            false
        }
    }

    /// Links up open neighbours to the same components. Only the right and lower neighbour
    /// need to be visited.
    fn generate_components(&mut self) {
        let cells: Vec<Point> = self.open_cells().collect();
        for point in cells {
            let parent_ix = self.cell_index(point);
            for neighbour in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
                if self.is_open(neighbour) {
                    let ix = self.cell_index(neighbour);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    fn tile(&self, cell: Point) -> char {
        if cell == self.start {
            Marker::Start.symbol()
        } else if cell == self.goal {
            Marker::Goal.symbol()
        } else if self.is_open(cell) {
            '.'
        } else {
            '#'
        }
    }

    /// Renders the maze with every cell for which `marked` holds drawn as `O`.
    pub fn render_marked<F>(&self, marked: F) -> String
    where
        F: Fn(Point) -> bool,
    {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let cell = Point::new(x, y);
                out.push(if marked(cell) { 'O' } else { self.tile(cell) });
            }
            out.push('\n');
        }
        out
    }
}

impl FromStr for Maze {
    type Err = MalformedGrid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Maze::parse(s)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render_marked(|_| false))
    }
}
