use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use oriented_pathfinding::{Maze, Solver};

// In this example the cells on optimal routes are found on a 5x3 grid with shape
//  _____
// |S    |
// | ### |
// |    E|
//  _____
// where
// - # marks a wall
// - S marks the start, facing east
// - E marks the end
//
// Going east first needs one turn, going south first needs two.

fn main() {
    let mut grid = BoolGrid::new(5, 3, false);
    for x in 1..4 {
        grid.set(x, 1, true);
    }
    let maze = Maze::new(grid, Point::new(0, 0), Point::new(4, 2)).unwrap();
    println!("{}", maze);
    let solution = Solver::new().solve(&maze).unwrap();
    println!("Cost: {}", solution.cost());
    println!("{}", maze.render_marked(|p| solution.contains(&p)));
    println!("Route:");
    for state in solution.route() {
        println!("{:?} facing {:?}", state.cell, state.facing);
    }
}
