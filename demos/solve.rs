use oriented_pathfinding::{Maze, Solver};
use std::env;
use std::fs;
use std::process;

// Reads a maze from the file given as first argument and prints the lowest cost, the number of
// cells on optimal routes and the maze with those cells marked. Set RUST_LOG=debug to see search
// statistics.

fn main() {
    env_logger::init();
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: solve <maze file>");
        process::exit(2);
    };
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("could not read {path}: {e}");
            process::exit(1);
        }
    };
    let maze = match Maze::parse(&text) {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("{path}: {e}");
            process::exit(1);
        }
    };
    match Solver::new().solve(&maze) {
        Ok(solution) => {
            println!("Lowest cost: {}", solution.cost());
            println!("Cells on optimal routes: {}", solution.tile_count());
            println!("{}", maze.render_marked(|p| solution.contains(&p)));
        }
        Err(e) => {
            eprintln!("{} ({})", e, e.code());
            process::exit(1);
        }
    }
}
