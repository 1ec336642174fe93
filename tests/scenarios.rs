use grid_util::point::Point;
use oriented_pathfinding::{Facing, Maze, MembershipRule, Solver};

const FIRST_EXAMPLE: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############
";

const SECOND_EXAMPLE: &str = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################
";

fn points(cells: &[(i32, i32)]) -> Vec<Point> {
    cells.iter().map(|(x, y)| Point::new(*x, *y)).collect()
}

fn tiles(maze: &Maze, solver: &Solver) -> Vec<Point> {
    solver
        .solve(maze)
        .unwrap()
        .tiles()
        .iter()
        .copied()
        .collect()
}

#[test]
fn published_examples() {
    for (text, cost, count) in [(FIRST_EXAMPLE, 7036, 45), (SECOND_EXAMPLE, 11048, 64)] {
        let maze = Maze::parse(text).unwrap();
        for rule in [MembershipRule::Oriented, MembershipRule::Collapsed] {
            let mut solver = Solver::new();
            solver.membership = rule;
            let solution = solver.solve(&maze).unwrap();
            assert_eq!(solution.cost(), cost);
            assert_eq!(solution.tile_count(), count);
            assert!(solution.contains(&maze.start()));
            assert!(solution.contains(&maze.goal()));
        }
    }
}

#[test]
fn straight_corridor_is_exactly_the_members() {
    // |S...E|
    let maze = Maze::parse("#######\n#S...E#\n#######\n").unwrap();
    let solution = Solver::new().solve(&maze).unwrap();
    assert_eq!(solution.cost(), 4);
    assert_eq!(
        tiles(&maze, &Solver::new()),
        points(&[(1, 1), (2, 1), (3, 1), (4, 1), (5, 1)])
    );
}

#[test]
fn forward_only_cost_when_facing_the_goal() {
    for length in 1..8 {
        let text = format!("S{}E\n", ".".repeat(length));
        let maze = Maze::parse(&text).unwrap();
        assert_eq!(Solver::new().lowest_cost(&maze), Some(length as u64 + 1));

        // The same corridor running downwards, entered facing south.
        let column = text
            .trim_end()
            .chars()
            .map(|c| format!("{c}\n"))
            .collect::<String>();
        let maze = Maze::parse(&column).unwrap();
        let mut solver = Solver::new();
        solver.start_facing = Facing::South;
        assert_eq!(solver.lowest_cost(&maze), Some(length as u64 + 1));
    }
}

#[test]
fn equal_detours_are_both_members() {
    // |.....|
    // |S.#.E|
    // |.....|
    let maze = Maze::parse("#######\n#.....#\n#S.#.E#\n#.....#\n#######\n").unwrap();
    let solution = Solver::new().solve(&maze).unwrap();
    assert_eq!(solution.cost(), 3006);
    assert_eq!(
        solution.tiles().iter().copied().collect::<Vec<_>>(),
        points(&[
            (1, 1),
            (2, 1),
            (3, 1),
            (4, 1),
            (5, 1),
            (1, 2),
            (2, 2),
            (5, 2),
            (1, 3),
            (2, 3),
            (3, 3),
            (4, 3),
            (5, 3),
        ])
    );
    assert!(solution.contains(&Point::new(3, 1)));
    assert!(solution.contains(&Point::new(3, 3)));
}

#[test]
fn swapping_endpoints_keeps_cost_and_members() {
    // Vertical offsets need one turn in either direction when starting east.
    let down = Maze::parse("S...\n....\n....\nE...\n").unwrap();
    let up = down.reversed();
    let solver = Solver::new();
    let there = solver.solve(&down).unwrap();
    let back = solver.solve(&up).unwrap();
    assert_eq!(there.cost(), 1003);
    assert_eq!(there.cost(), back.cost());
    assert_eq!(there.tiles(), back.tiles());
}

#[test]
fn walls_are_never_members() {
    for text in [FIRST_EXAMPLE, SECOND_EXAMPLE] {
        let maze = Maze::parse(text).unwrap();
        let solution = Solver::new().solve(&maze).unwrap();
        assert!(solution.tiles().iter().all(|cell| maze.is_open(*cell)));
    }
}

#[test]
fn route_ends_on_goal_with_the_optimal_cost() {
    let maze = Maze::parse(FIRST_EXAMPLE).unwrap();
    let solver = Solver::new();
    let solution = solver.solve(&maze).unwrap();
    let route = solution.route();
    assert_eq!(route[0].cell, maze.start());
    assert_eq!(route[0].facing, Facing::East);
    assert_eq!(route[route.len() - 1].cell, maze.goal());
    let turns = route.windows(2).filter(|w| w[0].cell == w[1].cell).count() as u64;
    let steps = route.len() as u64 - 1 - turns;
    assert_eq!(turns * 1000 + steps, solution.cost());
    assert!(route.iter().all(|s| solution.contains(&s.cell)));
}

#[test]
fn warm_reverse_search_agrees_with_forward() {
    let maze = Maze::parse(SECOND_EXAMPLE).unwrap();
    let solver = Solver::new();
    let forward = solver.search_forward(&maze, None);
    let reverse = solver.search_reverse(&maze, forward.best());
    assert_eq!(forward.best(), reverse.best());
    let cold = solver.search_reverse(&maze, None);
    assert_eq!(cold.best(), forward.best());
    assert!(reverse.labeled() <= cold.labeled());
}
