use std::collections::HashSet;

use mazer::{Algorithm, Cell, Grid, MazeSolver, ParseError, Pos, SolveError};
use pretty_assertions::assert_eq;

fn maze() -> Grid {
    Grid::from_rows(&[
        "S.#.....",
        ".##.###.",
        "....#...",
        "#.#.#.#.",
        "..#...#E",
    ]).unwrap()
}

fn assert_well_formed(grid: &Grid, path: &[Cell]) {
    assert_eq!(path.first().map(Cell::pos), Some(grid.start()), "starts at start");
    assert_eq!(path.last().map(Cell::pos), Some(grid.end()), "ends at end");
    for w in path.windows(2) {
        assert!(w[0].pos().is_adjacent(w[1].pos()), "{} -> {} is not a single step", w[0].pos(), w[1].pos());
    }
    let unique: HashSet<Pos> = path.iter().map(Cell::pos).collect();
    assert_eq!(unique.len(), path.len(), "path revisits a cell");
    assert!(path.iter().all(Cell::is_passable));
}

/// xorshift, enough to scatter walls reproducibly
struct Walls(u64);

impl Walls {
    fn next(&mut self) -> u64 { self.0 ^= self.0 << 13; self.0 ^= self.0 >> 7; self.0 ^= self.0 << 17; self.0 }

    fn grid(&mut self, rows: usize, cols: usize) -> Grid {
        let mut open: Vec<Vec<bool>> = (0..rows).map(|_| (0..cols).map(|_| self.next() % 10 >= 3).collect()).collect();
        open[0][0] = true;
        open[rows - 1][cols - 1] = true;
        Grid::new(open, Pos::new(0, 0), Pos::new(rows - 1, cols - 1)).unwrap()
    }
}

#[test]
fn open_three_by_three() {
    let mut g = Grid::from_rows(&["S..", "...", "..E"]).unwrap();
    let bfs = MazeSolver::with_maze(&mut g).solve_maze_bfs().unwrap();
    assert_eq!(bfs.len(), 5);
    assert_well_formed(&g, &bfs);

    g.reset();
    let dfs = MazeSolver::with_maze(&mut g).solve_maze_dfs().unwrap();
    assert!(dfs.len() >= 5);
    assert_well_formed(&g, &dfs);
}

#[test]
fn both_searches_produce_well_formed_paths() {
    let mut g = maze();
    for algorithm in [Algorithm::Dfs, Algorithm::Bfs] {
        g.reset();
        let path = MazeSolver::with_maze(&mut g).solve(algorithm).unwrap();
        assert_well_formed(&g, &path);
    }
}

#[test]
fn bfs_finds_shortest_route() {
    let mut g = maze();
    let path = MazeSolver::with_maze(&mut g).solve_maze_bfs().unwrap();
    // 15 moves whether the route goes over the top or along the bottom
    assert_eq!(path.len(), 16);
    assert_eq!(path[5].pos(), Pos::new(2, 3));
}

#[test]
fn start_equals_end() {
    let mut g = Grid::new(vec![vec![true; 3]; 2], Pos::new(1, 1), Pos::new(1, 1)).unwrap();
    let mut solver = MazeSolver::with_maze(&mut g);
    let dfs = solver.solve_maze_dfs().unwrap();
    assert_eq!(dfs.iter().map(Cell::pos).collect::<Vec<_>>(), vec![Pos::new(1, 1)]);
    let bfs = solver.solve_maze_bfs().unwrap();
    assert_eq!(bfs.len(), 1);
}

#[test]
fn walled_off_end_is_unsolvable() {
    let mut g = Grid::from_rows(&["S.#.", "..#E"]).unwrap();
    let mut solver = MazeSolver::with_maze(&mut g);
    assert_eq!(solver.solve_maze_dfs().unwrap_err(), SolveError::Unsolvable);
    solver.maze_mut().unwrap().reset();
    assert_eq!(solver.solve_maze_bfs().unwrap_err(), SolveError::Unsolvable);
}

#[test]
fn reset_makes_runs_repeatable() {
    let mut g = maze();
    let first = MazeSolver::with_maze(&mut g).solve_maze_dfs().unwrap();
    g.reset();
    let second = MazeSolver::with_maze(&mut g).solve_maze_dfs().unwrap();
    assert_eq!(first, second);
}

#[test]
fn search_without_reset_sees_stale_state() {
    let mut g = maze();
    let mut solver = MazeSolver::with_maze(&mut g);
    solver.solve_maze_bfs().unwrap();
    // the start cell is already explored, so nothing around it is valid any more
    assert!(solver.solve_maze_dfs().is_err());
}

#[test]
fn set_maze_replaces_previous_grid() {
    let mut a = maze();
    let mut b = Grid::from_rows(&["SE"]).unwrap();
    let mut solver = MazeSolver::with_maze(&mut a);
    assert_eq!(solver.maze().unwrap().rows(), 5);
    solver.set_maze(&mut b);
    assert_eq!(solver.solve_maze_bfs().unwrap().len(), 2);
}

#[test]
fn bfs_never_longer_than_dfs() {
    let mut walls = Walls(0x9e37_79b9_7f4a_7c15);
    let mut solved = 0;
    for _ in 0..200 {
        let mut g = walls.grid(9, 11);
        let dfs = match MazeSolver::with_maze(&mut g).solve_maze_dfs() {
            Ok(p) => p,
            Err(e) => {
                assert_eq!(e, SolveError::Unsolvable);
                g.reset();
                assert_eq!(MazeSolver::with_maze(&mut g).solve_maze_bfs().unwrap_err(), SolveError::Unsolvable);
                continue;
            }
        };
        g.reset();
        let bfs = MazeSolver::with_maze(&mut g).solve_maze_bfs().unwrap();
        assert_well_formed(&g, &dfs);
        assert_well_formed(&g, &bfs);
        assert!(bfs.len() <= dfs.len(), "bfs {} > dfs {}\n{}", bfs.len(), dfs.len(), g.to_text());
        // open grid corner to corner is the Manhattan distance, walls only add
        assert!(bfs.len() > g.rows() + g.cols() - 2);
        solved += 1;
    }
    assert!(solved > 0);
}

#[test]
fn report_counts_explored_cells() {
    let mut g = maze();
    let report = MazeSolver::with_maze(&mut g).solve_with_report(Algorithm::Bfs).unwrap();
    assert_eq!(report.algorithm, Algorithm::Bfs);
    assert_eq!(report.edges(), report.path.len() - 1);
    assert_eq!(report.explored, g.explored_count());
    assert!(report.frontier_peak >= 1);
    assert!(!g.end_cell().is_explored());
}

#[test]
fn render_marks_only_path_cells() {
    let mut g = Grid::from_rows(&["S.#", "#..", "#.E"]).unwrap();
    let path = MazeSolver::with_maze(&mut g).solve_maze_bfs().unwrap();
    assert_eq!(g.render_solution(&path), "S*#\n#*.\n#*E");
    assert_eq!(mazer::grid::format_path(&path), "(0,0) -> (0,1) -> (1,1) -> (2,1) -> (2,2)");
}

#[test]
fn parse_accepts_alternate_markers_and_header() {
    let g = Grid::parse("2 3\r\nA #\r\n..B\r\n").unwrap();
    assert_eq!((g.rows(), g.cols()), (2, 3));
    assert_eq!(g.start(), Pos::new(0, 0));
    assert_eq!(g.end(), Pos::new(1, 2));
    assert!(g.cell(0, 1).is_passable());
    assert!(g.cell(0, 2).is_wall());
}

#[test]
fn parse_rejects_malformed_input() {
    assert_eq!(Grid::parse("").unwrap_err(), ParseError::Empty);
    assert_eq!(Grid::parse("S..\n.E").unwrap_err(), ParseError::Ragged { row: 1, expected: 3, found: 2 });
    assert_eq!(Grid::parse("S.x\n..E").unwrap_err(), ParseError::InvalidChar { row: 0, col: 2, ch: 'x' });
    assert_eq!(Grid::parse("...\n..E").unwrap_err(), ParseError::MissingStart);
    assert_eq!(Grid::parse("S..\n...").unwrap_err(), ParseError::MissingEnd);
    assert_eq!(
        Grid::parse("S.S\n..E").unwrap_err(),
        ParseError::DuplicateStart { first: Pos::new(0, 0), second: Pos::new(0, 2) }
    );
    assert_eq!(
        Grid::parse("S.E\n..B").unwrap_err(),
        ParseError::DuplicateEnd { first: Pos::new(0, 2), second: Pos::new(1, 2) }
    );
}

#[test]
fn from_file_reports_path() {
    let err = Grid::from_file("does/not/exist.txt").unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.txt"));
}

#[test]
fn sample_maze_file_solves() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/mazes/maze3.txt");
    let mut g = Grid::from_file(path).unwrap();
    assert_eq!((g.rows(), g.cols()), (7, 12));
    let dfs = MazeSolver::with_maze(&mut g).solve_maze_dfs().unwrap();
    g.reset();
    let bfs = MazeSolver::with_maze(&mut g).solve_maze_bfs().unwrap();
    assert_well_formed(&g, &bfs);
    assert_well_formed(&g, &dfs);
    assert!(bfs.len() <= dfs.len());
}

#[test]
fn solve_logged_writes_devlogs() {
    let dir = std::env::temp_dir().join(format!("mazer-devlogs-test-{}", std::process::id()));
    let mut logger = mazer::logger::DevLogger::new(&dir, false, false, 0).unwrap().quiet();

    let mut g = maze();
    let report = MazeSolver::with_maze(&mut g).solve_logged(Algorithm::Dfs, &mut logger).unwrap();
    assert_eq!(report.path.last().map(Cell::pos), Some(g.end()));

    let mut walled = Grid::from_rows(&["S#E"]).unwrap();
    let err = MazeSolver::with_maze(&mut walled).solve_logged(Algorithm::Bfs, &mut logger).unwrap_err();
    assert_eq!(err.downcast_ref::<SolveError>(), Some(&SolveError::Unsolvable));

    assert_eq!(logger.written(), 2);
    let failed = std::fs::read_to_string(dir.join("devlog(2).txt")).unwrap();
    assert!(failed.contains("BFS failed"));
    std::fs::remove_dir_all(&dir).ok();
}
