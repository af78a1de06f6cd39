use std::fmt;

use anyhow::Result;
use log::{debug, info, trace};

use crate::{
    error::SolveError,
    grid::{format_path, Cell, Grid, Pos},
    logger::DevLogger,
    utils::{frontier::{Frontier, Queue, Stack}, Direction},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Algorithm { Dfs, Bfs }

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Algorithm::Dfs => "DFS", Algorithm::Bfs => "BFS" })
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchReport {
    pub algorithm: Algorithm,
    /// start -> end
    pub path: Vec<Cell>,
    /// cells marked explored when the search stopped
    pub explored: usize,
    pub frontier_peak: usize,
}

impl SearchReport {
    pub fn edges(&self) -> usize { self.path.len().saturating_sub(1) }
}

/// Runs searches against one attached maze. The solver never resets the
/// maze; call [`Grid::reset`] between runs.
#[derive(Default)]
pub struct MazeSolver<'m> { maze: Option<&'m mut Grid> }

impl<'m> MazeSolver<'m> {
    pub fn new() -> Self { Self { maze: None } }
    pub fn with_maze(maze: &'m mut Grid) -> Self { Self { maze: Some(maze) } }

    /// Replaces any previously attached maze.
    pub fn set_maze(&mut self, maze: &'m mut Grid) { self.maze = Some(maze); }

    pub fn maze(&self) -> Option<&Grid> { self.maze.as_deref() }
    pub fn maze_mut(&mut self) -> Option<&mut Grid> { self.maze.as_deref_mut() }

    pub fn solve_maze_dfs(&mut self) -> Result<Vec<Cell>, SolveError> { self.solve(Algorithm::Dfs) }
    pub fn solve_maze_bfs(&mut self) -> Result<Vec<Cell>, SolveError> { self.solve(Algorithm::Bfs) }

    pub fn solve(&mut self, algorithm: Algorithm) -> Result<Vec<Cell>, SolveError> {
        Ok(self.solve_with_report(algorithm)?.path)
    }

    pub fn solve_with_report(&mut self, algorithm: Algorithm) -> Result<SearchReport, SolveError> {
        match algorithm {
            Algorithm::Dfs => self.search::<Stack>(algorithm),
            Algorithm::Bfs => self.search::<Queue>(algorithm),
        }
    }

    /// Solves and writes a devlog of the outcome, including the explored
    /// region when the maze turns out unsolvable.
    pub fn solve_logged(&mut self, algorithm: Algorithm, logger: &mut DevLogger) -> Result<SearchReport> {
        let outcome = self.solve_with_report(algorithm);
        let grid = self.maze().ok_or(SolveError::NoMaze)?;
        match &outcome {
            Ok(report) => logger.log(
                &format!("{} solution", algorithm),
                &format!(
                    "{}\nlength: {} cells ({} moves)\nexplored: {}\nfrontier peak: {}\npath: {}",
                    grid.to_pretty_string(), report.path.len(), report.edges(), report.explored,
                    report.frontier_peak, format_path(&report.path),
                ),
            )?,
            Err(e) => logger.log(&format!("{} failed", algorithm), &format!("{}\n{}", grid.to_pretty_string(), e))?,
        }
        Ok(outcome?)
    }

    /// Walks parent links back from the end cell of the attached maze.
    pub fn get_solution(&self) -> Result<Vec<Cell>, SolveError> {
        solution(self.maze().ok_or(SolveError::NoMaze)?)
    }

    fn search<F: Frontier>(&mut self, algorithm: Algorithm) -> Result<SearchReport, SolveError> {
        let grid = self.maze.as_deref_mut().ok_or(SolveError::NoMaze)?;
        let (start, end) = (grid.start(), grid.end());
        let mut frontier = F::with_start(start);
        let mut frontier_peak = frontier.len();
        let mut current: Option<Pos> = None;

        // look at the next cell before taking it; the end cell is never popped
        while frontier.peek().ok_or(SolveError::Unsolvable)? != end {
            let Some(cur) = frontier.pop() else { return Err(SolveError::Unsolvable) };
            grid.set_explored(cur, true);
            for dir in Direction::ORDER {
                let (r, c) = dir.step(cur);
                if grid.is_valid_cell(r, c) {
                    let next = Pos::new(r as usize, c as usize);
                    // a later push overwrites an earlier one
                    grid.set_parent(next, Some(cur));
                    frontier.push(next);
                }
            }
            trace!("{} expanded {}, frontier {}", algorithm, cur, frontier.len());
            frontier_peak = frontier_peak.max(frontier.len());
            current = Some(cur);
        }

        link_goal(grid, current);
        let path = solution(grid)?;
        let explored = grid.explored_count();
        info!("{} reached {} in {} moves, {} cells explored", algorithm, end, path.len().saturating_sub(1), explored);
        Ok(SearchReport { algorithm, path, explored, frontier_peak })
    }
}

/// Points the end cell at the last expanded cell. When that cell is not a
/// neighbor of the end (it was a dead end popped off above the end cell) the
/// parent recorded at discovery time is kept.
fn link_goal(grid: &mut Grid, last: Option<Pos>) {
    let end = grid.end();
    match last {
        Some(last) if last.is_adjacent(end) => grid.set_parent(end, Some(last)),
        Some(last) => debug!("last expanded {} not adjacent to end {}, keeping {:?}", last, end, grid.end_cell().parent()),
        // start == end, nothing was expanded
        None => grid.set_parent(end, None),
    }
}

fn solution(grid: &Grid) -> Result<Vec<Cell>, SolveError> {
    let limit = grid.len();
    let mut path = Vec::new();
    let mut at = Some(grid.end());
    while let Some(p) = at {
        if path.len() == limit { return Err(SolveError::CorruptParents { limit }); }
        let cell = *grid.cell(p.r, p.c);
        path.push(cell);
        at = cell.parent();
    }
    path.reverse();
    Ok(path)
}
