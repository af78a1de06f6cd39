use thiserror::Error;

use crate::grid::Pos;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("maze text contains no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("invalid char {ch:?} at r{row},c{col}")]
    InvalidChar { row: usize, col: usize, ch: char },
    #[error("maze has no start marker")]
    MissingStart,
    #[error("maze has no end marker")]
    MissingEnd,
    #[error("second start marker at {second} (first at {first})")]
    DuplicateStart { first: Pos, second: Pos },
    #[error("second end marker at {second} (first at {first})")]
    DuplicateEnd { first: Pos, second: Pos },
    #[error("{what} cell {pos} is outside the grid or a wall")]
    BadEndpoint { what: &'static str, pos: Pos },
    #[error("bad header line: {0:?}")]
    BadHeader(String),
    #[error("header says {expected:?} (rows, cols) but body is {found:?}")]
    HeaderMismatch { expected: (usize, usize), found: (usize, usize) },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("no maze attached to solver")]
    NoMaze,
    #[error("maze is unsolvable: frontier exhausted before reaching the end cell")]
    Unsolvable,
    #[error("parent chain from the end cell exceeds {limit} cells; was the maze reset?")]
    CorruptParents { limit: usize },
}
