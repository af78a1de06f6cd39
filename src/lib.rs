pub mod error;
pub mod grid;
pub mod logger;
pub mod solver;
pub mod utils;

pub use error::{ParseError, SolveError};
pub use grid::{Cell, Grid, Pos};
pub use solver::{Algorithm, MazeSolver, SearchReport};
