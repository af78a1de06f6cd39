use std::collections::VecDeque;

use crate::grid::Pos;

/// Neighbor directions in the order every search expands them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction { North, East, South, West }

impl Direction {
    pub const ORDER: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Signed neighbor coordinates, possibly out of bounds.
    pub fn step(self, p: Pos) -> (isize, isize) {
        let (dr, dc) = self.offset();
        (p.r as isize + dr, p.c as isize + dc)
    }
}

pub mod frontier {
    use super::*;

    /// Working set of cells a search has discovered but not yet expanded.
    /// `peek` and `pop` agree on which end is "next".
    pub trait Frontier {
        fn with_start(start: Pos) -> Self;
        fn push(&mut self, p: Pos);
        fn peek(&self) -> Option<Pos>;
        fn pop(&mut self) -> Option<Pos>;
        fn len(&self) -> usize;
        fn is_empty(&self) -> bool { self.len() == 0 }
    }

    /// LIFO, drives depth-first search.
    #[derive(Debug, Default)]
    pub struct Stack(Vec<Pos>);

    impl Frontier for Stack {
        fn with_start(start: Pos) -> Self { Self(vec![start]) }
        fn push(&mut self, p: Pos) { self.0.push(p) }
        fn peek(&self) -> Option<Pos> { self.0.last().copied() }
        fn pop(&mut self) -> Option<Pos> { self.0.pop() }
        fn len(&self) -> usize { self.0.len() }
    }

    /// FIFO, drives breadth-first search.
    #[derive(Debug, Default)]
    pub struct Queue(VecDeque<Pos>);

    impl Frontier for Queue {
        fn with_start(start: Pos) -> Self { Self(VecDeque::from([start])) }
        fn push(&mut self, p: Pos) { self.0.push_back(p) }
        fn peek(&self) -> Option<Pos> { self.0.front().copied() }
        fn pop(&mut self) -> Option<Pos> { self.0.pop_front() }
        fn len(&self) -> usize { self.0.len() }
    }
}
