use std::{collections::HashSet, fmt, fs, path::Path};

use anyhow::{Context, Result};
use colored::*;
use itertools::Itertools;
use log::debug;

use crate::error::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pos { pub r: usize, pub c: usize }

impl Pos {
    pub fn new(r: usize, c: usize) -> Self { Self { r, c } }

    /// True when `other` is one step away horizontally or vertically.
    pub fn is_adjacent(self, other: Pos) -> bool { self.r.abs_diff(other.r) + self.c.abs_diff(other.c) == 1 }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "({},{})", self.r, self.c) }
}

/// One grid position. Position and passability are fixed; `explored` and
/// `parent` are per-run bookkeeping owned by whichever search is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    pos: Pos,
    passable: bool,
    explored: bool,
    // back-reference into the same grid, never ownership
    parent: Option<Pos>,
}

impl Cell {
    fn new(pos: Pos, passable: bool) -> Self { Self { pos, passable, explored: false, parent: None } }

    pub fn row(&self) -> usize { self.pos.r }
    pub fn col(&self) -> usize { self.pos.c }
    pub fn pos(&self) -> Pos { self.pos }
    pub fn is_passable(&self) -> bool { self.passable }
    pub fn is_wall(&self) -> bool { !self.passable }
    pub fn is_explored(&self) -> bool { self.explored }
    pub fn parent(&self) -> Option<Pos> { self.parent }
}

#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    // row-major, cells[r * cols + c].pos == (r, c)
    cells: Vec<Cell>,
    start: Pos,
    end: Pos,
}

impl Grid {
    /// Builds a grid from a rectangular passability table.
    pub fn new(passable: Vec<Vec<bool>>, start: Pos, end: Pos) -> Result<Self, ParseError> {
        let rows = passable.len();
        let cols = passable.first().map(|row| row.len()).unwrap_or(0);
        if rows == 0 || cols == 0 { return Err(ParseError::Empty); }
        if let Some((row, found)) = passable.iter().map(|r| r.len()).enumerate().find(|&(_, n)| n != cols) {
            return Err(ParseError::Ragged { row, expected: cols, found });
        }
        let cells = passable.into_iter().enumerate()
            .flat_map(|(r, row)| row.into_iter().enumerate().map(move |(c, open)| Cell::new(Pos { r, c }, open)))
            .collect_vec();
        let grid = Self { rows, cols, cells, start, end };
        for (what, pos) in [("start", start), ("end", end)] {
            if !grid.in_bounds(pos) || grid.cell(pos.r, pos.c).is_wall() {
                return Err(ParseError::BadEndpoint { what, pos });
            }
        }
        Ok(grid)
    }

    /// Parses maze text: an optional `rows cols` header line, then one line
    /// per row with `#` for walls, `.` or space for open cells, `S`/`A` for
    /// the start and `E`/`B` for the end.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = text.lines().map(|l| l.trim_end_matches('\r')).filter(|l| !l.is_empty()).peekable();
        let header = match lines.peek() {
            Some(l) if l.trim_start().starts_with(|ch: char| ch.is_ascii_digit()) => {
                let h = parse_header(l)?;
                lines.next();
                Some(h)
            }
            _ => None,
        };
        let body = lines.collect_vec();
        if body.is_empty() { return Err(ParseError::Empty); }

        let cols = body[0].chars().count();
        let mut passable = Vec::with_capacity(body.len());
        let (mut start, mut end) = (None, None);
        for (r, line) in body.iter().enumerate() {
            let found = line.chars().count();
            if found != cols { return Err(ParseError::Ragged { row: r, expected: cols, found }); }
            let mut row = Vec::with_capacity(cols);
            for (c, ch) in line.chars().enumerate() {
                let here = Pos { r, c };
                match ch {
                    '#' => row.push(false),
                    '.' | ' ' => row.push(true),
                    'S' | 'A' => {
                        if let Some(first) = start { return Err(ParseError::DuplicateStart { first, second: here }); }
                        start = Some(here);
                        row.push(true);
                    }
                    'E' | 'B' => {
                        if let Some(first) = end { return Err(ParseError::DuplicateEnd { first, second: here }); }
                        end = Some(here);
                        row.push(true);
                    }
                    _ => return Err(ParseError::InvalidChar { row: r, col: c, ch }),
                }
            }
            passable.push(row);
        }

        let found = (body.len(), cols);
        if let Some(expected) = header {
            if expected != found { return Err(ParseError::HeaderMismatch { expected, found }); }
        }
        let start = start.ok_or(ParseError::MissingStart)?;
        let end = end.ok_or(ParseError::MissingEnd)?;
        debug!("parsed {}x{} maze, start {} end {}", found.0, found.1, start, end);
        Self::new(passable, start, end)
    }

    pub fn from_rows(rows: &[&str]) -> Result<Self, ParseError> { Self::parse(&rows.join("\n")) }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing maze {}", path.display()))
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn start(&self) -> Pos { self.start }
    pub fn end(&self) -> Pos { self.end }
    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    fn in_bounds(&self, p: Pos) -> bool { p.r < self.rows && p.c < self.cols }
    fn idx(&self, p: Pos) -> usize { p.r * self.cols + p.c }

    /// In bounds, passable and not yet explored. This is the only check a
    /// search makes before discovering a neighbor.
    pub fn is_valid_cell(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 { return false; }
        match self.get(row as usize, col as usize) {
            Some(cell) => cell.passable && !cell.explored,
            None => false,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        let p = Pos { r: row, c: col };
        if self.in_bounds(p) { Some(&self.cells[self.idx(p)]) } else { None }
    }

    /// Panics when (row, col) is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        assert!(row < self.rows && col < self.cols, "cell r{row},c{col} outside {}x{} grid", self.rows, self.cols);
        &self.cells[row * self.cols + col]
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        assert!(row < self.rows && col < self.cols, "cell r{row},c{col} outside {}x{} grid", self.rows, self.cols);
        &mut self.cells[row * self.cols + col]
    }

    pub fn start_cell(&self) -> &Cell { self.cell(self.start.r, self.start.c) }
    pub fn end_cell(&self) -> &Cell { self.cell(self.end.r, self.end.c) }

    pub fn set_explored(&mut self, p: Pos, explored: bool) { self.cell_mut(p.r, p.c).explored = explored; }
    pub fn set_parent(&mut self, p: Pos, parent: Option<Pos>) { self.cell_mut(p.r, p.c).parent = parent; }

    pub fn explored_count(&self) -> usize { self.iterate_cells().filter(|c| c.explored).count() }

    /// Clears search bookkeeping on every cell. Call between runs on the
    /// same grid; searches never do it themselves.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.explored = false;
            cell.parent = None;
        }
    }

    pub fn iterate_cells(&self) -> impl Iterator<Item = &Cell> { self.cells.iter() }

    fn glyph(&self, cell: &Cell, on_path: bool) -> char {
        if cell.pos == self.start { 'S' }
        else if cell.pos == self.end { 'E' }
        else if cell.is_wall() { '#' }
        else if on_path { '*' }
        else { '.' }
    }

    /// The maze body in the same text format `parse` reads.
    pub fn to_text(&self) -> String { self.render_solution(&[]) }

    pub fn render_solution(&self, path: &[Cell]) -> String {
        let on_path: HashSet<Pos> = path.iter().map(|c| c.pos).collect();
        self.cells.chunks(self.cols)
            .map(|row| row.iter().map(|cell| self.glyph(cell, on_path.contains(&cell.pos))).collect::<String>())
            .join("\n")
    }

    pub fn render_solution_colored(&self, path: &[Cell]) -> String {
        let on_path: HashSet<Pos> = path.iter().map(|c| c.pos).collect();
        self.cells.chunks(self.cols)
            .map(|row| row.iter().map(|cell| {
                let g = self.glyph(cell, on_path.contains(&cell.pos)).to_string();
                match g.as_str() {
                    "S" => g.green().bold().to_string(),
                    "E" => g.red().bold().to_string(),
                    "*" => g.yellow().bold().to_string(),
                    "#" => g.dimmed().to_string(),
                    _ => g,
                }
            }).collect::<String>())
            .join("\n")
    }

    /// Bordered view with explored cells marked, for devlogs.
    pub fn to_pretty_string(&self) -> String {
        let mut s = String::new();
        let border = format!("+{}+\n", "-".repeat(self.cols));
        s.push_str(&border);
        for row in self.cells.chunks(self.cols) {
            s.push('|');
            for cell in row {
                let g = self.glyph(cell, false);
                s.push(if g == '.' && cell.explored { 'o' } else if g == '.' { ' ' } else { g });
            }
            s.push_str("|\n");
        }
        s.push_str(&border);
        s
    }
}

fn parse_header(line: &str) -> Result<(usize, usize), ParseError> {
    let bad = || ParseError::BadHeader(line.to_string());
    let nums = line.split_whitespace().map(|t| t.parse::<usize>().map_err(|_| bad())).collect::<Result<Vec<_>, _>>()?;
    match nums.as_slice() {
        &[rows, cols] => Ok((rows, cols)),
        _ => Err(bad()),
    }
}

/// `(r,c) -> (r,c) -> ...`
pub fn format_path(path: &[Cell]) -> String { path.iter().map(|c| c.pos).join(" -> ") }
