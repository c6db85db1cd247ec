use anyhow::Context;
use thiserror::Error;
use tracing::warn;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

pub mod logging;
pub mod walk;

pub use walk::{walk, Report, Step, Termination, Walk};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("empty puzzle input")]
    EmptyInput,
    #[error("bad row length: row {row} has {len} cells, expected {expected}")]
    InvalidInputShape { row: usize, len: usize, expected: usize },
    #[error("unknown cell character '{ch}' at ({x}, {y})")]
    UnknownCell { ch: char, x: usize, y: usize },
    #[error("no guard marker (one of ^ > v <) in the grid")]
    GuardNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Floor,
    Obstacle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub fn of_char(c : char) -> Option<Self> {
        match c {
            '^' => Some(Heading::Up),
            '>' => Some(Heading::Right),
            'v' => Some(Heading::Down),
            '<' => Some(Heading::Left),
            _ => None
        }
    }

    pub fn marker(self) -> char {
        match self {
            Heading::Up => '^',
            Heading::Right => '>',
            Heading::Down => 'v',
            Heading::Left => '<',
        }
    }

    /// 90 degrees clockwise.
    pub fn turn_right(self) -> Self {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// (0,0) is upper left; x is the column, y the row.
#[derive(Debug, Clone, Copy, PartialEq, Hash, PartialOrd, Ord, Default, Eq)]
pub struct Coords {
    pub x : usize,
    pub y : usize,
}

impl Coords {
    pub fn new(x : usize, y : usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guard {
    pub pos: Coords,
    pub heading: Heading,
}

/// The static part of the puzzle. Never mutated by a walk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<Vec<Item>>,
    width: usize,
}

impl std::ops::Index<Coords> for Grid {
    type Output = Item;

    fn index(&self, index: Coords) -> &Item {
        &self.cells[index.y][index.x]
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in &self.cells {
            for item in row {
                match item {
                    Item::Floor => write!(f, ".")?,
                    Item::Obstacle => write!(f, "#")?,
                }
            }
            write!(f, "\n")?;
        }
        Ok(())
    }
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, c: Coords) -> bool {
        c.x < self.width() && c.y < self.height()
    }

    pub fn is_obstacle(&self, c: Coords) -> bool {
        self.contains(c) && self[c] == Item::Obstacle
    }

    pub fn move_is_in_bounds(&self, from: Coords, heading: Heading) -> bool {
        match heading {
            Heading::Left => from.x > 0,
            Heading::Right => from.x + 1 < self.width(),
            Heading::Up => from.y > 0,
            Heading::Down => from.y + 1 < self.height(),
        }
    }

    /// The neighbour of `from` in the direction of `heading`, or None
    /// if that would leave the grid. Obstacles are not checked here.
    pub fn step_from(&self, from: Coords, heading: Heading) -> Option<Coords> {
        if !self.move_is_in_bounds(from, heading) {
            return None;
        }
        let to = match heading {
            Heading::Left => Coords { x: from.x - 1, ..from },
            Heading::Right => Coords { x: from.x + 1, ..from },
            Heading::Up => Coords { y: from.y - 1, ..from },
            Heading::Down => Coords { y: from.y + 1, ..from },
        };
        Some(to)
    }
}

/// A grid with the guard and its trail drawn over it.
pub struct Frame<'a> {
    grid: &'a Grid,
    visited: &'a BTreeSet<Coords>,
    guard: Guard,
}

impl<'a> Frame<'a> {
    pub fn new(grid: &'a Grid, visited: &'a BTreeSet<Coords>, guard: Guard) -> Self {
        Self { grid, visited, guard }
    }
}

impl std::fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let c = Coords::new(x, y);
                if c == self.guard.pos {
                    write!(f, "{}", self.guard.heading)?;
                } else if self.grid[c] == Item::Obstacle {
                    write!(f, "#")?;
                } else if self.visited.contains(&c) {
                    write!(f, "X")?;
                } else {
                    write!(f, ".")?;
                }
            }
            write!(f, "\n")?;
        }
        Ok(())
    }
}

/// 'X' is what a rendered frame uses for visited floor, so frames
/// can be read back in.
pub fn parse_cell(x: char) -> Option<Item> {
    match x {
        '.' | 'X' => Some(Item::Floor),
        '#' => Some(Item::Obstacle),
        _ => None,
    }
}

/// Parses a puzzle into its grid and the guard's starting state.
///
/// The first heading marker in reading order is the guard; the cell
/// under it is floor.
pub fn parse_grid(puzzle: &str) -> Result<(Grid, Guard), GridError> {
    let puzzle = puzzle.trim();
    if puzzle.is_empty() {
        return Err(GridError::EmptyInput);
    }

    let mut cells = vec![];
    let mut guard: Option<Guard> = None;
    let mut width = 0;
    for (y, line) in puzzle.lines().enumerate() {
        let line = line.trim();
        let len = line.chars().count();
        if y == 0 {
            width = len;
        } else if len != width {
            return Err(GridError::InvalidInputShape { row: y, len, expected: width });
        }

        let mut row = Vec::with_capacity(len);
        for (x, c) in line.chars().enumerate() {
            let item = match Heading::of_char(c) {
                Some(heading) => {
                    match guard {
                        None => guard = Some(Guard { pos: Coords::new(x, y), heading }),
                        Some(_) => warn!(x, y, "ignoring extra guard marker '{}'", c),
                    }
                    Item::Floor
                }
                None => parse_cell(c).ok_or(GridError::UnknownCell { ch: c, x, y })?,
            };
            row.push(item);
        }
        cells.push(row);
    }

    let guard = guard.ok_or(GridError::GuardNotFound)?;
    Ok((Grid { cells, width }, guard))
}

/// Reads the whole puzzle from `path`, or from stdin when there is none.
pub fn read_puzzle(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading puzzle from {}", path.display())),
        None => {
            let mut input = String::new();
            let stdin = std::io::stdin();
            let mut handle = stdin.lock();
            handle.read_to_string(&mut input).context("reading puzzle from stdin")?;
            Ok(input)
        }
    }
}

#[cfg(test)]
pub(crate) const SAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

#[test]
fn test_turn_right_cycles() {
    let mut h = Heading::Up;
    let mut seen = vec![];
    for _ in 0..4 {
        seen.push(h.marker());
        h = h.turn_right();
    }
    assert_eq!(seen, vec!['^', '>', 'v', '<']);
    assert_eq!(h, Heading::Up);
}

#[test]
fn test_parse_sample() {
    let (grid, guard) = parse_grid(SAMPLE).unwrap();
    assert_eq!(grid.width(), 10);
    assert_eq!(grid.height(), 10);
    assert_eq!(guard, Guard { pos: Coords::new(4, 6), heading: Heading::Up });
    assert_eq!(grid[Coords::new(4, 6)], Item::Floor);
    assert_eq!(grid[Coords::new(4, 0)], Item::Obstacle);
    assert_eq!(grid[Coords::new(0, 8)], Item::Obstacle);
    assert_eq!(grid[Coords::new(0, 0)], Item::Floor);
}

#[test]
fn test_parse_trims_lines() {
    let (grid, guard) = parse_grid("\n  .#.\n  .^.  \n...\n\n").unwrap();
    assert_eq!((grid.width(), grid.height()), (3, 3));
    assert_eq!(guard.pos, Coords::new(1, 1));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_grid("  \n\n"), Err(GridError::EmptyInput));
    assert_eq!(parse_grid("...\n.#.\n"), Err(GridError::GuardNotFound));
    assert_eq!(
        parse_grid("...\n.^\n..."),
        Err(GridError::InvalidInputShape { row: 1, len: 2, expected: 3 })
    );
    assert_eq!(
        parse_grid(".^.\n.?."),
        Err(GridError::UnknownCell { ch: '?', x: 1, y: 1 })
    );
}

#[test]
fn test_first_guard_wins() {
    let (grid, guard) = parse_grid("..>\n<..").unwrap();
    assert_eq!(guard, Guard { pos: Coords::new(2, 0), heading: Heading::Right });
    assert_eq!(grid[Coords::new(0, 1)], Item::Floor);
}

#[test]
fn test_step_from_edges() {
    let (grid, _) = parse_grid("^.\n..").unwrap();
    let corner = Coords::new(0, 0);
    assert_eq!(grid.step_from(corner, Heading::Up), None);
    assert_eq!(grid.step_from(corner, Heading::Left), None);
    assert_eq!(grid.step_from(corner, Heading::Right), Some(Coords::new(1, 0)));
    assert_eq!(grid.step_from(corner, Heading::Down), Some(Coords::new(0, 1)));
    assert_eq!(grid.step_from(Coords::new(1, 1), Heading::Right), None);
    assert_eq!(grid.step_from(Coords::new(1, 1), Heading::Down), None);
}

#[test]
fn test_frame_reads_back() {
    let (grid, guard) = parse_grid(".#.\n.^.\n...").unwrap();
    let visited = BTreeSet::from([Coords::new(1, 2), guard.pos]);
    let frame = Frame::new(&grid, &visited, guard).to_string();
    assert_eq!(frame, ".#.\n.^.\n.X.\n");
    let (again, guard_again) = parse_grid(&frame).unwrap();
    assert_eq!(again, grid);
    assert_eq!(guard_again, guard);
    assert_eq!(grid.to_string(), ".#.\n...\n...\n");
}
