//! The guard's patrol.
//!
//! Each step the guard looks at the cell ahead. Leaving the grid ends the
//! walk. An obstacle ahead makes it turn right once, in place; if the cell
//! ahead after that turn is also an obstacle the guard is stuck. Otherwise it
//! moves one cell.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::{Coords, Frame, Grid, Guard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The next cell was off the grid.
    Exited,
    /// Obstacle ahead, and another one after turning right.
    Blocked,
    /// The guard is back in a position and heading it has already had.
    Looped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved { to: Coords, turned: bool },
    Done(Termination),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// single-cell moves; turning in place is not a move
    pub steps: usize,
    /// cells the guard has stood on, the start cell included
    pub distinct_places: usize,
    pub termination: Termination,
    pub guard: Guard,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}\n{}", self.steps, self.distinct_places)
    }
}

#[derive(Debug, Clone)]
pub struct Walk<'g> {
    grid: &'g Grid,
    guard: Guard,
    steps: usize,
    visited: BTreeSet<Coords>,

    /// every (position, heading) the guard has been in after a move
    seen: BTreeSet<Guard>,
    done: Option<Termination>,
}

impl<'g> Walk<'g> {
    pub fn new(grid: &'g Grid, guard: Guard) -> Self {
        Self {
            grid,
            guard,
            steps: 0,
            visited: BTreeSet::from([guard.pos]),
            seen: BTreeSet::from([guard]),
            done: None,
        }
    }

    pub fn guard(&self) -> Guard {
        self.guard
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn distinct_places(&self) -> usize {
        self.visited.len()
    }

    pub fn visited(&self) -> &BTreeSet<Coords> {
        &self.visited
    }

    pub fn termination(&self) -> Option<Termination> {
        self.done
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame::new(self.grid, &self.visited, self.guard)
    }

    /// Advances the guard by one move. Once the walk has ended this keeps
    /// returning the same `Step::Done`.
    pub fn step(&mut self) -> Step {
        if let Some(termination) = self.done {
            return Step::Done(termination);
        }
        match self.next_cell() {
            Ok((to, turned)) => {
                self.guard.pos = to;
                self.steps += 1;
                self.visited.insert(to);
                trace!(x = to.x, y = to.y, heading = %self.guard.heading, steps = self.steps, "moved");
                if !self.seen.insert(self.guard) {
                    debug!(x = to.x, y = to.y, steps = self.steps, "guard is looping");
                    self.done = Some(Termination::Looped);
                }
                Step::Moved { to, turned }
            }
            Err(termination) => {
                debug!(?termination, steps = self.steps, places = self.visited.len(), "walk ended");
                self.done = Some(termination);
                Step::Done(termination)
            }
        }
    }

    // Err is the terminal state reached instead of a move. Turns at most once.
    fn next_cell(&mut self) -> Result<(Coords, bool), Termination> {
        let Guard { pos, heading } = self.guard;
        let ahead = self.grid.step_from(pos, heading).ok_or(Termination::Exited)?;
        if !self.grid.is_obstacle(ahead) {
            return Ok((ahead, false));
        }

        self.guard.heading = heading.turn_right();
        debug!(x = pos.x, y = pos.y, heading = %self.guard.heading, "obstacle ahead, turned");
        let ahead = self.grid.step_from(pos, self.guard.heading).ok_or(Termination::Exited)?;
        if self.grid.is_obstacle(ahead) {
            return Err(Termination::Blocked);
        }
        Ok((ahead, true))
    }

    /// Steps until the walk ends.
    pub fn run(&mut self) -> Report {
        loop {
            if let Step::Done(termination) = self.step() {
                return Report {
                    steps: self.steps,
                    distinct_places: self.visited.len(),
                    termination,
                    guard: self.guard,
                };
            }
        }
    }
}

pub fn walk(grid: &Grid, guard: Guard) -> Report {
    Walk::new(grid, guard).run()
}

#[cfg(test)]
use crate::{parse_grid, Heading};

#[cfg(test)]
fn run_puzzle(puzzle: &str) -> Report {
    let (grid, guard) = parse_grid(puzzle).unwrap();
    walk(&grid, guard)
}

#[test]
fn test_sample_patrol() {
    let report = run_puzzle(crate::SAMPLE);
    assert_eq!(report.steps, 44);
    assert_eq!(report.distinct_places, 41);
    assert_eq!(report.termination, Termination::Exited);
    assert_eq!(report.guard, Guard { pos: Coords::new(7, 9), heading: Heading::Down });
    assert_eq!(report.to_string(), "44\n41");
}

#[test]
fn test_one_step_to_the_edge() {
    let report = run_puzzle(".\n^");
    assert_eq!(report.steps, 1);
    assert_eq!(report.distinct_places, 2);
    assert_eq!(report.termination, Termination::Exited);
}

#[test]
fn test_exit_from_edge_is_not_a_step() {
    let report = run_puzzle(".^.\n...");
    assert_eq!(report.steps, 0);
    assert_eq!(report.distinct_places, 1);
    assert_eq!(report.termination, Termination::Exited);
}

#[test]
fn test_turn_then_exit_right() {
    let (grid, guard) = parse_grid(".#.\n.^.\n...").unwrap();
    let mut w = Walk::new(&grid, guard);
    assert_eq!(w.step(), Step::Moved { to: Coords::new(2, 1), turned: true });
    assert_eq!(w.guard().heading, Heading::Right);
    assert_eq!(w.step(), Step::Done(Termination::Exited));
    assert_eq!(w.steps(), 1);
    assert_eq!(w.distinct_places(), 2);
    assert_eq!(w.frame().to_string(), ".#.\n.X>\n...\n");
}

#[test]
fn test_blocked_in_place() {
    let report = run_puzzle("#.\n^#");
    assert_eq!(report.steps, 0);
    assert_eq!(report.distinct_places, 1);
    assert_eq!(report.termination, Termination::Blocked);
    assert_eq!(report.guard.heading, Heading::Right);
}

#[test]
fn test_blocked_after_moving() {
    let report = run_puzzle("#..\n.#.\n^..");
    assert_eq!(report.steps, 1);
    assert_eq!(report.distinct_places, 2);
    assert_eq!(report.termination, Termination::Blocked);
    assert_eq!(report.guard.pos, Coords::new(0, 1));
}

#[test]
fn test_turn_toward_edge_exits() {
    // turning right at the right edge points off the grid
    let report = run_puzzle("#\n^");
    assert_eq!(report.steps, 0);
    assert_eq!(report.termination, Termination::Exited);
}

#[test]
fn test_closed_patrol_loops() {
    let report = run_puzzle(".#...\n.^..#\n#....\n...#.");
    assert_eq!(report.steps, 6);
    assert_eq!(report.distinct_places, 6);
    assert_eq!(report.termination, Termination::Looped);
    assert_eq!(report.guard, Guard { pos: Coords::new(1, 1), heading: Heading::Up });
}

#[test]
fn test_step_after_end_changes_nothing() {
    let (grid, guard) = parse_grid("#.\n^#").unwrap();
    let mut w = Walk::new(&grid, guard);
    let first = w.run();
    assert_eq!(w.step(), Step::Done(Termination::Blocked));
    assert_eq!(w.run(), first);
    assert_eq!(w.termination(), Some(Termination::Blocked));
}

#[test]
fn test_revisits_count_once() {
    // the sample patrol crosses its own trail
    let (grid, guard) = parse_grid(crate::SAMPLE).unwrap();
    let mut w = Walk::new(&grid, guard);
    let mut fresh = 1;
    let mut last = w.visited().clone();
    while let Step::Moved { to, .. } = w.step() {
        if !last.contains(&to) {
            fresh += 1;
        }
        last = w.visited().clone();
    }
    assert_eq!(fresh, w.distinct_places());
    assert!(w.steps() > w.distinct_places());
}
