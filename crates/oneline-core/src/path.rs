//! The live path: a grow-from-the-end stack of visited tiles.
//!
//! The stack's bottom element is always the level's start tile and is never
//! removed. Every adjacent pair on the stack is orthogonally adjacent on
//! the board, and no tile appears twice. Both invariants hold for every
//! reachable state because [`PathEngine::tap`] is the only mutation apart
//! from [`PathEngine::clear_to_start`], which is a start-tile tap.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::Board;
use crate::direction::{Coord, Direction};
use crate::solution::Solution;

/// What a tap did to the path.
///
/// Out-of-board coordinates, holes, non-adjacent extensions and redundant
/// taps are not errors, just non-transitions; they all report `Ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tap changed nothing.
    Ignored,
    /// The tapped tile was pushed onto the path. `segment` points from the
    /// new tile back toward the tile the stroke came from.
    Extended { coord: Coord, segment: Direction },
    /// The path was cut back so the tapped tile is the new top. `popped`
    /// tiles were removed and had their marks cleared.
    Truncated { coord: Coord, popped: usize },
}

/// The player's stroke over a board.
#[derive(Debug, Clone)]
pub struct PathEngine {
    start: Coord,
    stack: Vec<Coord>,
    visited: BTreeSet<Coord>,
    segments: BTreeMap<Coord, Direction>,
}

impl PathEngine {
    /// A fresh path containing only the board's start tile.
    pub fn new(board: &Board) -> Self {
        let start = board.start();
        Self {
            start,
            stack: vec![start],
            visited: BTreeSet::from([start]),
            segments: BTreeMap::new(),
        }
    }

    /// Number of tiles currently on the path. Never zero.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Always false; the start tile cannot be removed. Provided so the
    /// usual `len`/`is_empty` pairing exists.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The tile the stroke currently ends on.
    pub fn top(&self) -> Coord {
        self.stack.last().copied().unwrap_or(self.start)
    }

    /// The visited tiles in stroke order, start first.
    pub fn steps(&self) -> &[Coord] {
        &self.stack
    }

    /// Whether `coord` is currently on the path.
    pub fn is_visited(&self, coord: Coord) -> bool {
        self.visited.contains(&coord)
    }

    /// The back-pointing segment marker on `coord`, if it is on the path.
    /// The start tile never carries one.
    pub fn segment(&self, coord: Coord) -> Option<Direction> {
        self.segments.get(&coord).copied()
    }

    /// Apply one tap event.
    ///
    /// An unvisited tile orthogonally adjacent to the current top extends
    /// the path. A visited tile cuts the path back to itself, clearing the
    /// marks of everything popped; the start tile survives even that.
    pub fn tap(&mut self, board: &Board, coord: Coord) -> TapOutcome {
        if board.tile(coord).is_none() {
            return TapOutcome::Ignored;
        }

        if !self.visited.contains(&coord) {
            // The marker points from the new tile back toward the tile the
            // stroke came from; `toward` doubles as the adjacency test.
            match Direction::toward(coord, self.top()) {
                Some(segment) => {
                    self.stack.push(coord);
                    self.visited.insert(coord);
                    self.segments.insert(coord, segment);
                    TapOutcome::Extended { coord, segment }
                }
                None => TapOutcome::Ignored,
            }
        } else {
            let popped = self.truncate_to(coord);
            if popped == 0 {
                TapOutcome::Ignored
            } else {
                TapOutcome::Truncated { coord, popped }
            }
        }
    }

    /// Cut the path back to the start tile, as if the start had been
    /// tapped. Returns the number of tiles removed.
    pub fn clear_to_start(&mut self) -> usize {
        self.truncate_to(self.start)
    }

    /// Win predicate: every solution coordinate is currently visited,
    /// stopping at the first miss. Coverage only -- visit order is not
    /// compared, so any stroke covering the same tile set wins.
    pub fn covers(&self, solution: &Solution) -> bool {
        !solution.is_empty() && solution.iter().all(|c| self.visited.contains(&c))
    }

    fn truncate_to(&mut self, coord: Coord) -> usize {
        let mut popped = 0;
        while self.stack.len() > 1 {
            let Some(&top) = self.stack.last() else {
                break;
            };
            if top == coord {
                break;
            }
            self.stack.pop();
            self.visited.remove(&top);
            self.segments.remove(&top);
            popped += 1;
        }
        popped
    }
}
