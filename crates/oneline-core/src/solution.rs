//! The level's authored reference path.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::direction::{Coord, Direction};

/// The unique reference path for a level: one coordinate per active tile,
/// in visit order, beginning at the board's start tile.
///
/// This is authored data shipped with the level and trusted at load time;
/// the engine never searches for a path of its own. [`Solution::check_against`]
/// verifies the authoring contract and is meant for content pipelines and
/// tests, not the load path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution(Vec<Coord>);

/// Authoring-contract violations reported by [`Solution::check_against`].
#[derive(Debug, thiserror::Error)]
pub enum SolutionError {
    #[error("solution is empty")]
    Empty,

    #[error("solution starts at ({}, {}), board start is ({}, {})", got.x, got.y, expected.x, expected.y)]
    WrongStart { expected: Coord, got: Coord },

    #[error("solution visits {got} tiles, board has {expected} active tiles")]
    WrongLength { expected: usize, got: usize },

    #[error("solution step {index} from ({}, {}) to ({}, {}) is not orthogonal", from.x, from.y, to.x, to.y)]
    NonAdjacentStep {
        index: usize,
        from: Coord,
        to: Coord,
    },

    #[error("solution visits ({}, {}) twice", coord.x, coord.y)]
    DuplicateVisit { coord: Coord },

    #[error("solution visits ({}, {}), which is not an active tile", coord.x, coord.y)]
    InactiveTile { coord: Coord },
}

impl Solution {
    /// Wrap an ordered coordinate list as a solution.
    pub fn new(steps: Vec<Coord>) -> Self {
        Self(steps)
    }

    /// Number of tiles on the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no tiles at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `index`-th tile of the path.
    pub fn get(&self, index: usize) -> Option<Coord> {
        self.0.get(index).copied()
    }

    /// The full path as a slice.
    pub fn steps(&self) -> &[Coord] {
        &self.0
    }

    /// Iterate the path in visit order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.0.iter().copied()
    }

    /// Verify the authoring contract: starts on the board's start tile,
    /// visits every active tile exactly once, and every consecutive pair is
    /// orthogonally adjacent.
    pub fn check_against(&self, board: &Board) -> Result<(), SolutionError> {
        let first = self.get(0).ok_or(SolutionError::Empty)?;
        if first != board.start() {
            return Err(SolutionError::WrongStart {
                expected: board.start(),
                got: first,
            });
        }
        if self.len() != board.active_count() {
            return Err(SolutionError::WrongLength {
                expected: board.active_count(),
                got: self.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for (index, coord) in self.iter().enumerate() {
            if !board.is_active(coord) {
                return Err(SolutionError::InactiveTile { coord });
            }
            if !seen.insert(coord) {
                return Err(SolutionError::DuplicateVisit { coord });
            }
            if index > 0 {
                let from = self.0[index - 1];
                if Direction::toward(from, coord).is_none() {
                    return Err(SolutionError::NonAdjacentStep {
                        index,
                        from,
                        to: coord,
                    });
                }
            }
        }
        Ok(())
    }
}
