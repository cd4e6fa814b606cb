//! Progressive reveal of the reference path.

use std::collections::BTreeMap;

use crate::direction::{Coord, Direction};
use crate::solution::Solution;

/// Cursor into the solution tracking how much of it has been revealed,
/// plus the hint markers currently shown on the board.
///
/// The cursor starts at 1 -- the start tile is already known to the player
/// -- and only ever advances within a level attempt. A new level gets a
/// fresh engine.
#[derive(Debug, Clone)]
pub struct HintEngine {
    revealed: usize,
    marks: BTreeMap<Coord, Direction>,
}

impl Default for HintEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HintEngine {
    /// A fresh engine with nothing revealed beyond the start tile.
    pub fn new() -> Self {
        Self {
            revealed: 1,
            marks: BTreeMap::new(),
        }
    }

    /// The reveal cursor: how many solution tiles are considered shown.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// The hint marker on `coord`, if one has been revealed there.
    pub fn mark(&self, coord: Coord) -> Option<Direction> {
        self.marks.get(&coord).copied()
    }

    /// Whether the whole solution has been revealed; further reveals are
    /// no-ops.
    pub fn exhausted(&self, solution: &Solution) -> bool {
        self.revealed() >= solution.len()
    }

    /// Reveal up to `per_reveal` further solution steps.
    ///
    /// Each revealed tile is the one *before* the cursor and its marker is
    /// the outgoing direction of the stroke at that tile, so the markers
    /// chain visually toward the goal. The final solution tile never
    /// carries a marker -- it has no outgoing step. Returns the markers
    /// placed by this call; the cursor advances by the steps traversed.
    pub fn reveal(
        &mut self,
        solution: &Solution,
        per_reveal: usize,
    ) -> Vec<(Coord, Direction)> {
        let mut placed = Vec::new();
        let mut taken = 0;
        while taken < per_reveal && self.revealed < solution.len() {
            let (Some(from), Some(to)) =
                (solution.get(self.revealed - 1), solution.get(self.revealed))
            else {
                break;
            };
            // Authored data is trusted; a malformed step advances the
            // cursor without leaving a marker.
            if let Some(dir) = Direction::toward(from, to) {
                self.marks.insert(from, dir);
                placed.push((from, dir));
            }
            self.revealed += 1;
            taken += 1;
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_solution;

    #[test]
    fn first_reveal_marks_the_opening_steps() {
        let solution = sample_solution();
        let mut hints = HintEngine::new();

        let placed = hints.reveal(&solution, 2);
        assert_eq!(
            placed,
            vec![
                (Coord::new(1, 0), Direction::Left),
                (Coord::new(0, 0), Direction::Down),
            ]
        );
        assert_eq!(hints.revealed(), 3);
        assert_eq!(hints.mark(Coord::new(1, 0)), Some(Direction::Left));
        assert_eq!(hints.mark(Coord::new(0, 1)), None);
    }

    #[test]
    fn reveal_stops_at_the_end_of_the_solution() {
        let solution = sample_solution();
        let mut hints = HintEngine::new();

        // Ask for far more than the solution holds.
        let placed = hints.reveal(&solution, 50);
        // Four steps for a five-tile path; the last tile takes no marker.
        assert_eq!(placed.len(), 4);
        assert_eq!(hints.revealed(), solution.len());
        assert!(hints.exhausted(&solution));
        assert_eq!(hints.mark(Coord::new(2, 1)), None);

        // Exhausted engines reveal nothing further.
        assert!(hints.reveal(&solution, 5).is_empty());
    }

    #[test]
    fn cursor_is_monotonic_across_reveals() {
        let solution = sample_solution();
        let mut hints = HintEngine::new();

        hints.reveal(&solution, 1);
        assert_eq!(hints.revealed(), 2);
        hints.reveal(&solution, 1);
        assert_eq!(hints.revealed(), 3);
        hints.reveal(&solution, 0);
        assert_eq!(hints.revealed(), 3);
    }

    #[test]
    fn markers_chain_along_the_stroke() {
        let solution = sample_solution();
        let mut hints = HintEngine::new();
        hints.reveal(&solution, 10);

        // Every marked tile's marker points at the next solution tile.
        for (i, coord) in solution.iter().enumerate().take(solution.len() - 1) {
            let next = solution.get(i + 1).unwrap();
            assert_eq!(hints.mark(coord), Direction::toward(coord, next));
        }
    }
}
