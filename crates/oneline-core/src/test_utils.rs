//! Shared fixtures for unit, property, and integration tests.

use crate::board::Board;
use crate::currency::CoinLedger;
use crate::direction::Coord;
use crate::solution::Solution;

/// The 3x2 board used throughout the test suite:
///
/// ```text
/// 1 2 .      (2, 0) is a hole; the stroke starts at (1, 0)
/// 1 1 1
/// ```
pub fn sample_board() -> Board {
    Board::from_layout(&["120", "111"]).expect("fixture layout is valid")
}

/// The unique stroke through [`sample_board`]:
/// `(1,0) -> (0,0) -> (0,1) -> (1,1) -> (2,1)`.
pub fn sample_solution() -> Solution {
    Solution::new(vec![
        Coord::new(1, 0),
        Coord::new(0, 0),
        Coord::new(0, 1),
        Coord::new(1, 1),
        Coord::new(2, 1),
    ])
}

/// A larger board: a 4x3 full rectangle with a boustrophedon solution.
pub fn snake_board() -> (Board, Solution) {
    let board = Board::from_layout(&["2111", "1111", "1111"]).expect("fixture layout is valid");
    let mut steps = Vec::new();
    for y in 0..3 {
        let xs: Vec<i32> = if y % 2 == 0 {
            (0..4).collect()
        } else {
            (0..4).rev().collect()
        };
        for x in xs {
            steps.push(Coord::new(x, y));
        }
    }
    (board, Solution::new(steps))
}

/// In-memory coin ledger for purchase tests.
#[derive(Debug, Default)]
pub struct TestLedger {
    pub coins: i64,
}

impl TestLedger {
    /// A ledger holding `coins`.
    pub fn with_coins(coins: i64) -> Self {
        Self { coins }
    }
}

impl CoinLedger for TestLedger {
    fn balance(&self) -> i64 {
        self.coins
    }

    fn credit(&mut self, amount: i64) {
        self.coins += amount;
    }

    fn debit(&mut self, amount: i64) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_satisfy_the_authoring_contract() {
        sample_solution().check_against(&sample_board()).unwrap();
        let (board, solution) = snake_board();
        solution.check_against(&board).unwrap();
    }
}
