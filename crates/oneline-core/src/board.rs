//! Static per-level board data: which cells exist and where the stroke starts.
//!
//! A board is immutable once a level is loaded. Everything that changes
//! during play (visited flags, segment and hint markers) lives in the
//! engines, keyed by coordinate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::direction::Coord;

/// Errors raised while decoding a board layout.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The layout has no rows, or rows of zero width.
    #[error("board layout is empty")]
    Empty,

    /// A row's length disagrees with the first row's.
    #[error("row {row} is {got} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A layout character other than '0', '1' or '2'.
    #[error("invalid cell character {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    /// No cell was marked as the start tile.
    #[error("board has no start tile")]
    NoStart,

    /// More than one cell was marked as the start tile.
    #[error("board has more than one start tile: ({}, {}) and ({}, {})", first.x, first.y, second.x, second.y)]
    MultipleStarts { first: Coord, second: Coord },
}

/// A single playable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Position in level space.
    pub coord: Coord,
    /// Whether the stroke begins here. Exactly one tile per board.
    pub is_start: bool,
}

/// The static board: dimensions plus the set of active cells.
///
/// Cells absent from the map are holes; a coordinate lookup answers both
/// "is this inside the board" and "is this cell playable" at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    cols: i32,
    rows: i32,
    start: Coord,
    tiles: BTreeMap<Coord, Tile>,
}

impl Board {
    /// Decode a board from digit row-strings: `'0'` hole, `'1'` active,
    /// `'2'` active and the unique start cell.
    ///
    /// The first row's length fixes the column count; every row must match.
    pub fn from_layout<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let cols = rows.first().ok_or(BoardError::Empty)?.as_ref().chars().count();
        if cols == 0 {
            return Err(BoardError::Empty);
        }

        let mut tiles = BTreeMap::new();
        let mut start = None;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let got = row.chars().count();
            if got != cols {
                return Err(BoardError::RaggedRow {
                    row: y,
                    expected: cols,
                    got,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let coord = Coord::new(x as i32, y as i32);
                match ch {
                    '0' => {}
                    '1' => {
                        tiles.insert(
                            coord,
                            Tile {
                                coord,
                                is_start: false,
                            },
                        );
                    }
                    '2' => {
                        if let Some(first) = start {
                            return Err(BoardError::MultipleStarts {
                                first,
                                second: coord,
                            });
                        }
                        start = Some(coord);
                        tiles.insert(
                            coord,
                            Tile {
                                coord,
                                is_start: true,
                            },
                        );
                    }
                    _ => {
                        return Err(BoardError::InvalidCell { row: y, col: x, ch });
                    }
                }
            }
        }

        Ok(Self {
            cols: cols as i32,
            rows: rows.len() as i32,
            start: start.ok_or(BoardError::NoStart)?,
            tiles,
        })
    }

    /// Column count.
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Row count.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// The unique start tile's coordinate.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// The tile at `coord`. `None` for holes and out-of-board coordinates.
    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// Whether `coord` is a playable cell.
    pub fn is_active(&self, coord: Coord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Number of active cells.
    pub fn active_count(&self) -> usize {
        self.tiles.len()
    }

    /// All active tiles in deterministic coordinate order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }
}
