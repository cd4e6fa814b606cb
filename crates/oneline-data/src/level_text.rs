//! The level-table text format.
//!
//! A tier's levels live in one line-oriented resource of `key: value`
//! records. A level block looks like:
//!
//! ```text
//! index: 7,
//! layout: [["120", "111"]],
//! path: [[0, 1], [0, 0], [1, 0], [1, 1], [1, 2]],
//! ```
//!
//! - the `index` record (value compared with spaces, commas and carriage
//!   returns stripped) opens the block;
//! - the next line's value holds the board as quoted digit row-strings
//!   (`'0'` hole, `'1'` active, `'2'` start);
//! - the line after that holds the reference path as a flat list of
//!   alternating `(row, col)` integers, which the parser swaps into
//!   `(x, y)` level space -- the only place that conversion happens.
//!
//! A sibling `//levels: N` record carries the tier's total level count.
//! Arbitrary interior whitespace and one trailing carriage return per line
//! are tolerated throughout.

use std::path::PathBuf;

use oneline_core::board::{Board, BoardError};
use oneline_core::direction::Coord;
use oneline_core::solution::Solution;

/// Errors raised while reading level tables.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// No `index` record matched before end of input. A content error:
    /// the session cannot proceed without its level.
    #[error("level {index} not found in archive")]
    NotFound { index: u32 },

    /// The block ended before its layout and path lines.
    #[error("level {index} block is truncated")]
    TruncatedBlock { index: u32 },

    /// The flat path list had an odd number of integers.
    #[error("level {index} has an odd number of path coordinates")]
    OddCoordinateCount { index: u32 },

    /// A path coordinate or count failed to parse as an integer.
    #[error("invalid integer in level table: {0}")]
    BadInteger(#[from] std::num::ParseIntError),

    /// The layout rows did not decode into a board.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The archive carries no `//levels` record.
    #[error("archive has no '//levels' record")]
    MissingLevelCount,

    /// A tier index outside the campaign.
    #[error("tier {tier} is outside the campaign")]
    TierOutOfRange { tier: u32 },

    /// A level file could not be read.
    #[error("could not read level archive {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One tier's parsed level table.
#[derive(Debug, Clone)]
pub struct LevelArchive {
    lines: Vec<String>,
}

impl LevelArchive {
    /// Split a resource into its record lines. No validation happens here;
    /// blocks are checked when a level is requested.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    /// Decode level `index` into its board and reference path.
    pub fn level(&self, index: u32) -> Result<(Board, Solution), LevelError> {
        let needle = index.to_string();
        let at = self
            .lines
            .iter()
            .position(|line| {
                record_value(line, "index").is_some_and(|v| strip_noise(v) == needle)
            })
            .ok_or(LevelError::NotFound { index })?;

        let layout = self
            .lines
            .get(at + 1)
            .and_then(|line| line.split_once(':'))
            .map(|(_, v)| v)
            .ok_or(LevelError::TruncatedBlock { index })?;
        let rows: Vec<String> = strip_list_noise(layout)
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        let board = Board::from_layout(&rows)?;

        let path = self
            .lines
            .get(at + 2)
            .and_then(|line| line.split_once(':'))
            .map(|(_, v)| v)
            .ok_or(LevelError::TruncatedBlock { index })?;
        let flat = strip_list_noise(path)
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<i32>)
            .collect::<Result<Vec<i32>, _>>()?;
        if flat.len() % 2 != 0 {
            return Err(LevelError::OddCoordinateCount { index });
        }

        // File order is (row, col); internal order is (x, y).
        let steps = flat
            .chunks_exact(2)
            .map(|pair| Coord::new(pair[1], pair[0]))
            .collect();
        Ok((board, Solution::new(steps)))
    }

    /// The tier's total level count, from the `//levels` record.
    pub fn level_count(&self) -> Result<u32, LevelError> {
        let value = self
            .lines
            .iter()
            .find_map(|line| record_value(line, "//levels"))
            .ok_or(LevelError::MissingLevelCount)?;
        Ok(strip_noise(value).parse()?)
    }
}

/// The value of a `key: value` line, if its key matches.
fn record_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let (k, v) = line.split_once(':')?;
    (k.trim() == key).then_some(v)
}

/// Drop spaces, commas and carriage returns; used for scalar values.
fn strip_noise(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | ',' | '\r' | '\t'))
        .collect()
}

/// Drop brackets, quotes, whitespace and carriage returns but keep commas,
/// which separate the list items.
fn strip_list_noise(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | ' ' | '\r' | '\t'))
        .collect()
}
