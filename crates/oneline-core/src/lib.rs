//! Oneline Core -- the state machine for a single-stroke grid puzzle.
//!
//! A level is a rectangular board with holes. The player draws one
//! continuous, non-branching stroke that starts on the level's start tile
//! and must visit every active tile exactly once, moving only between
//! orthogonally adjacent tiles. This crate owns the rules of that game:
//! the immutable board model, the tap-driven path stack, progressive
//! solution hints, per-frame session orchestration, and campaign
//! progression. Level text parsing lives in `oneline-data`; durable
//! progress lives in `oneline-save`.
//!
//! # Tick Model
//!
//! The embedding shell calls [`session::LevelSession::tick`] once per frame
//! with the active press coordinate, if any. Each tick applies at most one
//! tap mutation, or, on input-idle ticks, one win check -- never both.
//! Everything the shell needs back comes out as [`event::GameEvent`] values
//! drained in batch after the tick.
//!
//! # Key Types
//!
//! - [`board::Board`] -- active cells and the unique start tile.
//! - [`solution::Solution`] -- the level's authored reference path.
//! - [`path::PathEngine`] -- the visited stack, driven by tap events.
//! - [`hint::HintEngine`] -- progressive reveal of the reference path.
//! - [`session::LevelSession`] -- one level attempt, tick-driven.
//! - [`event::GameEvent`] -- typed events delivered once per tick.
//! - [`progress`] -- campaign advance and frontier rules.

pub mod board;
pub mod currency;
pub mod direction;
pub mod event;
pub mod hint;
pub mod path;
pub mod progress;
pub mod rng;
pub mod session;
pub mod solution;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
