//! Heuristic evaluation of chess games for rating prediction.
//!
//! This crate implements a two-level evaluation architecture:
//!
//! 1. **Position Evaluation** ([`position`]) - Scores a single board along four independent
//!    axes (material, activity, pawn structure, king safety), separately for each side.
//!
//! 2. **Game Evaluation** ([`game`]) - Plays a recorded mainline move by move, scores every
//!    position reached, and turns the cumulative per-side totals into performance
//!    percentages.
//!
//! # Architecture
//!
//! ```text
//! Game Evaluation (cumulative totals, performance percentages)
//!     ↓ uses
//! Position Evaluation (score the board after each legal move)
//!     ↓ uses
//! Score Tables (material values, pawn rank bonuses, key squares)
//! ```
//!
//! # Design Principles
//!
//! ## Resulting Positions, Not Intentions
//!
//! Every move is scored from the position it creates. A blunder is penalized through the
//! board it leaves behind, not through the position it was played from.
//!
//! ## Full Rescan
//!
//! The whole board is re-evaluated after every move instead of being updated incrementally.
//! The cost is `O(moves × squares)`, which is negligible for a single game and keeps each
//! position score independent of the path that led to it.
//!
//! ## Calibrated Heuristics
//!
//! The score tables in [`score_table`] are the exact definitions the rating model was fitted
//! against. In particular the king safety term only recognizes a king standing on the c- or
//! g-file of its home rank, which is an approximation of "has castled" rather than a rules
//! check. Changing these tables requires refitting the model.
//!
//! # Example
//!
//! ```
//! use elocast_evaluator::game;
//! use elocast_game::{MoveToken, shakmaty::Chess};
//!
//! let moves: Vec<MoveToken> = ["e4", "e5", "Nf3", "Nc6"]
//!     .into_iter()
//!     .map(MoveToken::new)
//!     .collect();
//! let evaluation = game::evaluate_game(Chess::default(), &moves);
//!
//! let performance = evaluation.performance();
//! assert!((performance.white + performance.black - 100.0).abs() < 1e-9);
//! ```

pub use self::side_pair::SidePair;

pub mod game;
pub mod position;
pub mod score_table;

mod side_pair;
