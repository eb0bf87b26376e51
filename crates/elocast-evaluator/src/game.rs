//! Game evaluation: cumulative scores and performance percentages for a whole game.
//!
//! # How It Works
//!
//! 1. **Play** - Each recorded move is resolved against the current board with
//!    [`play_ply`]. Legal moves advance the board by one ply; anything else is skipped
//!    without touching the board.
//! 2. **Score** - After every applied move the resulting board is scored with
//!    [`position::evaluate`] and the per-side totals are added to the running
//!    [`CumulativeScore`].
//! 3. **Normalize** - The cumulative totals are turned into each side's share of the
//!    combined score:
//!
//! ```text
//! white_pct = white_score / (white_score + black_score) × 100
//! black_pct = black_score / (white_score + black_score) × 100
//! ```
//!
//! When the combined score is zero (no move was applied) both sides get 50%.
//!
//! Skipped moves never contribute: a mainline containing an illegal move scores exactly like
//! the same mainline with that move removed.

use elocast_game::{
    AppliedMove, GameError, GameRecord, MoveToken, PlyOutcome, SkippedMove, play_ply,
};
use serde::{Deserialize, Serialize};
use shakmaty::{Chess, Position as _};

use crate::{
    SidePair,
    position::{self, MoveScore},
};

/// Running per-side totals over the moves evaluated so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CumulativeScore {
    score: SidePair<f64>,
}

impl CumulativeScore {
    pub fn add(&mut self, score: SidePair<f64>) {
        self.score += score;
    }

    #[must_use]
    pub fn white(&self) -> f64 {
        self.score.white
    }

    #[must_use]
    pub fn black(&self) -> f64 {
        self.score.black
    }

    /// Combined score of both sides.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.score.sum()
    }

    /// Each side's share of the combined score, in percent.
    ///
    /// Returns 50/50 when the combined score is zero.
    #[must_use]
    pub fn performance(&self) -> SidePair<f64> {
        let total = self.total();
        if total == 0.0 {
            return SidePair::new(50.0, 50.0);
        }
        self.score.map(|score| score / total * 100.0)
    }
}

/// Score of one applied move, with the running totals after it.
#[derive(Debug, Clone, Serialize)]
pub struct PlyEvaluation {
    #[serde(flatten)]
    pub applied: AppliedMove,
    pub score: MoveScore,
    pub cumulative: CumulativeScore,
}

/// Result of evaluating a game's mainline.
#[derive(Debug, Clone)]
pub struct GameEvaluation {
    position: Chess,
    plies: Vec<PlyEvaluation>,
    skipped: Vec<SkippedMove>,
    cumulative: CumulativeScore,
}

impl GameEvaluation {
    fn start(position: Chess) -> Self {
        Self {
            position,
            plies: vec![],
            skipped: vec![],
            cumulative: CumulativeScore::default(),
        }
    }

    fn record(mut self, outcome: PlyOutcome) -> Self {
        match outcome {
            PlyOutcome::Applied(applied) => {
                let score = position::evaluate(self.position.board());
                self.cumulative.add(score.total());
                self.plies.push(PlyEvaluation {
                    applied,
                    score,
                    cumulative: self.cumulative,
                });
            }
            PlyOutcome::Skipped(skipped) => self.skipped.push(skipped),
        }
        self
    }

    /// Per-side performance percentages for the whole game.
    #[must_use]
    pub fn performance(&self) -> SidePair<f64> {
        self.cumulative.performance()
    }

    #[must_use]
    pub fn cumulative(&self) -> &CumulativeScore {
        &self.cumulative
    }

    /// Evaluations of the applied moves, in order.
    #[must_use]
    pub fn plies(&self) -> &[PlyEvaluation] {
        &self.plies
    }

    /// Recorded moves that were rejected, in order.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedMove] {
        &self.skipped
    }

    /// Position after the last applied move.
    #[must_use]
    pub fn final_position(&self) -> &Chess {
        &self.position
    }
}

/// Plays `mainline` from `initial` and scores every position reached.
#[must_use]
pub fn evaluate_game(initial: Chess, mainline: &[MoveToken]) -> GameEvaluation {
    mainline
        .iter()
        .enumerate()
        .fold(GameEvaluation::start(initial), |mut evaluation, (ply, token)| {
            let outcome = play_ply(&mut evaluation.position, ply, token);
            evaluation.record(outcome)
        })
}

/// Evaluates the mainline of `record` from its initial position.
pub fn evaluate_record(record: &GameRecord) -> Result<GameEvaluation, GameError> {
    Ok(evaluate_game(record.initial_position()?, record.mainline()))
}
