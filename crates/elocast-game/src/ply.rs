use serde::Serialize;
use shakmaty::{
    CastlingMode, Chess, Move, Position as _,
    san::{San, SanError},
};

use crate::MoveToken;

/// Why a recorded move could not be applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::Error,
)]
#[serde(rename_all = "snake_case")]
pub enum IllegalMoveError {
    #[display("not valid algebraic notation")]
    Unparsable,
    #[display("ambiguous in the current position")]
    Ambiguous,
    #[display("not legal in the current position")]
    Illegal,
}

/// A recorded move that was legal and has been played on the board.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedMove {
    /// Index of the move in the recorded mainline (0-based, skipped moves included).
    pub ply: usize,
    /// Normalized SAN, as resolved against the position before the move.
    pub san: String,
    /// UCI text of the move (`e2e4`, `e1g1`, `e7e8q`).
    pub uci: String,
    #[serde(skip)]
    pub mv: Move,
}

/// A recorded move that was rejected; the board was left untouched.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedMove {
    pub ply: usize,
    text: String,
    pub reason: IllegalMoveError,
}

impl SkippedMove {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Result of replaying one recorded move.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum PlyOutcome {
    Applied(AppliedMove),
    Skipped(SkippedMove),
}

/// Plays one recorded move on `position`.
///
/// The move is resolved against the current position and checked for legality before
/// anything is mutated. A legal move advances the position by exactly one ply; any other
/// token leaves the position as it was and yields [`PlyOutcome::Skipped`].
pub fn play_ply(position: &mut Chess, ply: usize, token: &MoveToken) -> PlyOutcome {
    match resolve(position, token) {
        Ok(mv) => {
            let san = San::from_move(position, &mv).to_string();
            let uci = mv.to_uci(CastlingMode::Standard).to_string();
            position.play_unchecked(&mv);
            PlyOutcome::Applied(AppliedMove { ply, san, uci, mv })
        }
        Err(reason) => PlyOutcome::Skipped(SkippedMove {
            ply,
            text: token.text().to_owned(),
            reason,
        }),
    }
}

fn resolve(position: &Chess, token: &MoveToken) -> Result<Move, IllegalMoveError> {
    let san = token.san().map_err(|_| IllegalMoveError::Unparsable)?;
    let mv = san.to_move(position).map_err(|e| match e {
        SanError::AmbiguousSan => IllegalMoveError::Ambiguous,
        SanError::IllegalSan => IllegalMoveError::Illegal,
    })?;
    if !position.is_legal(&mv) {
        return Err(IllegalMoveError::Illegal);
    }
    Ok(mv)
}
