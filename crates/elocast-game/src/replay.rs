use shakmaty::{Chess, Position as _};

use crate::{AppliedMove, MoveToken, PlyOutcome, SkippedMove, play_ply};

/// Check status of a position, as shown to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum PositionStatus {
    #[display("")]
    Normal,
    #[display("check")]
    Check,
    #[display("checkmate")]
    Checkmate,
    #[display("stalemate")]
    Stalemate,
}

impl PositionStatus {
    #[must_use]
    pub fn of(position: &Chess) -> Self {
        if position.is_checkmate() {
            PositionStatus::Checkmate
        } else if position.is_stalemate() {
            PositionStatus::Stalemate
        } else if position.is_check() {
            PositionStatus::Check
        } else {
            PositionStatus::Normal
        }
    }
}

/// Timeline of the positions reached while playing a game's mainline.
///
/// Index `0` is the initial position and index `i` is the position after the `i`-th
/// applied move, so stepping through a game is a plain index change.
#[derive(Debug, Clone)]
pub struct Replay {
    positions: Vec<Chess>,
    moves: Vec<AppliedMove>,
    skipped: Vec<SkippedMove>,
}

impl Replay {
    #[must_use]
    pub fn new(initial: Chess, mainline: &[MoveToken]) -> Self {
        let mut positions = Vec::with_capacity(mainline.len() + 1);
        let mut moves = Vec::with_capacity(mainline.len());
        let mut skipped = vec![];

        let mut position = initial;
        positions.push(position.clone());
        for (ply, token) in mainline.iter().enumerate() {
            match play_ply(&mut position, ply, token) {
                PlyOutcome::Applied(applied) => {
                    moves.push(applied);
                    positions.push(position.clone());
                }
                PlyOutcome::Skipped(skip) => skipped.push(skip),
            }
        }

        Self {
            positions,
            moves,
            skipped,
        }
    }

    /// Index of the final position.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn position(&self, index: usize) -> Option<&Chess> {
        self.positions.get(index)
    }

    /// The move that led to the position at `index` (`None` for the initial position).
    #[must_use]
    pub fn last_move(&self, index: usize) -> Option<&AppliedMove> {
        index.checked_sub(1).and_then(|i| self.moves.get(i))
    }

    #[must_use]
    pub fn moves(&self) -> &[AppliedMove] {
        &self.moves
    }

    #[must_use]
    pub fn skipped(&self) -> &[SkippedMove] {
        &self.skipped
    }

    #[must_use]
    pub fn status(&self, index: usize) -> Option<PositionStatus> {
        self.position(index).map(PositionStatus::of)
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::{Color, Square};

    use super::*;

    fn tokens(moves: &[&str]) -> Vec<MoveToken> {
        moves.iter().copied().map(MoveToken::new).collect()
    }

    #[test]
    fn test_replay_indexes_positions() {
        let replay = Replay::new(Chess::default(), &tokens(&["e4", "e5", "Nf3"]));
        assert_eq!(replay.last_index(), 3);
        assert!(replay.position(0).is_some());
        assert!(replay.position(3).is_some());
        assert!(replay.position(4).is_none());
        assert!(replay.last_move(0).is_none());
        assert_eq!(replay.last_move(1).unwrap().uci, "e2e4");
        assert_eq!(replay.last_move(3).unwrap().san, "Nf3");
        assert_eq!(
            replay.position(3).unwrap().board().king_of(Color::White),
            Some(Square::E1)
        );
    }

    #[test]
    fn test_replay_skips_illegal_moves() {
        let replay = Replay::new(Chess::default(), &tokens(&["e4", "Ke3", "e5"]));
        assert_eq!(replay.last_index(), 2);
        assert_eq!(replay.skipped().len(), 1);
        assert_eq!(replay.skipped()[0].ply, 1);
        assert_eq!(replay.last_move(2).unwrap().ply, 2);
    }

    #[test]
    fn test_replay_status() {
        let replay = Replay::new(
            Chess::default(),
            &tokens(&["f3", "e5", "g4", "Qh4"]),
        );
        assert_eq!(replay.status(0), Some(PositionStatus::Normal));
        assert_eq!(replay.status(4), Some(PositionStatus::Checkmate));
        assert_eq!(replay.status(5), None);
    }
}
