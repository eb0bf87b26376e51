//! Position evaluation: per-side scores for a single board.
//!
//! Four independent terms are computed by scanning the board:
//!
//! | term             | rule                                                                |
//! |------------------|---------------------------------------------------------------------|
//! | material         | sum of [`material_value`] over the side's pieces                     |
//! | activity         | +1 per piece on a center square, else +0.5 per knight/bishop on one of its side's near-center squares |
//! | pawn structure   | [`pawn_rank_bonus`] for each pawn                                    |
//! | king safety      | +1 if the king stands on the c- or g-file of its home rank          |
//!
//! The three positional terms are summed into [`PositionScore::total`]; together with
//! material they form a [`MoveScore`].
//!
//! All functions are pure: the same board always yields the same scores.

use serde::{Deserialize, Serialize};
use shakmaty::{Board, Color, Piece, Role, Square};

use crate::{
    SidePair,
    score_table::{
        CASTLED_KING_BONUS, CASTLED_KING_FILES, CENTER_BONUS, CENTER_SQUARES, NEAR_CENTER_BONUS,
        home_rank, material_value, near_center_squares, pawn_rank_bonus,
    },
};

/// Positional terms of a board, per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionScore {
    pub activity: SidePair<f64>,
    pub pawn_structure: SidePair<f64>,
    pub king_safety: SidePair<f64>,
}

impl PositionScore {
    /// Activity + pawn structure + king safety.
    #[must_use]
    pub fn total(&self) -> SidePair<f64> {
        self.activity + self.pawn_structure + self.king_safety
    }
}

/// Complete score of the board reached by a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveScore {
    pub material: SidePair<u32>,
    pub position: PositionScore,
}

impl MoveScore {
    /// Material plus positional total.
    #[must_use]
    pub fn total(&self) -> SidePair<f64> {
        self.material.map(f64::from) + self.position.total()
    }
}

/// Scores every term of `board`.
#[must_use]
pub fn evaluate(board: &Board) -> MoveScore {
    MoveScore {
        material: material(board),
        position: position(board),
    }
}

#[must_use]
pub fn position(board: &Board) -> PositionScore {
    PositionScore {
        activity: activity(board),
        pawn_structure: pawn_structure(board),
        king_safety: king_safety(board),
    }
}

#[must_use]
pub fn material(board: &Board) -> SidePair<u32> {
    let mut score = SidePair::default();
    for (_square, piece) in pieces(board) {
        *score.get_mut(piece.color) += material_value(piece.role);
    }
    score
}

#[must_use]
pub fn activity(board: &Board) -> SidePair<f64> {
    let mut score = SidePair::default();
    for (square, piece) in pieces(board) {
        *score.get_mut(piece.color) += piece_activity(square, piece);
    }
    score
}

fn piece_activity(square: Square, piece: Piece) -> f64 {
    if CENTER_SQUARES.contains(&square) {
        return CENTER_BONUS;
    }
    let is_minor = matches!(piece.role, Role::Knight | Role::Bishop);
    if is_minor && near_center_squares(piece.color).contains(&square) {
        return NEAR_CENTER_BONUS;
    }
    0.0
}

#[must_use]
pub fn pawn_structure(board: &Board) -> SidePair<f64> {
    let mut score = SidePair::default();
    for (square, piece) in pieces(board).filter(|(_, piece)| piece.role == Role::Pawn) {
        *score.get_mut(piece.color) += pawn_rank_bonus(square.rank());
    }
    score
}

#[must_use]
pub fn king_safety(board: &Board) -> SidePair<f64> {
    let mut score = SidePair::default();
    for color in [Color::White, Color::Black] {
        if let Some(king) = board.king_of(color)
            && king.rank() == home_rank(color)
            && CASTLED_KING_FILES.contains(&king.file())
        {
            *score.get_mut(color) += CASTLED_KING_BONUS;
        }
    }
    score
}

fn pieces(board: &Board) -> impl Iterator<Item = (Square, Piece)> + '_ {
    board
        .occupied()
        .into_iter()
        .filter_map(|square| board.piece_at(square).map(|piece| (square, piece)))
}

#[cfg(test)]
mod tests {
    use shakmaty::{Chess, Position as _};

    use super::*;

    /// Most pieces a side can hold: every pawn promoted to a queen.
    const MAX_MATERIAL: u32 = 9 * 9 + 2 * 5 + 2 * 3 + 2 * 3;

    fn board_with(pieces: &[(Square, Color, Role)]) -> Board {
        let mut board = Board::empty();
        for &(square, color, role) in pieces {
            board.set_piece_at(square, Piece { color, role });
        }
        board
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_start_position() {
        let board = Chess::default().board().clone();
        let score = evaluate(&board);

        assert_eq!(score.material, SidePair::new(39, 39));
        assert_eq!(score.position.activity, SidePair::new(0.0, 0.0));
        // eight pawns on ranks 2 and 7
        assert_eq!(score.position.pawn_structure, SidePair::new(0.0, 0.0));
        // kings still on the e-file
        assert_eq!(score.position.king_safety, SidePair::new(0.0, 0.0));
        assert_eq!(score.total(), SidePair::new(39.0, 39.0));
    }

    #[test]
    fn test_material_is_bounded() {
        let mut pieces = vec![(Square::E1, Color::White, Role::King)];
        pieces.extend(Square::ALL[8..17].iter().map(|&sq| (sq, Color::White, Role::Queen)));
        pieces.extend([
            (Square::A1, Color::White, Role::Rook),
            (Square::H1, Color::White, Role::Rook),
            (Square::B1, Color::White, Role::Knight),
            (Square::G1, Color::White, Role::Knight),
            (Square::C1, Color::White, Role::Bishop),
            (Square::F1, Color::White, Role::Bishop),
        ]);
        let board = board_with(&pieces);

        let material = material(&board);
        assert_eq!(material.white, MAX_MATERIAL);
        assert_eq!(material.black, 0);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let board = board_with(&[
            (Square::G1, Color::White, Role::King),
            (Square::E4, Color::White, Role::Pawn),
            (Square::C3, Color::White, Role::Knight),
            (Square::C8, Color::Black, Role::King),
            (Square::D5, Color::Black, Role::Queen),
            (Square::F6, Color::Black, Role::Bishop),
        ]);
        let first = evaluate(&board);
        let second = evaluate(&board);
        assert_eq!(first, second);
    }

    #[test]
    fn test_castled_king_safety() {
        let castled = board_with(&[
            (Square::G1, Color::White, Role::King),
            (Square::C8, Color::Black, Role::King),
        ]);
        assert_eq!(king_safety(&castled), SidePair::new(1.0, 1.0));

        // one file off, and one rank off
        let off = board_with(&[
            (Square::H1, Color::White, Role::King),
            (Square::C7, Color::Black, Role::King),
        ]);
        assert_eq!(king_safety(&off), SidePair::new(0.0, 0.0));

        // a white king on a black castled square does not count
        let wrong_rank = board_with(&[(Square::G8, Color::White, Role::King)]);
        assert_eq!(king_safety(&wrong_rank), SidePair::new(0.0, 0.0));
    }

    #[test]
    fn test_missing_king_scores_zero() {
        let board = board_with(&[(Square::C1, Color::White, Role::King)]);
        assert_eq!(king_safety(&board), SidePair::new(1.0, 0.0));
    }

    #[test]
    fn test_pawn_rank_structure() {
        let central = board_with(&[(Square::E4, Color::White, Role::Pawn)]);
        assert_close(pawn_structure(&central).white, 1.0);

        let back_rank = board_with(&[(Square::E1, Color::White, Role::Pawn)]);
        assert_close(pawn_structure(&back_rank).white, -0.5);

        let mixed = board_with(&[
            (Square::A3, Color::White, Role::Pawn),
            (Square::B2, Color::White, Role::Pawn),
            (Square::D5, Color::Black, Role::Pawn),
            (Square::H6, Color::Black, Role::Pawn),
        ]);
        let score = pawn_structure(&mixed);
        assert_close(score.white, 0.5);
        assert_close(score.black, 1.5);
    }

    #[test]
    fn test_knight_activity() {
        let rim = board_with(&[(Square::A3, Color::White, Role::Knight)]);
        assert_close(activity(&rim).white, 0.0);

        let center = board_with(&[(Square::D4, Color::White, Role::Knight)]);
        assert_close(activity(&center).white, 1.0);

        let near = board_with(&[(Square::F3, Color::White, Role::Knight)]);
        assert_close(activity(&near).white, 0.5);
    }

    #[test]
    fn test_near_center_squares_depend_on_side() {
        // f6 is near-center for black only
        let board = board_with(&[
            (Square::F6, Color::White, Role::Bishop),
            (Square::F6.flip_vertical(), Color::Black, Role::Bishop),
        ]);
        assert_eq!(activity(&board), SidePair::new(0.0, 0.0));

        let board = board_with(&[
            (Square::C4, Color::White, Role::Bishop),
            (Square::C5, Color::Black, Role::Knight),
        ]);
        assert_eq!(activity(&board), SidePair::new(0.5, 0.5));
    }

    #[test]
    fn test_center_bonus_applies_to_any_piece_once() {
        let board = board_with(&[
            (Square::E4, Color::White, Role::Pawn),
            (Square::D4, Color::White, Role::Rook),
            (Square::E5, Color::Black, Role::King),
            (Square::D5, Color::Black, Role::Bishop),
            // rooks on near-center squares earn nothing
            (Square::C3, Color::White, Role::Rook),
        ]);
        assert_eq!(activity(&board), SidePair::new(2.0, 2.0));
    }

    #[test]
    fn test_position_total_sums_terms() {
        let board = board_with(&[
            (Square::G1, Color::White, Role::King),
            (Square::E4, Color::White, Role::Pawn),
            (Square::C3, Color::White, Role::Knight),
            (Square::E8, Color::Black, Role::King),
            (Square::A7, Color::Black, Role::Pawn),
        ]);
        let score = evaluate(&board);
        // activity 1.0 + 0.5, pawns 1.0, king 1.0
        assert_close(score.position.total().white, 3.5);
        assert_close(score.position.total().black, 0.0);
        assert_eq!(score.material, SidePair::new(4, 1));
        assert_close(score.total().white, 7.5);
        assert_close(score.total().black, 1.0);
    }
}
