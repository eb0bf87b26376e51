//! Fixed score tables shared by every evaluation.
//!
//! All values are compile-time constants.

use shakmaty::{Color, File, Rank, Role, Square};

/// Material value of a piece kind. The king is not counted.
#[must_use]
pub const fn material_value(role: Role) -> u32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}

/// Center squares; any piece standing here counts as active.
pub const CENTER_SQUARES: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

/// Bonus for a piece on a center square.
pub const CENTER_BONUS: f64 = 1.0;

/// Squares in front of the center where a minor piece of the given side counts as active.
#[must_use]
pub const fn near_center_squares(color: Color) -> [Square; 4] {
    match color {
        Color::White => [Square::C3, Square::F3, Square::C4, Square::F4],
        Color::Black => [Square::C6, Square::F6, Square::C5, Square::F5],
    }
}

/// Bonus for a knight or bishop on one of its side's near-center squares.
pub const NEAR_CENTER_BONUS: f64 = 0.5;

/// Pawn bonus indexed by rank, first rank at index 0.
///
/// ```text
/// rank:   1     2    3    4    5    6    7    8
/// bonus: -0.5  0.0  0.5  1.0  1.0  0.5  0.0  -0.5
/// ```
pub const PAWN_RANK_BONUS: [f64; 8] = [-0.5, 0.0, 0.5, 1.0, 1.0, 0.5, 0.0, -0.5];

#[must_use]
pub const fn pawn_rank_bonus(rank: Rank) -> f64 {
    PAWN_RANK_BONUS[rank as usize]
}

/// Files a king has to stand on, on its home rank, to count as castled.
pub const CASTLED_KING_FILES: [File; 2] = [File::C, File::G];

/// Bonus for a king on a castled square.
pub const CASTLED_KING_BONUS: f64 = 1.0;

#[must_use]
pub const fn home_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::First,
        Color::Black => Rank::Eighth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_values() {
        assert_eq!(material_value(Role::Pawn), 1);
        assert_eq!(material_value(Role::Knight), 3);
        assert_eq!(material_value(Role::Bishop), 3);
        assert_eq!(material_value(Role::Rook), 5);
        assert_eq!(material_value(Role::Queen), 9);
        assert_eq!(material_value(Role::King), 0);
    }

    #[test]
    fn test_pawn_rank_bonus_is_symmetric() {
        for (rank, mirrored) in Rank::ALL.into_iter().zip(Rank::ALL.into_iter().rev()) {
            assert!((pawn_rank_bonus(rank) - pawn_rank_bonus(mirrored)).abs() < f64::EPSILON);
        }
        assert!((pawn_rank_bonus(Rank::Fourth) - 1.0).abs() < f64::EPSILON);
        assert!((pawn_rank_bonus(Rank::First) + 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_near_center_squares_are_mirrored() {
        for (white, black) in near_center_squares(Color::White)
            .into_iter()
            .zip(near_center_squares(Color::Black))
        {
            assert_eq!(white.flip_vertical(), black);
        }
    }
}
