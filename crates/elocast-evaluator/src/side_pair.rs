use serde::{Deserialize, Serialize};
use shakmaty::Color;

/// A value held once for each side.
///
/// Every evaluation term produces one of these; terms are combined with `+`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::AddAssign,
)]
pub struct SidePair<T> {
    pub white: T,
    pub black: T,
}

impl<T> SidePair<T> {
    #[must_use]
    pub const fn new(white: T, black: T) -> Self {
        Self { white, black }
    }

    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn get_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    #[must_use]
    pub fn map<U, F>(self, mut f: F) -> SidePair<U>
    where
        F: FnMut(T) -> U,
    {
        SidePair {
            white: f(self.white),
            black: f(self.black),
        }
    }
}

impl SidePair<f64> {
    #[must_use]
    pub fn sum(self) -> f64 {
        self.white + self.black
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_per_side() {
        let mut pair = SidePair::new(1.0, 2.0) + SidePair::new(0.5, -1.0);
        assert_eq!(pair, SidePair::new(1.5, 1.0));
        pair += SidePair::new(1.0, 1.0);
        assert_eq!(pair, SidePair::new(2.5, 2.0));
        assert!((pair.sum() - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_get_by_color() {
        let mut pair = SidePair::new(3_u32, 5);
        assert_eq!(*pair.get(Color::White), 3);
        *pair.get_mut(Color::Black) += 1;
        assert_eq!(*pair.get(Color::Black), 6);
        assert_eq!(pair.map(f64::from), SidePair::new(3.0, 6.0));
    }
}
