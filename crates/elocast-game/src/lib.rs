//! Chess game records and board state handling.
//!
//! This crate wraps [`shakmaty`] (the board state provider) with the pieces needed to walk a
//! recorded game:
//!
//! - [`pgn`] - Reads PGN text into [`GameRecord`]s (tag pairs and mainline move tokens)
//! - [`GameMetadata`] - Typed view of the headers a rating prediction depends on
//! - [`play_ply`] - Resolves one recorded move against the current position and either
//!   applies it ([`PlyOutcome::Applied`]) or skips it ([`PlyOutcome::Skipped`])
//! - [`Replay`] - Timeline of positions for stepping through a game
//!
//! # Example
//!
//! ```
//! use elocast_game::{PlyOutcome, pgn};
//!
//! let record = pgn::read_game("1. e4 e5 2. Nf3 Qxz9 3. Nc6 *").unwrap();
//! let mut position = record.initial_position().unwrap();
//!
//! let mut applied = 0;
//! for (ply, token) in record.mainline().iter().enumerate() {
//!     match elocast_game::play_ply(&mut position, ply, token) {
//!         PlyOutcome::Applied(_) => applied += 1,
//!         PlyOutcome::Skipped(skipped) => eprintln!("skipping {}", skipped.text()),
//!     }
//! }
//! assert_eq!(applied, 4);
//! ```

pub use self::{metadata::*, ply::*, record::*, replay::*};

pub mod pgn;

mod metadata;
mod ply;
mod record;
mod replay;

pub use shakmaty;
