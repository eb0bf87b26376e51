use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use shakmaty::{CastlingMode, Chess, fen::Fen, san::San};

use crate::{GameMetadata, MetadataError};

/// Errors raised while preparing a recorded game for evaluation.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum GameError {
    #[display("invalid FEN setup {fen:?}: {reason}")]
    InvalidFen {
        fen: String,
        reason: String,
    },
    #[display("SetUp header is \"1\" but the FEN header is missing")]
    MissingFen,
}

/// A single move as written in the mainline of a game record.
///
/// The text is kept verbatim (minus move numbers and annotation suffixes) and only
/// interpreted against a position when the game is played through, so a malformed
/// token does not prevent the rest of the record from being read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveToken {
    text: String,
}

impl MoveToken {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parses the token as standard algebraic notation.
    pub fn san(&self) -> Result<San, shakmaty::san::ParseSanError> {
        self.text.parse()
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A game read from PGN: tag pairs plus the mainline move tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    headers: BTreeMap<String, String>,
    mainline: Vec<MoveToken>,
    termination: Option<String>,
}

impl GameRecord {
    #[must_use]
    pub fn new(
        headers: BTreeMap<String, String>,
        mainline: Vec<MoveToken>,
        termination: Option<String>,
    ) -> Self {
        Self {
            headers,
            mainline,
            termination,
        }
    }

    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn mainline(&self) -> &[MoveToken] {
        &self.mainline
    }

    /// Result token that terminated the movetext (`1-0`, `0-1`, `1/2-1/2` or `*`), if any.
    #[must_use]
    pub fn termination(&self) -> Option<&str> {
        self.termination.as_deref()
    }

    /// Returns the position the mainline starts from.
    ///
    /// This is the standard starting position unless the record carries a `FEN`
    /// header, which is used with or without an accompanying `SetUp "1"`.
    pub fn initial_position(&self) -> Result<Chess, GameError> {
        let set_up = self.header("SetUp") == Some("1");
        let fen = match (self.header("FEN"), set_up) {
            (Some(fen), _) => fen,
            (None, true) => return Err(GameError::MissingFen),
            (None, false) => return Ok(Chess::default()),
        };
        let invalid = |reason: String| GameError::InvalidFen {
            fen: fen.to_owned(),
            reason,
        };
        let parsed: Fen = fen.parse().map_err(|e| invalid(format!("{e}")))?;
        parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))
    }

    /// Extracts the typed metadata needed for rating prediction.
    pub fn metadata(&self) -> Result<GameMetadata, MetadataError> {
        GameMetadata::from_headers(&self.headers)
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::{Color, Position as _, Square};

    use super::*;

    fn record_with_headers(pairs: &[(&str, &str)]) -> GameRecord {
        let headers = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        GameRecord::new(headers, vec![], None)
    }

    #[test]
    fn test_initial_position_defaults_to_start() {
        let record = record_with_headers(&[("Event", "Casual")]);
        let position = record.initial_position().unwrap();
        assert_eq!(position.board(), Chess::default().board());
        assert_eq!(position.turn(), Color::White);
    }

    #[test]
    fn test_initial_position_from_fen_setup() {
        let record = record_with_headers(&[
            ("SetUp", "1"),
            ("FEN", "4k3/8/8/8/8/8/4P3/4K3 b - - 0 1"),
        ]);
        let position = record.initial_position().unwrap();
        assert_eq!(position.turn(), Color::Black);
        assert_eq!(position.board().king_of(Color::White), Some(Square::E1));
    }

    #[test]
    fn test_fen_header_used_without_setup() {
        let record = record_with_headers(&[("FEN", "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")]);
        let position = record.initial_position().unwrap();
        assert_ne!(position.board(), Chess::default().board());
        assert_eq!(position.board().king_of(Color::Black), Some(Square::E8));
        assert_eq!(position.board().occupied().count(), 3);
    }

    #[test]
    fn test_setup_without_fen_fails() {
        let record = record_with_headers(&[("SetUp", "1")]);
        assert!(matches!(
            record.initial_position(),
            Err(GameError::MissingFen)
        ));
    }

    #[test]
    fn test_invalid_fen_fails() {
        let record = record_with_headers(&[("SetUp", "1"), ("FEN", "not a fen")]);
        let err = record.initial_position().unwrap_err();
        assert!(matches!(err, GameError::InvalidFen { .. }), "{err}");
    }

    #[test]
    fn test_move_token_san() {
        assert!(MoveToken::new("Nf3").san().is_ok());
        assert!(MoveToken::new("Qxz9").san().is_err());
    }

    #[test]
    fn test_move_token_serializes_as_string() {
        let json = serde_json::to_string(&MoveToken::new("O-O")).unwrap();
        assert_eq!(json, "\"O-O\"");
    }
}
