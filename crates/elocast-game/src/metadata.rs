use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Value used for optional opening headers that are absent from a record.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MetadataError {
    #[display("required header [{header}] is missing")]
    Missing {
        header: &'static str,
    },
    #[display("header [{header} \"{value}\"] is not a valid {expected}")]
    Invalid {
        header: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Recorded result of a game, as written in the `Result` header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum GameResult {
    #[serde(rename = "1-0")]
    WhiteWins,
    #[serde(rename = "0-1")]
    BlackWins,
    #[serde(rename = "1/2-1/2")]
    Draw,
    #[serde(rename = "*")]
    Unfinished,
}

impl GameResult {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unfinished => "*",
        }
    }

    /// Win/loss/draw flags as fed to the rating model.
    ///
    /// A game without a decisive result counts as a draw, unfinished games included.
    #[must_use]
    pub fn outcome_flags(self) -> OutcomeFlags {
        match self {
            GameResult::WhiteWins => OutcomeFlags {
                white_wins: 1,
                black_wins: 0,
                draw: 0,
            },
            GameResult::BlackWins => OutcomeFlags {
                white_wins: 0,
                black_wins: 1,
                draw: 0,
            },
            GameResult::Draw | GameResult::Unfinished => OutcomeFlags {
                white_wins: 0,
                black_wins: 0,
                draw: 1,
            },
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown game result {_0:?}")]
pub struct ParseGameResultError(#[error(not(source))] String);

impl FromStr for GameResult {
    type Err = ParseGameResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-0" => Ok(GameResult::WhiteWins),
            "0-1" => Ok(GameResult::BlackWins),
            "1/2-1/2" => Ok(GameResult::Draw),
            "*" => Ok(GameResult::Unfinished),
            other => Err(ParseGameResultError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeFlags {
    pub white_wins: u8,
    pub black_wins: u8,
    pub draw: u8,
}

/// Game headers used by rating prediction.
///
/// `Result`, both ratings, both rating differences and `TimeControl` are required; a
/// record lacking any of them cannot be scored. `ECO` and `Opening` fall back to
/// [`UNKNOWN`]. Player names, event and date are carried for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub result: GameResult,
    pub white_elo: u32,
    pub black_elo: u32,
    pub white_rating_diff: f64,
    pub black_rating_diff: f64,
    pub time_control: String,
    pub eco: String,
    pub opening: String,
    pub white: Option<String>,
    pub black: Option<String>,
    pub event: Option<String>,
    pub date: Option<String>,
}

impl GameMetadata {
    pub fn from_headers(headers: &BTreeMap<String, String>) -> Result<Self, MetadataError> {
        let optional = |key: &str| headers.get(key).map(|v| v.trim().to_owned());

        Ok(Self {
            result: parse_required(headers, "Result", "game result")?,
            white_elo: parse_required(headers, "WhiteElo", "rating")?,
            black_elo: parse_required(headers, "BlackElo", "rating")?,
            white_rating_diff: parse_required(headers, "WhiteRatingDiff", "rating difference")?,
            black_rating_diff: parse_required(headers, "BlackRatingDiff", "rating difference")?,
            time_control: required(headers, "TimeControl")?.trim().to_owned(),
            eco: optional("ECO").unwrap_or_else(|| UNKNOWN.to_owned()),
            opening: optional("Opening").unwrap_or_else(|| UNKNOWN.to_owned()),
            white: optional("White"),
            black: optional("Black"),
            event: optional("Event"),
            date: optional("UTCDate").or_else(|| optional("Date")),
        })
    }
}

fn required<'a>(
    headers: &'a BTreeMap<String, String>,
    header: &'static str,
) -> Result<&'a str, MetadataError> {
    headers
        .get(header)
        .map(String::as_str)
        .ok_or(MetadataError::Missing { header })
}

fn parse_required<T>(
    headers: &BTreeMap<String, String>,
    header: &'static str,
    expected: &'static str,
) -> Result<T, MetadataError>
where
    T: FromStr,
{
    let value = required(headers, header)?;
    value.trim().parse().map_err(|_| MetadataError::Invalid {
        header,
        value: value.to_owned(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn complete_headers() -> BTreeMap<String, String> {
        headers(&[
            ("Result", "1-0"),
            ("WhiteElo", "1834"),
            ("BlackElo", "1790"),
            ("WhiteRatingDiff", "+6"),
            ("BlackRatingDiff", "-5.5"),
            ("TimeControl", "600+0"),
            ("ECO", "C50"),
            ("Opening", "Italian Game"),
            ("White", "alice"),
        ])
    }

    #[test]
    fn test_complete_headers() {
        let metadata = GameMetadata::from_headers(&complete_headers()).unwrap();
        assert_eq!(metadata.result, GameResult::WhiteWins);
        assert_eq!(metadata.white_elo, 1834);
        assert_eq!(metadata.black_elo, 1790);
        assert!((metadata.white_rating_diff - 6.0).abs() < f64::EPSILON);
        assert!((metadata.black_rating_diff + 5.5).abs() < f64::EPSILON);
        assert_eq!(metadata.time_control, "600+0");
        assert_eq!(metadata.eco, "C50");
        assert_eq!(metadata.opening, "Italian Game");
        assert_eq!(metadata.white.as_deref(), Some("alice"));
        assert_eq!(metadata.black, None);
    }

    #[test]
    fn test_missing_opening_defaults_to_unknown() {
        let mut headers = complete_headers();
        headers.remove("ECO");
        headers.remove("Opening");
        let metadata = GameMetadata::from_headers(&headers).unwrap();
        assert_eq!(metadata.eco, UNKNOWN);
        assert_eq!(metadata.opening, UNKNOWN);
    }

    #[test]
    fn test_missing_required_header_fails() {
        for header in [
            "Result",
            "WhiteElo",
            "BlackElo",
            "WhiteRatingDiff",
            "BlackRatingDiff",
            "TimeControl",
        ] {
            let mut headers = complete_headers();
            headers.remove(header);
            let err = GameMetadata::from_headers(&headers).unwrap_err();
            assert!(
                matches!(err, MetadataError::Missing { header: h } if h == header),
                "unexpected error for {header}: {err}"
            );
        }
    }

    #[test]
    fn test_unparsable_rating_fails() {
        let mut headers = complete_headers();
        headers.insert("BlackElo".to_owned(), "?".to_owned());
        let err = GameMetadata::from_headers(&headers).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Invalid {
                header: "BlackElo",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "header [BlackElo \"?\"] is not a valid rating"
        );
    }

    #[test]
    fn test_game_result_parse() {
        assert_eq!("1-0".parse::<GameResult>().unwrap(), GameResult::WhiteWins);
        assert_eq!("0-1".parse::<GameResult>().unwrap(), GameResult::BlackWins);
        assert_eq!("1/2-1/2".parse::<GameResult>().unwrap(), GameResult::Draw);
        assert_eq!("*".parse::<GameResult>().unwrap(), GameResult::Unfinished);
        assert!("2-0".parse::<GameResult>().is_err());
    }

    #[test]
    fn test_outcome_flags() {
        let flags = GameResult::BlackWins.outcome_flags();
        assert_eq!((flags.white_wins, flags.black_wins, flags.draw), (0, 1, 0));
        let flags = GameResult::Unfinished.outcome_flags();
        assert_eq!((flags.white_wins, flags.black_wins, flags.draw), (0, 0, 1));
    }
}
