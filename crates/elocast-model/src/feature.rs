//! Feature vector consumed by rating models.
//!
//! The vector has a fixed order, matching the columns the models were fitted on:
//!
//! | # | column              | kind        | source                                   |
//! |---|---------------------|-------------|------------------------------------------|
//! | 0 | `Num_Moves`         | numeric     | applied mainline plies                   |
//! | 1 | `Max_Move_Length`   | numeric     | longest UCI move text (`e7e8q` = 5)      |
//! | 2 | `TimeControl`       | categorical | `TimeControl` header                     |
//! | 3 | `White_Performance` | numeric     | white performance percentage             |
//! | 4 | `Black_Performance` | numeric     | black performance percentage             |
//! | 5 | `WhiteElo`          | numeric     | `WhiteElo` header                        |
//! | 6 | `BlackElo`          | numeric     | `BlackElo` header                        |
//! | 7 | `White_Wins`        | numeric     | 1 if the result is `1-0`                 |
//! | 8 | `Black_Wins`        | numeric     | 1 if the result is `0-1`                 |
//! | 9 | `Draw`              | numeric     | 1 otherwise                              |
//! | 10| `WhiteRatingDiff`   | numeric     | `WhiteRatingDiff` header                 |
//! | 11| `BlackRatingDiff`   | numeric     | `BlackRatingDiff` header                 |
//! | 12| `ECO`               | categorical | `ECO` header, `Unknown` when absent      |
//! | 13| `Opening`           | categorical | `Opening` header, `Unknown` when absent  |

use std::{fmt, str::FromStr};

use elocast_evaluator::game::GameEvaluation;
use elocast_game::GameMetadata;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap as _};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum FeatureKind {
    #[display("numeric")]
    Numeric,
    #[display("categorical")]
    Categorical,
}

/// A column of the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "Num_Moves")]
    NumMoves,
    #[serde(rename = "Max_Move_Length")]
    MaxMoveLength,
    #[serde(rename = "TimeControl")]
    TimeControl,
    #[serde(rename = "White_Performance")]
    WhitePerformance,
    #[serde(rename = "Black_Performance")]
    BlackPerformance,
    #[serde(rename = "WhiteElo")]
    WhiteElo,
    #[serde(rename = "BlackElo")]
    BlackElo,
    #[serde(rename = "White_Wins")]
    WhiteWins,
    #[serde(rename = "Black_Wins")]
    BlackWins,
    #[serde(rename = "Draw")]
    Draw,
    #[serde(rename = "WhiteRatingDiff")]
    WhiteRatingDiff,
    #[serde(rename = "BlackRatingDiff")]
    BlackRatingDiff,
    #[serde(rename = "ECO")]
    Eco,
    #[serde(rename = "Opening")]
    Opening,
}

impl Feature {
    pub const LEN: usize = 14;

    /// All columns, in vector order.
    pub const ALL: [Feature; Self::LEN] = [
        Feature::NumMoves,
        Feature::MaxMoveLength,
        Feature::TimeControl,
        Feature::WhitePerformance,
        Feature::BlackPerformance,
        Feature::WhiteElo,
        Feature::BlackElo,
        Feature::WhiteWins,
        Feature::BlackWins,
        Feature::Draw,
        Feature::WhiteRatingDiff,
        Feature::BlackRatingDiff,
        Feature::Eco,
        Feature::Opening,
    ];

    /// Column name used in model files and JSON output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Feature::NumMoves => "Num_Moves",
            Feature::MaxMoveLength => "Max_Move_Length",
            Feature::TimeControl => "TimeControl",
            Feature::WhitePerformance => "White_Performance",
            Feature::BlackPerformance => "Black_Performance",
            Feature::WhiteElo => "WhiteElo",
            Feature::BlackElo => "BlackElo",
            Feature::WhiteWins => "White_Wins",
            Feature::BlackWins => "Black_Wins",
            Feature::Draw => "Draw",
            Feature::WhiteRatingDiff => "WhiteRatingDiff",
            Feature::BlackRatingDiff => "BlackRatingDiff",
            Feature::Eco => "ECO",
            Feature::Opening => "Opening",
        }
    }

    #[must_use]
    pub const fn kind(self) -> FeatureKind {
        match self {
            Feature::TimeControl | Feature::Eco | Feature::Opening => FeatureKind::Categorical,
            _ => FeatureKind::Numeric,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Column names, in vector order.
pub const FEATURE_NAMES: [&str; Feature::LEN] = {
    let mut names = [""; Feature::LEN];
    let mut i = 0;
    while i < Feature::LEN {
        names[i] = Feature::ALL[i].name();
        i += 1;
    }
    names
};

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown feature column {_0:?}")]
pub struct ParseFeatureError(#[error(not(source))] String);

impl FromStr for Feature {
    type Err = ParseFeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| ParseFeatureError(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(String),
}

impl FeatureValue {
    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureValue::Numeric(_) => FeatureKind::Numeric,
            FeatureValue::Categorical(_) => FeatureKind::Categorical,
        }
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            FeatureValue::Numeric(value) => Some(*value),
            FeatureValue::Categorical(_) => None,
        }
    }

    #[must_use]
    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            FeatureValue::Numeric(_) => None,
            FeatureValue::Categorical(value) => Some(value),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Numeric(value) => write!(f, "{value}"),
            FeatureValue::Categorical(value) => f.write_str(value),
        }
    }
}

/// Values for every [`Feature`], in [`Feature::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [FeatureValue; Feature::LEN],
}

impl FeatureVector {
    /// Builds the feature vector of a game from its metadata and evaluation.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn assemble(metadata: &GameMetadata, evaluation: &GameEvaluation) -> Self {
        let plies = evaluation.plies();
        let max_move_length = plies
            .iter()
            .map(|ply| ply.applied.uci.len())
            .max()
            .unwrap_or(0);
        let performance = evaluation.performance();
        let outcome = metadata.result.outcome_flags();

        let value = |feature: Feature| -> FeatureValue {
            use FeatureValue::{Categorical, Numeric};
            match feature {
                Feature::NumMoves => Numeric(plies.len() as f64),
                Feature::MaxMoveLength => Numeric(max_move_length as f64),
                Feature::TimeControl => Categorical(metadata.time_control.clone()),
                Feature::WhitePerformance => Numeric(performance.white),
                Feature::BlackPerformance => Numeric(performance.black),
                Feature::WhiteElo => Numeric(f64::from(metadata.white_elo)),
                Feature::BlackElo => Numeric(f64::from(metadata.black_elo)),
                Feature::WhiteWins => Numeric(f64::from(outcome.white_wins)),
                Feature::BlackWins => Numeric(f64::from(outcome.black_wins)),
                Feature::Draw => Numeric(f64::from(outcome.draw)),
                Feature::WhiteRatingDiff => Numeric(metadata.white_rating_diff),
                Feature::BlackRatingDiff => Numeric(metadata.black_rating_diff),
                Feature::Eco => Categorical(metadata.eco.clone()),
                Feature::Opening => Categorical(metadata.opening.clone()),
            }
        };

        Self {
            values: Feature::ALL.map(value),
        }
    }

    #[must_use]
    pub fn get(&self, feature: Feature) -> &FeatureValue {
        &self.values[feature.index()]
    }

    #[must_use]
    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &FeatureValue)> + '_ {
        Feature::ALL.into_iter().zip(&self.values)
    }
}

impl Serialize for FeatureVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Feature::LEN))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.name(), value)?;
        }
        map.end()
    }
}
