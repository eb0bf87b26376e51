//! Rating models.
//!
//! A model maps a [`FeatureVector`] to a predicted rating. The only implementation is
//! [`LinearRatingModel`], a standardized linear regression loaded from JSON:
//!
//! ```text
//! prediction = intercept
//!            + Σ numeric      weight × (x − mean) / scale
//!            + Σ categorical  weights[category]            (0 for unseen categories)
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feature::{Feature, FeatureKind, FeatureVector};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ModelError {
    #[display("failed to open model file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse model file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("column {feature} is {found}, but the model uses it as {expected}")]
    KindMismatch {
        feature: Feature,
        expected: FeatureKind,
        found: FeatureKind,
    },
    #[display("column {feature} has invalid scale {scale}")]
    InvalidScale { feature: Feature, scale: f64 },
    #[display("column {feature} appears in more than one term")]
    DuplicateTerm { feature: Feature },
    #[display("{what} is not a finite number")]
    NonFinite { what: String },
}

/// Maps a feature vector to a predicted rating.
pub trait RatingModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

fn default_scale() -> f64 {
    1.0
}

/// Standardized linear term over a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    pub feature: Feature,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub weight: f64,
}

impl NumericTerm {
    fn contribution(&self, value: f64) -> f64 {
        self.weight * (value - self.mean) / self.scale
    }
}

/// One-hot encoded term over a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalTerm {
    pub feature: Feature,
    pub weights: BTreeMap<String, f64>,
}

impl CategoricalTerm {
    fn contribution(&self, category: &str) -> f64 {
        self.weights.get(category).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRatingModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Column the model was fitted to predict.
    pub target: String,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: Vec<NumericTerm>,
    #[serde(default)]
    pub categorical: Vec<CategoricalTerm>,
}

impl LinearRatingModel {
    /// Reads and validates a model from a JSON file.
    pub fn open<P>(path: P) -> Result<Self, ModelError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_owned(),
            source,
        })?;
        let model: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ModelError::Parse {
                path: path.to_owned(),
                source,
            }
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Checks that every term refers to a column of the right kind exactly once and that
    /// all coefficients are usable.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_finite("intercept", self.intercept)?;

        let mut seen = BTreeSet::new();
        let terms = self
            .numeric
            .iter()
            .map(|term| (term.feature, FeatureKind::Numeric))
            .chain(
                self.categorical
                    .iter()
                    .map(|term| (term.feature, FeatureKind::Categorical)),
            );
        for (feature, expected) in terms {
            if feature.kind() != expected {
                return Err(ModelError::KindMismatch {
                    feature,
                    expected,
                    found: feature.kind(),
                });
            }
            if !seen.insert(feature) {
                return Err(ModelError::DuplicateTerm { feature });
            }
        }

        for term in &self.numeric {
            if !term.scale.is_finite() || term.scale == 0.0 {
                return Err(ModelError::InvalidScale {
                    feature: term.feature,
                    scale: term.scale,
                });
            }
            check_finite(&format!("mean of {}", term.feature), term.mean)?;
            check_finite(&format!("weight of {}", term.feature), term.weight)?;
        }
        for term in &self.categorical {
            for (category, weight) in &term.weights {
                check_finite(
                    &format!("weight of {} = {category:?}", term.feature),
                    *weight,
                )?;
            }
        }
        Ok(())
    }
}

fn check_finite(what: &str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonFinite {
            what: what.to_owned(),
        })
    }
}

impl RatingModel for LinearRatingModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let mut prediction = self.intercept;

        for term in &self.numeric {
            let value = features.get(term.feature);
            let x = value.as_numeric().ok_or(ModelError::KindMismatch {
                feature: term.feature,
                expected: FeatureKind::Numeric,
                found: value.kind(),
            })?;
            prediction += term.contribution(x);
        }
        for term in &self.categorical {
            let value = features.get(term.feature);
            let category = value.as_categorical().ok_or(ModelError::KindMismatch {
                feature: term.feature,
                expected: FeatureKind::Categorical,
                found: value.kind(),
            })?;
            prediction += term.contribution(category);
        }

        check_finite("prediction", prediction)?;
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use elocast_evaluator::game::evaluate_game;
    use elocast_game::{GameMetadata, GameResult, MoveToken, shakmaty::Chess};

    use super::*;

    fn features() -> FeatureVector {
        let metadata = GameMetadata {
            result: GameResult::WhiteWins,
            white_elo: 1800,
            black_elo: 1750,
            white_rating_diff: 6.0,
            black_rating_diff: -6.0,
            time_control: "600+0".to_owned(),
            eco: "C20".to_owned(),
            opening: "King's Pawn Game".to_owned(),
            white: None,
            black: None,
            event: None,
            date: None,
        };
        let moves: Vec<_> = ["e4", "e5"].into_iter().map(MoveToken::new).collect();
        FeatureVector::assemble(&metadata, &evaluate_game(Chess::default(), &moves))
    }

    fn model(json: &str) -> LinearRatingModel {
        serde_json::from_str(json).unwrap()
    }

    const MODEL_JSON: &str = r#"{
        "name": "test",
        "trained_at": "2024-03-01T12:00:00Z",
        "target": "WhiteElo",
        "intercept": 1500.0,
        "numeric": [
            { "feature": "BlackElo", "mean": 1700.0, "scale": 100.0, "weight": 50.0 },
            { "feature": "White_Wins", "weight": 20.0 }
        ],
        "categorical": [
            { "feature": "TimeControl", "weights": { "600+0": 10.0, "60+0": -30.0 } },
            { "feature": "ECO", "weights": { "B01": 5.0 } }
        ]
    }"#;

    #[test]
    fn test_predict() {
        let model = model(MODEL_JSON);
        model.validate().unwrap();
        // 1500 + 50 × (1750 − 1700) / 100 + 20 × 1 + 10 + 0 (unseen ECO)
        let prediction = model.predict(&features()).unwrap();
        assert!((prediction - 1555.0).abs() < 1e-9, "{prediction}");
    }

    #[test]
    fn test_scale_defaults_to_one() {
        let model = model(MODEL_JSON);
        assert!((model.numeric[1].scale - 1.0).abs() < f64::EPSILON);
        assert!(model.numeric[1].mean.abs() < f64::EPSILON);
    }

    #[test]
    fn test_intercept_only() {
        let model = model(
            r#"{"name": "flat", "trained_at": "2024-03-01T12:00:00Z",
                "target": "WhiteElo", "intercept": 1234.5}"#,
        );
        model.validate().unwrap();
        assert!((model.predict(&features()).unwrap() - 1234.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let result = serde_json::from_str::<LinearRatingModel>(
            r#"{"name": "bad", "trained_at": "2024-03-01T12:00:00Z", "target": "WhiteElo",
                "intercept": 0.0, "numeric": [{ "feature": "Moves", "weight": 1.0 }]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_kind_mismatch() {
        let mut model = model(MODEL_JSON);
        model.numeric.push(NumericTerm {
            feature: Feature::Opening,
            mean: 0.0,
            scale: 1.0,
            weight: 1.0,
        });
        assert!(matches!(
            model.validate(),
            Err(ModelError::KindMismatch {
                feature: Feature::Opening,
                expected: FeatureKind::Numeric,
                found: FeatureKind::Categorical,
            })
        ));

        let mut model = self::model(MODEL_JSON);
        model.categorical.push(CategoricalTerm {
            feature: Feature::NumMoves,
            weights: BTreeMap::new(),
        });
        assert!(matches!(
            model.validate(),
            Err(ModelError::KindMismatch {
                feature: Feature::NumMoves,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        for scale in [0.0, f64::NAN, f64::INFINITY] {
            let mut model = model(MODEL_JSON);
            model.numeric[0].scale = scale;
            assert!(matches!(
                model.validate(),
                Err(ModelError::InvalidScale {
                    feature: Feature::BlackElo,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_validate_rejects_duplicate_term() {
        let mut model = model(MODEL_JSON);
        let duplicate = model.numeric[0].clone();
        model.numeric.push(duplicate);
        assert!(matches!(
            model.validate(),
            Err(ModelError::DuplicateTerm {
                feature: Feature::BlackElo
            })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_weight() {
        let mut model = model(MODEL_JSON);
        model.categorical[0]
            .weights
            .insert("180+0".to_owned(), f64::INFINITY);
        let err = model.validate().unwrap_err();
        assert!(err.is_non_finite(), "{err}");
        assert!(err.to_string().contains("TimeControl"));
    }

    #[test]
    fn test_unvalidated_model_reports_mismatch_on_predict() {
        let mut model = model(MODEL_JSON);
        model.categorical.push(CategoricalTerm {
            feature: Feature::WhiteElo,
            weights: BTreeMap::new(),
        });
        assert!(matches!(
            model.predict(&features()),
            Err(ModelError::KindMismatch {
                feature: Feature::WhiteElo,
                ..
            })
        ));
    }

    #[test]
    fn test_sample_model_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/sample-linear.json");
        let model = LinearRatingModel::open(path).unwrap();
        let prediction = model.predict(&features()).unwrap();
        assert!(prediction > 0.0);
    }

    #[test]
    fn test_open_missing_file() {
        let err = LinearRatingModel::open("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
