//! Rating prediction from game features.
//!
//! - [`feature`] - Assembles the fixed-order [`FeatureVector`](feature::FeatureVector) from
//!   game metadata and the performance percentages computed by `elocast-evaluator`
//! - [`model`] - The [`RatingModel`](model::RatingModel) seam and the JSON-backed
//!   [`LinearRatingModel`](model::LinearRatingModel)
//!
//! Models are fitted elsewhere; this crate only loads and applies them.

pub mod feature;
pub mod model;
