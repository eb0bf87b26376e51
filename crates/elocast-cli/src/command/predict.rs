use std::path::PathBuf;

use anyhow::Context as _;
use elocast_evaluator::SidePair;
use elocast_game::GameMetadata;
use elocast_model::{
    feature::{Feature, FeatureVector},
    model::RatingModel as _,
};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PredictArg {
    /// Path to the game record (PGN format)
    pgn_file: PathBuf,
    /// Path to the model file (JSON format)
    #[clap(long)]
    model: PathBuf,
    /// Which game of the file to use (1-based)
    #[clap(long, default_value_t = 1)]
    game: usize,
    /// Print the prediction as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct PredictionReport<'a> {
    model: &'a str,
    target: &'a str,
    prediction: f64,
    performance: SidePair<f64>,
    metadata: &'a GameMetadata,
    features: &'a FeatureVector,
}

pub(crate) fn run(arg: &PredictArg) -> anyhow::Result<()> {
    let PredictArg {
        pgn_file,
        model,
        game,
        json,
    } = arg;

    let model = util::read_model_file(model)?;
    let loaded = util::load_game(pgn_file, *game)?;
    let features = loaded.features();

    let prediction = model
        .predict(&features)
        .with_context(|| format!("Model {} cannot score game {game}", model.name))?;

    if *json {
        let report = PredictionReport {
            model: &model.name,
            target: &model.target,
            prediction,
            performance: loaded.evaluation.performance(),
            metadata: &loaded.metadata,
            features: &features,
        };
        return Output::stdout().write_json(report);
    }

    let metadata = &loaded.metadata;
    let numeric = |feature| features.get(feature).as_numeric().unwrap_or_default();
    let performance = loaded.evaluation.performance();

    println!("Predicted {}: {prediction:.0}", model.target);
    println!();
    println!(
        "White:        {} ({})",
        metadata.white.as_deref().unwrap_or("?"),
        metadata.white_elo
    );
    println!(
        "Black:        {} ({})",
        metadata.black.as_deref().unwrap_or("?"),
        metadata.black_elo
    );
    println!("Result:       {}", metadata.result);
    println!("Time control: {}", metadata.time_control);
    println!("Opening:      {} {}", metadata.eco, metadata.opening);
    println!("Moves:        {}", numeric(Feature::NumMoves));
    println!(
        "Performance:  white {:.2}% / black {:.2}%",
        performance.white, performance.black
    );
    println!(
        "Outcome:      white wins {}, black wins {}, draw {}",
        numeric(Feature::WhiteWins),
        numeric(Feature::BlackWins),
        numeric(Feature::Draw)
    );

    Ok(())
}
