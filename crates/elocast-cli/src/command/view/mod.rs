use std::path::PathBuf;

use anyhow::Context as _;
use elocast_game::Replay;
use elocast_model::model::RatingModel as _;

use crate::{
    command::view::{
        app::ViewApp,
        screens::{GameView, Prediction},
    },
    tui::Tui,
    util,
};

mod app;
mod screens;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ViewArg {
    /// Path to the game record (PGN format)
    pgn_file: PathBuf,
    /// Path to a model file (JSON format) to show a prediction with
    #[clap(long)]
    model: Option<PathBuf>,
    /// Which game of the file to view (1-based)
    #[clap(long, default_value_t = 1)]
    game: usize,
}

pub(crate) fn run(arg: &ViewArg) -> anyhow::Result<()> {
    let ViewArg {
        pgn_file,
        model,
        game,
    } = arg;

    let model = model.as_ref().map(util::read_model_file).transpose()?;
    let loaded = util::load_game(pgn_file, *game)?;

    let prediction = model
        .map(|model| -> anyhow::Result<_> {
            let value = model
                .predict(&loaded.features())
                .with_context(|| format!("Model {} cannot score game {game}", model.name))?;
            Ok(Prediction {
                target: model.target,
                value,
            })
        })
        .transpose()?;

    eprintln!("Building replay...");
    let initial = loaded.record.initial_position()?;
    let replay = Replay::new(initial, loaded.record.mainline());
    eprintln!("Replay built: {} positions", replay.last_index() + 1);

    let view = GameView::new(
        pgn_file,
        loaded.metadata,
        replay,
        loaded.evaluation.performance(),
        prediction,
    );
    let mut app = ViewApp::new(view);
    Tui::new().run(&mut app)?;

    Ok(())
}
