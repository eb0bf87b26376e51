use clap::{Parser, Subcommand};

use self::{
    evaluate::EvaluateArg, features::FeaturesArg, predict::PredictArg, view::ViewArg,
};

mod evaluate;
mod features;
mod predict;
mod view;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Predict a rating from a game record
    Predict(#[clap(flatten)] PredictArg),
    /// Print the performance percentages of a game
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Write the feature vector of a game as JSON
    Features(#[clap(flatten)] FeaturesArg),
    /// Step through a game with TUI
    View(#[clap(flatten)] ViewArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Predict(arg) => predict::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::Features(arg) => features::run(&arg)?,
        Mode::View(arg) => view::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_args() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_game_defaults_to_first() {
        let args = CommandArgs::try_parse_from(["elocast", "evaluate", "game.pgn"]).unwrap();
        let Mode::Evaluate(arg) = args.mode else {
            panic!("expected evaluate mode");
        };
        assert_eq!(arg.game, 1);
    }

    #[test]
    fn test_predict_requires_model() {
        assert!(CommandArgs::try_parse_from(["elocast", "predict", "game.pgn"]).is_err());
        assert!(
            CommandArgs::try_parse_from(["elocast", "predict", "game.pgn", "--model", "m.json"])
                .is_ok()
        );
    }
}
