use std::path::PathBuf;

use elocast_evaluator::{
    SidePair,
    game::{GameEvaluation, PlyEvaluation},
};
use elocast_game::SkippedMove;
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Path to the game record (PGN format)
    pgn_file: PathBuf,
    /// Which game of the file to evaluate (1-based)
    #[clap(long, default_value_t = 1)]
    pub(crate) game: usize,
    /// Print the score of every applied move
    #[clap(long)]
    trace: bool,
    /// Print the evaluation as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct EvaluationReport<'a> {
    performance: SidePair<f64>,
    cumulative: SidePair<f64>,
    applied_moves: usize,
    skipped: &'a [SkippedMove],
    #[serde(skip_serializing_if = "Option::is_none")]
    plies: Option<&'a [PlyEvaluation]>,
}

impl<'a> EvaluationReport<'a> {
    fn new(evaluation: &'a GameEvaluation, trace: bool) -> Self {
        let cumulative = evaluation.cumulative();
        Self {
            performance: evaluation.performance(),
            cumulative: SidePair::new(cumulative.white(), cumulative.black()),
            applied_moves: evaluation.plies().len(),
            skipped: evaluation.skipped(),
            plies: trace.then_some(evaluation.plies()),
        }
    }
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        pgn_file,
        game,
        trace,
        json,
    } = arg;

    let loaded = util::load_game(pgn_file, *game)?;
    let evaluation = &loaded.evaluation;

    if *json {
        return Output::stdout().write_json(EvaluationReport::new(evaluation, *trace));
    }

    if *trace {
        print_trace(evaluation.plies());
        println!();
    }

    let performance = evaluation.performance();
    let cumulative = evaluation.cumulative();
    println!(
        "White: {:6.2}%  (cumulative {:.1})",
        performance.white,
        cumulative.white()
    );
    println!(
        "Black: {:6.2}%  (cumulative {:.1})",
        performance.black,
        cumulative.black()
    );

    Ok(())
}

fn print_trace(plies: &[PlyEvaluation]) {
    println!(
        "{:>4}  {:<8} {:<6} {:>8} {:>8} {:>10} {:>10}",
        "Ply", "SAN", "UCI", "White", "Black", "Cum.White", "Cum.Black"
    );
    for ply in plies {
        let total = ply.score.total();
        println!(
            "{:>4}  {:<8} {:<6} {:>8.1} {:>8.1} {:>10.1} {:>10.1}",
            ply.applied.ply + 1,
            ply.applied.san,
            ply.applied.uci,
            total.white,
            total.black,
            ply.cumulative.white(),
            ply.cumulative.black(),
        );
    }
}
