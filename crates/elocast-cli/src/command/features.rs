use std::path::PathBuf;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FeaturesArg {
    /// Path to the game record (PGN format)
    pgn_file: PathBuf,
    /// Which game of the file to use (1-based)
    #[clap(long, default_value_t = 1)]
    game: usize,
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FeaturesArg) -> anyhow::Result<()> {
    let FeaturesArg {
        pgn_file,
        game,
        output,
    } = arg;

    let loaded = util::load_game(pgn_file, *game)?;
    let features = loaded.features();

    let mut output = Output::from_output_path(output.clone())?;
    eprintln!("Writing features to {}...", output.display_path());
    output.write_json(&features)?;
    eprintln!("Features written");

    Ok(())
}
