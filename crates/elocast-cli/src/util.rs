use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use elocast_evaluator::game::{self, GameEvaluation};
use elocast_game::{GameMetadata, GameRecord, SkippedMove, pgn};
use elocast_model::{feature::FeatureVector, model::LinearRatingModel};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Read every game of a PGN file
pub fn read_pgn_file<P>(path: P) -> anyhow::Result<Vec<GameRecord>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read PGN file: {}", path.display()))?;
    let games = pgn::read_games(&text)
        .with_context(|| format!("Failed to parse PGN file: {}", path.display()))?;
    if games.is_empty() {
        bail!("No game found in PGN file: {}", path.display());
    }
    Ok(games)
}

/// Read a rating model from a JSON file
pub fn read_model_file<P>(path: P) -> anyhow::Result<LinearRatingModel>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    eprintln!("Loading model from {}...", path.display());
    let model = LinearRatingModel::open(path)?;
    eprintln!(
        "Loaded model {} (target {}, trained {})",
        model.name,
        model.target,
        model.trained_at.format("%Y-%m-%d")
    );
    Ok(model)
}

/// A game selected from a PGN file, with its metadata checked and its mainline evaluated.
#[derive(Debug)]
pub struct LoadedGame {
    pub record: GameRecord,
    pub metadata: GameMetadata,
    pub evaluation: GameEvaluation,
}

impl LoadedGame {
    pub fn features(&self) -> FeatureVector {
        FeatureVector::assemble(&self.metadata, &self.evaluation)
    }
}

/// Load the `game_number`-th game (1-based) of a PGN file and evaluate it
///
/// Metadata is checked before evaluation starts, so a game missing a required header
/// is rejected without replaying any move. Skipped moves are reported on stderr.
pub fn load_game<P>(path: P, game_number: usize) -> anyhow::Result<LoadedGame>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    eprintln!("Loading games from {}...", path.display());
    let games = read_pgn_file(path)?;
    eprintln!("Loaded {} games", games.len());

    let record = select_game(games, game_number)
        .with_context(|| format!("Failed to select game from {}", path.display()))?;
    let metadata = record
        .metadata()
        .with_context(|| format!("Game {game_number} has incomplete metadata"))?;

    eprintln!("Evaluating {} recorded moves...", record.mainline().len());
    let evaluation = game::evaluate_record(&record)
        .with_context(|| format!("Game {game_number} has an invalid setup"))?;
    report_skipped(evaluation.skipped());
    eprintln!("Evaluated {} moves", evaluation.plies().len());

    Ok(LoadedGame {
        record,
        metadata,
        evaluation,
    })
}

fn select_game(games: Vec<GameRecord>, game_number: usize) -> anyhow::Result<GameRecord> {
    let count = games.len();
    if game_number == 0 || game_number > count {
        bail!("Game {game_number} is out of range (the file holds {count} games)");
    }
    games
        .into_iter()
        .nth(game_number - 1)
        .context("Game index out of range")
}

pub fn report_skipped(skipped: &[SkippedMove]) {
    for skip in skipped {
        eprintln!(
            "Illegal move encountered at ply {}: {} ({}), skipping.",
            skip.ply + 1,
            skip.text(),
            skip.reason
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(count: usize) -> Vec<GameRecord> {
        let text = (0..count)
            .map(|i| format!("[Round \"{i}\"]\n\n1. e4 *\n\n"))
            .collect::<Vec<_>>()
            .concat();
        pgn::read_games(&text).unwrap()
    }

    #[test]
    fn test_select_game_is_one_based() {
        let game = select_game(games(3), 2).unwrap();
        assert_eq!(game.header("Round"), Some("1"));
    }

    #[test]
    fn test_select_game_out_of_range() {
        assert!(select_game(games(2), 0).is_err());
        assert!(select_game(games(2), 3).is_err());
    }
}
