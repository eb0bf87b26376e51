//! Reader for Portable Game Notation.
//!
//! Only what rating prediction needs is kept: the tag pairs and the mainline moves.
//! Comments (`{...}` and `;` to end of line), `%` escape lines, variations (nested
//! `(...)`), numeric annotation glyphs (`$n`), move numbers and suffix annotations
//! (`+`, `#`, `!`, `?`) are dropped while reading. A result token (`1-0`, `0-1`,
//! `1/2-1/2`, `*`) terminates a game.
//!
//! Move tokens are not validated here; see [`crate::play_ply`].

use std::{collections::BTreeMap, mem};

use crate::{GameRecord, MoveToken};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PgnError {
    #[display("line {line}: invalid tag pair: {text}")]
    InvalidTag { line: usize, text: String },
    #[display("no game found in PGN input")]
    NoGame,
}

/// Reads the first game of a PGN document.
pub fn read_game(text: &str) -> Result<GameRecord, PgnError> {
    read_games(text)?.into_iter().next().ok_or(PgnError::NoGame)
}

/// Reads every game of a PGN document, in order.
pub fn read_games(text: &str) -> Result<Vec<GameRecord>, PgnError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut games = vec![];
    let mut game = GameBuilder::default();
    let mut scanner = MovetextScanner::default();

    for (index, line) in text.lines().enumerate() {
        if line.starts_with('%') {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with('[') && scanner.at_top_level() {
            if game.has_movetext() {
                games.push(mem::take(&mut game).build());
            }
            let (key, value) = parse_tag_pair(trimmed).ok_or_else(|| PgnError::InvalidTag {
                line: index + 1,
                text: trimmed.to_owned(),
            })?;
            game.headers.insert(key, value);
            continue;
        }

        for token in scanner.feed_line(line) {
            if game.termination.is_some() {
                games.push(mem::take(&mut game).build());
            }
            game.push_token(&token);
        }
    }

    if !game.is_empty() {
        games.push(game.build());
    }
    Ok(games)
}

#[derive(Debug, Default)]
struct GameBuilder {
    headers: BTreeMap<String, String>,
    mainline: Vec<MoveToken>,
    termination: Option<String>,
}

impl GameBuilder {
    fn has_movetext(&self) -> bool {
        !self.mainline.is_empty() || self.termination.is_some()
    }

    fn is_empty(&self) -> bool {
        self.headers.is_empty() && !self.has_movetext()
    }

    fn push_token(&mut self, token: &str) {
        if is_result_token(token) {
            self.termination = Some(token.to_owned());
            return;
        }
        // NAGs, and the `...` some writers put between a move number and black's move
        if token.starts_with('$') || token.chars().all(|c| c == '.') {
            return;
        }
        let mv = match trim_annotation_suffix(strip_move_number(token)) {
            "0-0" => "O-O",
            "0-0-0" => "O-O-O",
            mv => mv,
        };
        if !mv.is_empty() {
            self.mainline.push(MoveToken::new(mv));
        }
    }

    fn build(self) -> GameRecord {
        GameRecord::new(self.headers, self.mainline, self.termination)
    }
}

/// Splits movetext into top-level tokens, carrying comment and variation state across lines.
#[derive(Debug, Default)]
struct MovetextScanner {
    in_brace_comment: bool,
    variation_depth: usize,
}

impl MovetextScanner {
    fn at_top_level(&self) -> bool {
        !self.in_brace_comment && self.variation_depth == 0
    }

    fn feed_line(&mut self, line: &str) -> Vec<String> {
        let mut tokens = vec![];
        let mut current = String::new();
        let mut flush = |current: &mut String| {
            if !current.is_empty() {
                tokens.push(mem::take(current));
            }
        };

        for ch in line.chars() {
            if self.in_brace_comment {
                if ch == '}' {
                    self.in_brace_comment = false;
                }
                continue;
            }
            match ch {
                '{' => {
                    flush(&mut current);
                    self.in_brace_comment = true;
                }
                ';' => break,
                '(' => {
                    flush(&mut current);
                    self.variation_depth += 1;
                }
                ')' => {
                    flush(&mut current);
                    self.variation_depth = self.variation_depth.saturating_sub(1);
                }
                c if c.is_whitespace() => flush(&mut current),
                c if self.variation_depth == 0 => current.push(c),
                _ => {}
            }
        }
        flush(&mut current);
        tokens
    }
}

fn parse_tag_pair(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    let (key, rest) = inner.split_once(char::is_whitespace)?;
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let quoted = rest.trim().strip_prefix('"')?;
    let mut value = String::new();
    let mut chars = quoted.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => value.push(chars.next()?),
            '"' => {
                return chars
                    .as_str()
                    .trim()
                    .is_empty()
                    .then(|| (key.to_owned(), value));
            }
            c => value.push(c),
        }
    }
    None
}

/// Removes a leading move number (`12.`, `12...`), keeping a move written right after it.
fn strip_move_number(token: &str) -> &str {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < token.len() && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(['+', '#', '!', '?'])
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}
