use std::path::{Path, PathBuf};

use crossterm::event::{Event, KeyCode};
use elocast_evaluator::{
    SidePair,
    position::{self, MoveScore},
};
use elocast_game::{GameMetadata, PositionStatus, Replay, shakmaty::Position as _};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout},
    style::Color,
    text::{Line, Span},
    widgets::{Block as BlockWidget, Padding, Paragraph},
};

use crate::ui::widgets::{
    BoardDisplay, KeyBinding, KeyBindingDisplay, MoveListDisplay, ScoreDisplay, style,
};

const NO_NEXT_MOVE: &str = "No more moves to show.";
const NO_PREVIOUS_MOVE: &str = "No previous moves to show.";

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["j", "↓"], "Next"),
    (&["k", "↑"], "Previous"),
    (&["l", "→"], "+10"),
    (&["h", "←"], "-10"),
    (&["g", "Home"], "First"),
    (&["G", "End"], "Last"),
    (&["q", "Esc"], "Quit"),
];

/// Rating predicted for the game, shown in the info panel.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub target: String,
    pub value: f64,
}

/// Everything the viewer shows, computed once up front.
#[derive(Debug)]
pub struct GameView {
    pub path: PathBuf,
    pub metadata: GameMetadata,
    pub performance: SidePair<f64>,
    pub prediction: Option<Prediction>,
    replay: Replay,
    scores: Vec<MoveScore>,
}

impl GameView {
    pub fn new(
        path: &Path,
        metadata: GameMetadata,
        replay: Replay,
        performance: SidePair<f64>,
        prediction: Option<Prediction>,
    ) -> Self {
        let scores = (0..=replay.last_index())
            .filter_map(|index| replay.position(index))
            .map(|position| position::evaluate(position.board()))
            .collect();
        Self {
            path: path.to_owned(),
            metadata,
            performance,
            prediction,
            replay,
            scores,
        }
    }
}

#[derive(Debug)]
pub struct GameViewerScreen {
    view: GameView,
    index: usize,
    message: Option<&'static str>,
    should_exit: bool,
}

impl GameViewerScreen {
    pub fn new(view: GameView) -> Self {
        Self {
            view,
            index: 0,
            message: None,
            should_exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let top_block = BlockWidget::bordered()
            .title(format!("Game: {}", self.view.path.display()))
            .title_alignment(HorizontalAlignment::Center);
        let viewport = frame
            .area()
            .centered(Constraint::Max(120), Constraint::Max(40));
        let inner = top_block.inner(viewport);
        frame.render_widget(top_block, viewport);

        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let (Some(position), Some(score)) = (
            self.replay().position(self.index),
            self.view.scores.get(self.index),
        ) else {
            return;
        };

        let board = BoardDisplay::new(position.board())
            .last_move(self.replay().last_move(self.index).map(|mv| mv.uci.as_str()))
            .block(panel("Board"));
        let [left_area, info_area, moves_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Fill(1),
            Constraint::Length(24),
        ])
        .areas(main_area);

        let scores = ScoreDisplay::new(score).block(panel("Position"));
        let [board_area, score_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(scores.height()),
        ])
        .areas(left_area);

        let initial = self.replay().position(0).unwrap_or(position);
        let moves = MoveListDisplay::new(self.replay().moves())
            .start(initial.turn(), initial.fullmoves().get())
            .current(self.index.checked_sub(1))
            .block(panel("Moves"));

        let info = Paragraph::new(self.info_lines()).block(panel("Game"));
        let status = Line::from(self.status_text()).style(Color::Yellow).centered();

        frame.render_widget(board, board_area);
        frame.render_widget(scores, score_area);
        frame.render_widget(info, info_area);
        frame.render_widget(moves, moves_area);
        frame.render_widget(status, status_area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }

    fn info_lines(&self) -> Vec<Line<'_>> {
        let metadata = &self.view.metadata;
        let player = |name: Option<&str>, elo: u32, diff: f64| {
            format!("{} ({elo}, {diff:+})", name.unwrap_or("?"))
        };
        let white = player(
            metadata.white.as_deref(),
            metadata.white_elo,
            metadata.white_rating_diff,
        );
        let black = player(
            metadata.black.as_deref(),
            metadata.black_elo,
            metadata.black_rating_diff,
        );
        let mut lines = vec![
            info_line("White", white),
            info_line("Black", black),
            info_line("Result", metadata.result.to_string()),
            info_line("Time", metadata.time_control.clone()),
            info_line("Opening", format!("{} {}", metadata.eco, metadata.opening)),
        ];
        if let Some(event) = &metadata.event {
            lines.push(info_line("Event", event.clone()));
        }
        if let Some(date) = &metadata.date {
            lines.push(info_line("Date", date.clone()));
        }
        lines.push(Line::default());
        lines.push(info_line(
            "Perf.",
            format!(
                "{:.2}% / {:.2}%",
                self.view.performance.white, self.view.performance.black
            ),
        ));
        if let Some(prediction) = &self.view.prediction {
            lines.push(info_line(
                "Predicted",
                format!("{} {:.0}", prediction.target, prediction.value),
            ));
        }
        lines.push(Line::default());
        lines.push(info_line(
            "Ply",
            format!("{}/{}", self.index, self.replay().last_index()),
        ));
        let status = self.replay().status(self.index).unwrap_or(PositionStatus::Normal);
        if !status.is_normal() {
            lines.push(info_line("Status", status.to_string()));
        }
        let skipped = self.replay().skipped().len();
        if skipped > 0 {
            lines.push(info_line("Skipped", format!("{skipped} illegal moves")));
        }
        lines
    }

    fn status_text(&self) -> String {
        if let Some(message) = self.message {
            return message.to_owned();
        }
        match self.replay().last_move(self.index) {
            Some(applied) => format!("Ply {}: {}", self.index, applied.san),
            None => "Initial position".to_owned(),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('j') | KeyCode::Down => self.step_forward(1),
                KeyCode::Char('k') | KeyCode::Up => self.step_backward(1),
                KeyCode::Char('l') | KeyCode::Right => self.step_forward(10),
                KeyCode::Char('h') | KeyCode::Left => self.step_backward(10),
                KeyCode::Char('g') | KeyCode::Home => self.jump_to(0),
                KeyCode::Char('G') | KeyCode::End => self.jump_to(self.replay().last_index()),
                KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
                _ => {}
            }
        }
    }

    fn replay(&self) -> &Replay {
        &self.view.replay
    }

    fn step_forward(&mut self, amount: usize) {
        let last = self.replay().last_index();
        if self.index == last {
            self.message = Some(NO_NEXT_MOVE);
            return;
        }
        self.jump_to(usize::min(self.index + amount, last));
    }

    fn step_backward(&mut self, amount: usize) {
        if self.index == 0 {
            self.message = Some(NO_PREVIOUS_MOVE);
            return;
        }
        self.jump_to(self.index.saturating_sub(amount));
    }

    fn jump_to(&mut self, index: usize) {
        self.index = index;
        self.message = None;
    }
}

fn panel(title: &str) -> BlockWidget<'_> {
    BlockWidget::bordered()
        .title(title)
        .padding(Padding::horizontal(1))
}

fn info_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), style::LABEL),
        Span::styled(value, style::VALUE),
    ])
}
