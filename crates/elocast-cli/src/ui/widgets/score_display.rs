use elocast_evaluator::{SidePair, position::MoveScore};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Per-side terms of the displayed position.
#[derive(Debug)]
pub struct ScoreDisplay<'a> {
    score: &'a MoveScore,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreDisplay<'a> {
    pub fn new(score: &'a MoveScore) -> Self {
        Self { score, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines().len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let position = &self.score.position;
        vec![
            Line::styled(format!("{:<16}{:>8}{:>8}", "", "White", "Black"), style::LABEL),
            row("Material", self.score.material.map(f64::from)),
            row("Activity", position.activity),
            row("Pawn structure", position.pawn_structure),
            row("King safety", position.king_safety),
            row("Total", self.score.total()),
        ]
    }
}

fn row(label: &'static str, value: SidePair<f64>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), style::LABEL),
        Span::styled(format!("{:>8.1}{:>8.1}", value.white, value.black), style::VALUE),
    ])
}

impl Widget for ScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        for (line, row) in self.lines().into_iter().zip(area.rows()) {
            line.render(row, buf);
        }
    }
}
