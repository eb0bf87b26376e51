use elocast_game::{AppliedMove, shakmaty::Color};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Paragraph, Widget},
};

use crate::ui::widgets::style;

/// Applied moves in numbered pairs, the move leading to the displayed position highlighted.
#[derive(Debug)]
pub struct MoveListDisplay<'a> {
    moves: &'a [AppliedMove],
    first_mover: Color,
    first_move_number: u32,
    current: Option<usize>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> MoveListDisplay<'a> {
    pub fn new(moves: &'a [AppliedMove]) -> Self {
        Self {
            moves,
            first_mover: Color::White,
            first_move_number: 1,
            current: None,
            block: None,
        }
    }

    /// Side to move and move number of the initial position.
    pub fn start(self, first_mover: Color, first_move_number: u32) -> Self {
        Self {
            first_mover,
            first_move_number,
            ..self
        }
    }

    /// Highlights `moves[index]`.
    pub fn current(self, index: Option<usize>) -> Self {
        Self {
            current: index,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// One line per move number, and the line holding the current move.
    fn lines(&self) -> (Vec<Line<'a>>, usize) {
        // a game starting with black to move gets a leading "N..." line
        let offset = usize::from(self.first_mover == Color::Black);
        let mut lines = vec![];
        let mut current_line = 0;

        for (index, applied) in self.moves.iter().enumerate() {
            let slot = index + offset;
            let line_index = slot / 2;
            if line_index == lines.len() {
                let number = self.first_move_number as usize + line_index;
                let mut line = Line::from(Span::styled(format!("{number:>3}. "), style::LABEL));
                if slot % 2 == 1 {
                    line.push_span(Span::styled(format!("{:<8}", "..."), style::LABEL));
                }
                lines.push(line);
            }

            let style = if self.current == Some(index) {
                current_line = line_index;
                style::CURRENT
            } else {
                style::VALUE
            };
            lines[line_index].push_span(Span::styled(format!("{:<7}", applied.san), style));
            if slot % 2 == 0 {
                lines[line_index].push_span(Span::from(" "));
            }
        }

        (lines, current_line)
    }
}

impl Widget for MoveListDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let (lines, current_line) = self.lines();
        let scroll = current_line.saturating_sub(usize::from(area.height) / 2);
        Paragraph::new(lines)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use elocast_game::{MoveToken, Replay, shakmaty::Chess};

    use super::*;

    fn moves(sans: &[&str]) -> Vec<AppliedMove> {
        let tokens: Vec<_> = sans.iter().copied().map(MoveToken::new).collect();
        Replay::new(Chess::default(), &tokens).moves().to_vec()
    }

    #[test]
    fn test_moves_are_paired() {
        let moves = moves(&["e4", "e5", "Nf3"]);
        let (lines, current) = MoveListDisplay::new(&moves).current(Some(2)).lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string().trim_end(), "  1. e4      e5");
        assert_eq!(lines[1].to_string().trim_end(), "  2. Nf3");
        assert_eq!(current, 1);
    }

    #[test]
    fn test_black_to_move_first() {
        let moves = moves(&["e4"]);
        let (lines, _) = MoveListDisplay::new(&moves)
            .start(Color::Black, 12)
            .lines();
        assert_eq!(lines[0].to_string().trim_end(), " 12. ...     e4");
    }
}
