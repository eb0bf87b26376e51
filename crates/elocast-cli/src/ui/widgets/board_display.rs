use std::iter;

use elocast_game::shakmaty::{Board, Color, File, Piece, Rank, Role, Square};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

const SQUARE_WIDTH: u16 = 3;
const LABEL_WIDTH: u16 = 2;

/// Chess board, rank 8 at the top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    highlight: Option<[Square; 2]>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            highlight: None,
            block: None,
        }
    }

    /// Highlights the origin and destination squares of a move given as UCI text.
    pub fn last_move(self, uci: Option<&str>) -> Self {
        Self {
            highlight: uci.and_then(move_squares),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        LABEL_WIDTH + 8 * SQUARE_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        8 + 1 + super::block_vertical_margin(self.block.as_ref())
    }

    fn square_style(&self, square: Square) -> Style {
        let highlighted = self
            .highlight
            .is_some_and(|squares| squares.contains(&square));
        match (square.is_light(), highlighted) {
            (true, false) => style::LIGHT_SQUARE,
            (false, false) => style::DARK_SQUARE,
            (true, true) => style::LIGHT_HIGHLIGHT,
            (false, true) => style::DARK_HIGHLIGHT,
        }
    }

    fn rank_line(&self, rank: Rank) -> Line<'static> {
        let label = Span::styled(format!("{} ", rank.char()), style::LABEL);
        let squares = File::ALL.into_iter().map(|file| {
            let square = Square::from_coords(file, rank);
            let glyph = self.board.piece_at(square).map_or(' ', piece_glyph);
            Span::styled(format!(" {glyph} "), self.square_style(square))
        });
        iter::once(label).chain(squares).collect()
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let [area] = Layout::horizontal([Constraint::Length(LABEL_WIDTH + 8 * SQUARE_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let row_constraints = (0..9).map(|_| Constraint::Length(1));
        let rows = area.layout::<9>(&Layout::vertical(row_constraints));

        for (row, rank) in iter::zip(&rows, Rank::ALL.into_iter().rev()) {
            self.rank_line(rank).render(*row, buf);
        }

        let files: String = File::ALL
            .into_iter()
            .flat_map(|file| [' ', file.char(), ' '])
            .collect();
        Line::styled(format!("{:width$}{files}", "", width = usize::from(LABEL_WIDTH)), style::LABEL)
            .render(rows[8], buf);
    }
}

/// Unicode glyph of a piece; white pieces are drawn hollow.
pub fn piece_glyph(piece: Piece) -> char {
    match (piece.color, piece.role) {
        (Color::White, Role::King) => '♔',
        (Color::White, Role::Queen) => '♕',
        (Color::White, Role::Rook) => '♖',
        (Color::White, Role::Bishop) => '♗',
        (Color::White, Role::Knight) => '♘',
        (Color::White, Role::Pawn) => '♙',
        (Color::Black, Role::King) => '♚',
        (Color::Black, Role::Queen) => '♛',
        (Color::Black, Role::Rook) => '♜',
        (Color::Black, Role::Bishop) => '♝',
        (Color::Black, Role::Knight) => '♞',
        (Color::Black, Role::Pawn) => '♟',
    }
}

fn move_squares(uci: &str) -> Option<[Square; 2]> {
    let from = uci.get(0..2)?.parse().ok()?;
    let to = uci.get(2..4)?.parse().ok()?;
    Some([from, to])
}
