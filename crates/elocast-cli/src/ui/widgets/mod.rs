use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, key_binding_display::*, move_list_display::*, score_display::*,
};

mod board_display;
mod key_binding_display;
mod move_list_display;
mod score_display;

mod color {
    use ratatui::style::Color;

    pub const LIGHT_SQUARE: Color = Color::Rgb(240, 217, 181);
    pub const DARK_SQUARE: Color = Color::Rgb(181, 136, 99);
    pub const LIGHT_HIGHLIGHT: Color = Color::Rgb(205, 210, 106);
    pub const DARK_HIGHLIGHT: Color = Color::Rgb(170, 162, 58);
    pub const PIECE: Color = Color::Rgb(0, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::ui::widgets::color;

    const fn square(bg: Color) -> Style {
        Style::new().fg(color::PIECE).bg(bg)
    }

    pub const LIGHT_SQUARE: Style = square(color::LIGHT_SQUARE);
    pub const DARK_SQUARE: Style = square(color::DARK_SQUARE);
    pub const LIGHT_HIGHLIGHT: Style = square(color::LIGHT_HIGHLIGHT);
    pub const DARK_HIGHLIGHT: Style = square(color::DARK_HIGHLIGHT);

    pub const LABEL: Style = Style::new().fg(color::GRAY);
    pub const VALUE: Style = Style::new().fg(color::WHITE);
    pub const CURRENT: Style = Style::new()
        .fg(color::YELLOW)
        .add_modifier(Modifier::REVERSED);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
