use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::view::screens::{GameView, GameViewerScreen},
    tui::App,
};

#[derive(Debug)]
pub struct ViewApp {
    screen: GameViewerScreen,
}

impl ViewApp {
    pub fn new(view: GameView) -> Self {
        Self {
            screen: GameViewerScreen::new(view),
        }
    }
}

impl App for ViewApp {
    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, event: &Event) {
        self.screen.handle_event(event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }
}
