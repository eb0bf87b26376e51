pub use self::game_viewer::{GameView, GameViewerScreen, Prediction};

mod game_viewer;
