//! Terminal UI: forwards key presses into the round controller and renders
//! the board, scores and rule toggles from its state and events.

mod app;
mod game_view;

pub use app::App;
