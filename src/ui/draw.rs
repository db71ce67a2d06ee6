use ratatui::Frame;
use crate::app::{App, Mode};
use super::{connect_view, main_view};

/// Main entry point for UI rendering
/// Shows the pairing screen until a wallet is connected
pub fn draw(f: &mut Frame, app: &mut App) {
    if app.mode() == Mode::Connect {
        connect_view::draw_connect(f, app);
    } else {
        main_view::draw_main(f, app);
    }
}
