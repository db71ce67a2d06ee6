use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::time::{SystemTime, UNIX_EPOCH};
use crate::app::{App, Phase};
use super::ascii_arts::{CANVAS_BUSY_FRAMES, CANVAS_IDLE_FRAMES, CIVICMINTER_FRAMES};
use super::utils::split_ascii_art;

pub fn animation_tick() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Render the CIVICMINTER banner
pub fn render_banner_animation(f: &mut Frame, area: Rect, highlight_color: Color) {
    let animation_frame = (animation_tick() % 3) as usize;
    let ascii_art = Paragraph::new(split_ascii_art(CIVICMINTER_FRAMES[animation_frame], highlight_color))
        .alignment(Alignment::Center);
    f.render_widget(ascii_art, area);
}

/// Workflow status ticker
pub fn render_status_animation(f: &mut Frame, app: &App, area: Rect, primary_color: Color) {
    let status_block = Block::default()
        .title("STATUS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(primary_color));

    let color = match app.workflow.phase() {
        Phase::Failed(_) => Color::Red,
        Phase::Minted => Color::Green,
        Phase::Generating | Phase::Minting => Color::Yellow,
        _ => Color::Cyan,
    };

    let status = Paragraph::new(app.get_status_animation())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(status_block);

    f.render_widget(status, area);
}

/// Canvas frames for the artwork panel
pub fn canvas_frames(app: &App, color: Color) -> Vec<Line<'static>> {
    let animation_frame = (animation_tick() % 3) as usize;
    if app.workflow.is_busy() || app.creating_collection {
        split_ascii_art(CANVAS_BUSY_FRAMES[animation_frame], color)
    } else {
        split_ascii_art(CANVAS_IDLE_FRAMES[animation_frame], color)
    }
}
