use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use crate::app::App;
use crate::wallet::ConnectionStatus;
use super::animations::render_banner_animation;
use super::ascii_arts::UiConstants;
use super::utils::wrap_for;

/// Renders the wallet pairing screen
pub fn draw_connect(f: &mut Frame, app: &mut App) {
    let base_color = Color::Magenta;
    let highlight_color = Color::LightMagenta;
    let dim_color = Color::DarkGray;

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(base_color));
    f.render_widget(main_block, f.size());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(7),   // Banner
            Constraint::Length(3),   // Network and wallet indicators
            Constraint::Min(8),      // Pairing status
            Constraint::Length(4),   // Message
            Constraint::Length(3),   // Controls
        ])
        .split(f.size());

    render_banner_animation(f, main_layout[0], highlight_color);

    let status_indicators = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(main_layout[1]);

    let network_status = format!(
        "{} NETWORK: {}",
        UiConstants::NETWORK_PROGRESS,
        app.network_state.get_current_network().to_uppercase()
    );
    f.render_widget(
        Paragraph::new(network_status)
            .style(Style::default().fg(base_color))
            .alignment(Alignment::Center),
        status_indicators[0],
    );

    let banner_text = format!("╔══════╡ {} ╞══════╗", UiConstants::BUILD_ON_HEDERA.to_uppercase());
    f.render_widget(
        Paragraph::new(banner_text)
            .style(Style::default().fg(base_color))
            .alignment(Alignment::Center),
        status_indicators[1],
    );

    let wallet_status = format!(
        "{} WALLET: {}",
        UiConstants::WALLET_PROGRESS,
        app.connection_status.to_string().to_uppercase()
    );
    f.render_widget(
        Paragraph::new(wallet_status)
            .style(Style::default().fg(base_color))
            .alignment(Alignment::Center),
        status_indicators[2],
    );

    let pairing_block = Block::default()
        .title(" << WALLET PAIRING >> ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(base_color));

    let mut pairing_text = vec![Line::from(vec![
        Span::styled(">> ", Style::default().fg(highlight_color)),
        Span::styled("SYSTEM STATUS", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    ])];

    match app.connection_status {
        ConnectionStatus::Connecting => {
            pairing_text.extend(vec![
                Line::from(vec![
                    Span::styled(">> ", Style::default().fg(highlight_color)),
                    Span::raw("Pairing request sent"),
                ]),
                Line::from(vec![
                    Span::styled(">> ", Style::default().fg(highlight_color)),
                    Span::raw("Approve the connection in your wallet"),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("STATUS: ", Style::default().fg(highlight_color).add_modifier(Modifier::BOLD)),
                    Span::styled(app.get_status_animation(), Style::default().fg(Color::Yellow)),
                ]),
            ]);
        }
        _ => {
            pairing_text.extend(vec![
                Line::from(vec![
                    Span::styled(">> ", Style::default().fg(highlight_color)),
                    Span::raw("No wallet connected"),
                ]),
                Line::from(vec![
                    Span::styled(">> ", Style::default().fg(highlight_color)),
                    Span::raw("Pair a Hedera wallet to generate and mint artwork"),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("STATUS: ", Style::default().fg(highlight_color).add_modifier(Modifier::BOLD)),
                    Span::raw("Press Enter to connect."),
                ]),
            ]);
        }
    }

    if app.config.wallet.mock {
        pairing_text.push(Line::from(vec![
            Span::styled(">> ", Style::default().fg(dim_color)),
            Span::styled("Mock wallet enabled", Style::default().fg(dim_color)),
        ]));
    }

    f.render_widget(
        Paragraph::new(pairing_text).block(pairing_block),
        main_layout[2],
    );

    let message_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(dim_color));
    let (message, color) = match (&app.error_message, &app.success_message) {
        (Some(error), _) if app.has_error() => (error.as_str(), Color::Red),
        (Some(info), _) => (info.as_str(), Color::Yellow),
        (None, Some(success)) => (success.as_str(), Color::Green),
        (None, None) => ("", dim_color),
    };
    f.render_widget(
        Paragraph::new(wrap_for(message, main_layout[3].width))
            .style(Style::default().fg(color))
            .block(message_block),
        main_layout[3],
    );

    let help_text = Line::from(vec![
        Span::styled("ENTER", Style::default().fg(highlight_color).add_modifier(Modifier::BOLD)),
        Span::raw(" CONNECT WALLET"),
        Span::raw("   "),
        Span::styled("N", Style::default().fg(highlight_color).add_modifier(Modifier::BOLD)),
        Span::raw(" SWITCH NETWORK"),
        Span::raw("   "),
        Span::styled("Q", Style::default().fg(highlight_color).add_modifier(Modifier::BOLD)),
        Span::raw(" QUIT"),
    ]);
    f.render_widget(
        Paragraph::new(help_text)
            .style(Style::default().fg(dim_color))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(dim_color)),
            ),
        main_layout[4],
    );
}
