use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};
use crate::app::{App, FormField, MessageType, Mode};
use crate::error::Field;
use super::animations::{render_banner_animation, render_status_animation};
use super::ascii_arts::UiConstants;
use super::preview::{render_artwork_panel, render_create_dialog, render_minted_dialog};
use super::utils::wrap_for;

/// Render the prompt / preview / mint screen
pub fn draw_main(f: &mut Frame, app: &mut App) {
    let primary_color = Color::Cyan;
    let secondary_color = Color::LightBlue;
    let highlight_color = Color::LightCyan;
    let dim_color = Color::DarkGray;

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(primary_color));
    f.render_widget(main_block, f.size());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(6),   // Banner
            Constraint::Length(1),   // Network, wallet, balance
            Constraint::Min(10),     // Content
            Constraint::Length(3),   // Controls
        ])
        .split(f.size());

    render_banner_animation(f, main_layout[0], highlight_color);
    render_status_bar(f, app, main_layout[1], primary_color);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),  // Form and collections
            Constraint::Percentage(60),  // Message, artwork, activity
        ])
        .split(main_layout[2]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Prompt
            Constraint::Length(4),  // Negative prompt
            Constraint::Length(3),  // Style
            Constraint::Length(3),  // Status
            Constraint::Min(3),     // Collections
        ])
        .split(content_layout[0]);

    let editable = app.mode() == Mode::Form;
    render_text_field(
        f,
        " PROMPT ",
        &app.form.prompt,
        app.form.error_for(Field::Prompt),
        editable && app.form.focus == FormField::Prompt,
        left_chunks[0],
        primary_color,
        secondary_color,
    );
    render_text_field(
        f,
        " NEGATIVE PROMPT ",
        &app.form.negative_prompt,
        app.form.error_for(Field::NegativePrompt),
        editable && app.form.focus == FormField::NegativePrompt,
        left_chunks[1],
        primary_color,
        secondary_color,
    );
    render_style_selector(f, app, left_chunks[2], editable, primary_color, secondary_color);
    render_status_animation(f, app, left_chunks[3], primary_color);
    render_collection_list(f, app, left_chunks[4], primary_color, secondary_color, dim_color);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),   // Message
            Constraint::Min(12),     // Artwork
            Constraint::Length(8),   // Activity log
        ])
        .split(content_layout[1]);

    render_message_area(f, app, right_chunks[0], primary_color);
    render_artwork_panel(f, app, right_chunks[1]);
    render_activity_log(f, app, right_chunks[2], primary_color, dim_color);

    render_help_controls(f, app, main_layout[3], dim_color, highlight_color);

    match app.mode() {
        Mode::CreateCollection => render_create_dialog(f, app),
        Mode::Minted => render_minted_dialog(f, app),
        _ => {}
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect, base_color: Color) {
    let status_indicators = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

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

    let wallet_status = format!("{} WALLET: {}", UiConstants::WALLET_PROGRESS, app.account_label());
    f.render_widget(
        Paragraph::new(wallet_status)
            .style(Style::default().fg(base_color))
            .alignment(Alignment::Center),
        status_indicators[1],
    );

    f.render_widget(
        Paragraph::new(format!("BALANCE: {}", app.balance_label()))
            .style(Style::default().fg(base_color))
            .alignment(Alignment::Center),
        status_indicators[2],
    );
}

#[allow(clippy::too_many_arguments)]
fn render_text_field(
    f: &mut Frame,
    title: &str,
    value: &str,
    error: Option<&str>,
    focused: bool,
    area: Rect,
    primary_color: Color,
    secondary_color: Color,
) {
    let border_color = if error.is_some() {
        Color::Red
    } else if focused {
        Color::Yellow
    } else {
        primary_color
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let mut lines: Vec<Line> = wrap_for(value, area.width)
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(secondary_color))))
        .collect();
    if focused {
        match lines.last_mut() {
            Some(last) => last.spans.push(Span::styled("█", Style::default().fg(Color::Yellow))),
            None => lines.push(Line::from(Span::styled("█", Style::default().fg(Color::Yellow)))),
        }
    }

    // Keep the cursor line and the error visible when the text overflows.
    let visible = area.height.saturating_sub(2) as usize;
    let reserved = usize::from(error.is_some());
    let keep = visible.saturating_sub(reserved).max(1);
    if lines.len() > keep {
        lines.drain(..lines.len() - keep);
    }
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(format!("! {}", error), Style::default().fg(Color::Red))));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_style_selector(
    f: &mut Frame,
    app: &App,
    area: Rect,
    editable: bool,
    primary_color: Color,
    secondary_color: Color,
) {
    let focused = editable && app.form.focus == FormField::Style;
    let block = Block::default()
        .title(" STYLE ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { Color::Yellow } else { primary_color }));

    let label = app.form.style.map(|s| s.label()).unwrap_or("None");
    let text = if focused {
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Yellow)),
            Span::styled(label, Style::default().fg(secondary_color).add_modifier(Modifier::BOLD)),
            Span::styled(" ▶", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(Span::styled(label, Style::default().fg(secondary_color)))
    };

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn render_collection_list(
    f: &mut Frame,
    app: &mut App,
    area: Rect,
    primary_color: Color,
    secondary_color: Color,
    dim_color: Color,
) {
    let title = if app.collections_loading {
        " COLLECTIONS (loading...) "
    } else {
        " COLLECTIONS "
    };
    let border_color = match app.mode() {
        Mode::Preview => Color::Yellow,
        _ => primary_color,
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    if app.collections.is_empty() && !app.collections_loading {
        let empty = Paragraph::new("No NFT collections yet. Generate artwork, then press C to create one.")
            .style(Style::default().fg(dim_color))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .collections
        .iter()
        .map(|collection| {
            ListItem::new(Line::from(vec![
                Span::styled("◈ ", Style::default().fg(dim_color)),
                Span::styled(collection.label(), Style::default().fg(secondary_color)),
                Span::styled(format!("  {}", collection.id), Style::default().fg(dim_color)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.collections_state);
}

fn render_message_area(f: &mut Frame, app: &App, area: Rect, primary_color: Color) {
    let message_block = Block::default()
        .title(" MESSAGE ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(primary_color));

    if let Some(error) = &app.error_message {
        let color = match app.message_type {
            MessageType::Error => Color::Red,
            _ => Color::Yellow,
        };
        let message_text = Paragraph::new(wrap_for(error, area.width))
            .style(Style::default().fg(color))
            .alignment(Alignment::Left)
            .block(message_block);
        f.render_widget(message_text, area);
    } else if let Some(success) = &app.success_message {
        let message_text = Paragraph::new(wrap_for(success, area.width))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Left)
            .block(message_block);
        f.render_widget(message_text, area);
    } else {
        // Just show the border when no message
        f.render_widget(message_block, area);
    }
}

/// Most recent activity, newest at the bottom
fn render_activity_log(f: &mut Frame, app: &App, area: Rect, primary_color: Color, dim_color: Color) {
    let output_block = Block::default()
        .title(" ACTIVITY LOG ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(primary_color));

    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.activity_log.len().saturating_sub(visible);
    let items: Vec<ListItem> = app
        .activity_log
        .iter()
        .skip(skip)
        .map(|line| {
            ListItem::new(Line::from(vec![
                Span::styled("│ ", Style::default().fg(dim_color)),
                Span::styled(line.as_str(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(output_block), area);
}

fn key_hint(key: &'static str, label: &'static str, highlight_color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, Style::default().fg(highlight_color).add_modifier(Modifier::BOLD)),
        Span::raw(label),
        Span::raw("   "),
    ]
}

fn render_help_controls(f: &mut Frame, app: &App, area: Rect, dim_color: Color, highlight_color: Color) {
    let help_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(dim_color));

    let hints: Vec<(&'static str, &'static str)> = match app.mode() {
        Mode::Form => {
            let mut hints = vec![
                ("TAB", " NEXT FIELD"),
                ("←/→", " STYLE"),
                ("ENTER", " GENERATE"),
            ];
            if app.has_error() || app.form.has_errors() {
                hints.push(("ESC", " DISMISS"));
            } else {
                hints.push(("ESC", " QUIT"));
            }
            hints.push(("CTRL+D", " DISCONNECT"));
            hints
        }
        Mode::Generating => vec![("X", " CANCEL")],
        Mode::Minting => vec![("CTRL+C", " QUIT")],
        Mode::Preview => vec![
            ("↑/↓", " COLLECTION"),
            ("M", " MINT"),
            ("C", " NEW COLLECTION"),
            ("R", " REFRESH"),
            ("X", " DISCARD"),
            ("CTRL+D", " DISCONNECT"),
        ],
        Mode::CreateCollection => vec![
            ("TAB", " SWITCH FIELD"),
            ("ENTER", " CREATE"),
            ("ESC", " CLOSE"),
        ],
        Mode::Minted => vec![("ENTER", " START OVER"), ("CTRL+C", " QUIT")],
        Mode::Connect => vec![("ENTER", " CONNECT"), ("Q", " QUIT")],
    };

    let spans: Vec<Span> = hints
        .into_iter()
        .flat_map(|(key, label)| key_hint(key, label, highlight_color))
        .collect();

    let help = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(dim_color))
        .alignment(Alignment::Center)
        .block(help_block);

    f.render_widget(help, area);
}
