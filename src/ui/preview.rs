use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use crate::app::{App, CollectionField, Phase, Stage};
use crate::error::Field;
use crate::utils::shorten_id;
use super::animations::canvas_frames;
use super::utils::centered_rect;

fn detail_line<'a>(label: &'a str, value: String, dim_color: Color, value_color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(dim_color)),
        Span::styled(value, Style::default().fg(value_color)),
    ])
    .alignment(Alignment::Center)
}

/// Renders the artwork panel for the current workflow phase
pub fn render_artwork_panel(f: &mut Frame, app: &App, area: Rect) {
    let highlight_color = Color::LightBlue;
    let secondary_color = Color::Cyan;
    let dim_color = Color::DarkGray;

    let phase = app.workflow.phase();
    let border_color = match phase {
        Phase::Failed(_) => Color::Red,
        Phase::Minted => Color::Green,
        _ => Color::Cyan,
    };
    let artwork_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .title(" ARTWORK ")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(border_color));

    let mut text = vec![Line::from("")];

    let Some(artifact) = app.workflow.artifact() else {
        let (headline, hint) = match phase {
            Phase::Generating => ("RENDERING ARTWORK", "Waiting for the image service. Press X to cancel."),
            Phase::Failed(Stage::Generation) => ("GENERATION FAILED", "Fix the prompt or press Esc, then try again."),
            _ => ("NO ARTWORK YET", "Describe your artwork and press Enter to generate."),
        };
        text.push(
            Line::from(vec![
                Span::styled("◢ ", Style::default().fg(highlight_color)),
                Span::styled(headline, Style::default().fg(secondary_color)),
                Span::styled(" ◣", Style::default().fg(highlight_color)),
            ])
            .alignment(Alignment::Center),
        );
        if let Some(request) = app.workflow.request() {
            text.push(detail_line("PROMPT: ", request.prompt().to_string(), dim_color, secondary_color));
        }
        text.push(Line::from(""));
        text.extend(canvas_frames(app, secondary_color).into_iter().map(|l| l.alignment(Alignment::Center)));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(hint, Style::default().fg(dim_color))).alignment(Alignment::Center));

        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .block(artwork_block),
            area,
        );
        return;
    };

    let headline = match phase {
        Phase::Minting => "MINTING",
        Phase::Minted => "MINTED",
        Phase::Failed(Stage::Mint) => "MINT FAILED",
        _ => "PREVIEW",
    };
    text.extend(vec![
        Line::from(vec![
            Span::raw("╭─"),
            Span::styled(headline, Style::default().fg(highlight_color)),
            Span::raw("─╮"),
        ])
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            artifact.name.clone(),
            Style::default().fg(secondary_color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
    ]);

    text.extend(canvas_frames(app, secondary_color).into_iter().map(|l| l.alignment(Alignment::Center)));
    text.push(Line::from(""));

    text.push(detail_line("SEED: ", artifact.seed.to_string(), dim_color, secondary_color));
    text.push(detail_line(
        "SIZE: ",
        format!("{} KiB", artifact.image_data.len().div_ceil(1024)),
        dim_color,
        secondary_color,
    ));
    text.push(detail_line(
        "STYLE: ",
        artifact.request.style().map(|s| s.label()).unwrap_or("None").to_string(),
        dim_color,
        secondary_color,
    ));
    text.push(detail_line(
        "CID: ",
        artifact
            .content_id
            .as_ref()
            .map(|cid| shorten_id(&cid.to_string()))
            .unwrap_or_else(|| "pending upload".to_string()),
        dim_color,
        secondary_color,
    ));
    if let Some(url) = &artifact.source_url {
        text.push(detail_line("URL: ", url.clone(), dim_color, secondary_color));
    }
    if let Some(path) = &artifact.saved_path {
        text.push(detail_line("SAVED: ", path.display().to_string(), dim_color, secondary_color));
    }
    if let Some(collection) = app.selected_collection() {
        text.push(detail_line("INTO: ", collection.label(), dim_color, Color::Yellow));
    }

    text.push(Line::from(""));
    let hint = match phase {
        Phase::Minting => Line::from(Span::styled(
            "Approve the transaction in your wallet",
            Style::default().fg(Color::Yellow),
        )),
        Phase::Failed(Stage::Mint) => Line::from(vec![
            Span::styled("Press ", Style::default().fg(dim_color)),
            Span::styled("M", Style::default().fg(highlight_color)),
            Span::styled(" to retry or ", Style::default().fg(dim_color)),
            Span::styled("X", Style::default().fg(highlight_color)),
            Span::styled(" to discard", Style::default().fg(dim_color)),
        ]),
        _ => Line::from(vec![
            Span::styled("Press ", Style::default().fg(dim_color)),
            Span::styled("M", Style::default().fg(highlight_color)),
            Span::styled(" to mint into the selected collection", Style::default().fg(dim_color)),
        ]),
    };
    text.push(hint.alignment(Alignment::Center));

    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(artwork_block),
        area,
    );
}

/// Popup shown once the mint transaction is confirmed
pub fn render_minted_dialog(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 10, f.size());
    let block = Block::default()
        .title(" NFT MINTED ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Green));

    let transaction = app
        .workflow
        .transaction_id()
        .map(|tx| tx.to_string())
        .unwrap_or_default();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your artwork is on the ledger",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("TRANSACTION: ", Style::default().fg(Color::DarkGray)),
            Span::styled(transaction, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(Span::styled(
            app.explorer_url().unwrap_or_default(),
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("ENTER", Style::default().fg(Color::Yellow)),
            Span::raw(": Start over"),
        ]),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Popup for naming a new collection
pub fn render_create_dialog(f: &mut Frame, app: &App) {
    let Some(dialog) = app.create_dialog.as_ref() else {
        return;
    };
    let area = centered_rect(60, 11, f.size());
    let block = Block::default()
        .title(" CREATE COLLECTION ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow));

    let field_line = |label: &'static str, value: &str, focused: bool| {
        let marker = if focused { ">> " } else { "   " };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            Span::styled(value.to_string(), Style::default().fg(Color::Cyan)),
        ];
        if focused && !app.creating_collection {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };
    let error_line = |field: Field| {
        Line::from(Span::styled(
            dialog.error_for(field).map(|e| format!("   ! {}", e)).unwrap_or_default(),
            Style::default().fg(Color::Red),
        ))
    };

    let status = if app.creating_collection {
        Line::from(Span::styled(app.get_status_animation(), Style::default().fg(Color::Yellow)))
    } else {
        Line::from(vec![
            Span::styled("ENTER", Style::default().fg(Color::Yellow)),
            Span::raw(": Create  |  "),
            Span::styled("TAB", Style::default().fg(Color::Yellow)),
            Span::raw(": Switch field  |  "),
            Span::styled("ESC", Style::default().fg(Color::Yellow)),
            Span::raw(": Close"),
        ])
    };

    let text = vec![
        Line::from(""),
        field_line("NAME:   ", &dialog.name, dialog.focus == CollectionField::Name),
        error_line(Field::CollectionName),
        field_line("SYMBOL: ", &dialog.symbol, dialog.focus == CollectionField::Symbol),
        error_line(Field::CollectionSymbol),
        Line::from(""),
        Line::from(Span::styled(
            "An existing collection with the same symbol is reused",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        status.alignment(Alignment::Center),
    ];

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(text).block(block), area);
}
