use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use quote_machine_core::{highest_contrast, Color as Rgb, ViewState};
use crate::app::{App, Status};

const CARD_LOADED: Rgb = Rgb::rgb(0xFA, 0xFA, 0xFA);
const CARD_EMPTY: Rgb = Rgb::rgb(0x32, 0x32, 0x32);
const CARD_MAX_WIDTH: u16 = 80;
const PANEL_MAX_WIDTH: u16 = 50;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r(), color.g(), color.b())
}

/// Text color that reads best on top of `background`
fn on(background: Rgb) -> Rgb {
    highest_contrast(background, &[Rgb::WHITE, Rgb::BLACK]).unwrap_or(Rgb::WHITE)
}

/// Outline-style button that fills in on hover
fn button_style(view: &ViewState, hovered: bool) -> Style {
    let primary = if view.is_empty() { Rgb::WHITE } else { view.accent_color };
    let card = if view.is_empty() { CARD_EMPTY } else { CARD_LOADED };
    if hovered {
        Style::default().bg(rgb(primary)).fg(rgb(on(primary))).bold()
    } else {
        Style::default().bg(rgb(card)).fg(rgb(primary))
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_body(app, frame, body_area);
    render_footer(app, frame, footer_area);

    if app.panel_open() {
        render_saved_panel(app, frame, body_area);
    } else {
        app.panel_area = None;
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let saved_count = app.machine.favorites().len();
    let saved_indicator = if saved_count > 0 {
        format!(" [{} saved]", saved_count)
    } else {
        String::new()
    };

    let mut spans = vec![
        Span::styled(" Quote Machine ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(saved_indicator, Style::default().fg(Color::Gray)),
        Span::raw(" "),
    ];

    if app.is_loading() {
        spans.push(Span::styled(
            format!("{} fetching ", SPINNER[app.animation_frame % SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        ));
    }

    match &app.status {
        Some(Status::Error(message)) => {
            spans.push(Span::styled(format!(" {} ", message), Style::default().fg(Color::White).bg(Color::Red)));
        }
        Some(Status::Info(message)) => {
            spans.push(Span::styled(format!(" {} ", message), Style::default().fg(Color::White)));
        }
        None => {
            spans.push(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::Gray),
            ));
        }
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_body(app: &mut App, frame: &mut Frame, area: Rect) {
    let view = app.machine.view().clone();

    // Accent color fills the whole background
    frame.render_widget(Block::default().style(Style::default().bg(rgb(view.accent_color))), area);

    let card_width = CARD_MAX_WIDTH.min(area.width.saturating_sub(4) * 4 / 5).max(20.min(area.width));
    let text_width = card_width.saturating_sub(4).max(1) as usize;

    // Quote + author + gap + buttons, plus padding
    let quote_lines = match &view.current_quote {
        Some(quote) => estimate_lines(&format!("\"{}\"", quote.text), text_width) + 2,
        None => 0,
    };
    let card_height = (quote_lines as u16 + 4).min(area.height.saturating_sub(2));

    let [card_area, _, creator_area] = Layout::vertical([
        Constraint::Length(card_height),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(area);
    let [card_area] = Layout::horizontal([Constraint::Length(card_width)])
        .flex(Flex::Center)
        .areas(card_area);

    let card_bg = if view.is_empty() { CARD_EMPTY } else { CARD_LOADED };
    let card = Block::default()
        .style(Style::default().bg(rgb(card_bg)))
        .padding(Padding::new(2, 2, 1, 1));
    let inner = card.inner(card_area);
    frame.render_widget(card, card_area);

    let [text_area, buttons_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(quote) = &view.current_quote {
        let accent = Style::default().fg(rgb(view.accent_color));
        // Trailing star marks a saved quote
        let author = if app.machine.current_is_saved() {
            Span::styled(format!("{} *", quote.author), accent)
        } else {
            Span::styled(quote.author.clone(), accent)
        };
        let text = vec![
            Line::from(Span::styled(format!("\"{}\"", quote.text), accent.add_modifier(Modifier::BOLD))),
            Line::from(author),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, text_area);
    }

    render_buttons(app, frame, &view, buttons_area);

    // Creator link under the card
    let creator_label = " Created by Brayden Babbitt ";
    let [creator_area] = Layout::horizontal([Constraint::Length(creator_label.len() as u16)])
        .flex(Flex::Center)
        .areas(creator_area);
    let creator_style = if view.hover.creator_link {
        let bg = if view.is_empty() { CARD_EMPTY } else { Rgb::WHITE };
        let fg = if view.is_empty() { Rgb::WHITE } else { view.accent_color };
        Style::default().bg(rgb(bg)).fg(rgb(fg)).bold()
    } else {
        Style::default().fg(rgb(on(view.accent_color))).bold()
    };
    frame.render_widget(Paragraph::new(creator_label).style(creator_style), creator_area);
    app.creator_area = Some(creator_area);
}

fn render_buttons(app: &mut App, frame: &mut Frame, view: &ViewState, area: Rect) {
    let share_label = " Share ";
    let quote_label = if view.is_empty() { " Get Quote " } else { " Get New Quote " };

    let [share_area, quote_area] = Layout::horizontal([
        Constraint::Length(share_label.len() as u16),
        Constraint::Length(quote_label.len() as u16),
    ])
    .spacing(2)
    .flex(Flex::Center)
    .areas(area);

    frame.render_widget(
        Paragraph::new(share_label).style(button_style(view, view.hover.share_button)),
        share_area,
    );
    frame.render_widget(
        Paragraph::new(quote_label).style(button_style(view, view.hover.quote_button)),
        quote_area,
    );

    app.share_button_area = Some(share_area);
    app.quote_button_area = Some(quote_area);
}

fn render_saved_panel(app: &mut App, frame: &mut Frame, area: Rect) {
    let width = PANEL_MAX_WIDTH.min((u32::from(area.width) * 85 / 100) as u16);
    let panel_area = Rect::new(area.x + area.width - width, area.y, width, area.height);
    app.panel_area = Some(panel_area);

    // Clear the area behind the panel
    frame.render_widget(Clear, panel_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::White).fg(Color::Black))
        .title(format!(" Saved Quotes ({}) ", app.machine.favorites().len()));

    if app.machine.favorites().is_empty() {
        let placeholder = Paragraph::new("No saved quotes.\nPress 'f' on a quote to save it.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, panel_area);
        return;
    }

    let preview_width = width.saturating_sub(6) as usize;
    let current_id = app.machine.view().current_id().map(str::to_string);
    let items: Vec<ListItem> = app
        .machine
        .favorites()
        .iter()
        .map(|q| {
            let preview = truncate(&q.text, preview_width);
            let marker = if current_id.as_deref() == Some(q.id.as_str()) { "> " } else { "" };
            ListItem::new(vec![
                Line::from(Span::styled(preview, Style::default().bold())),
                Line::from(Span::styled(
                    format!("{}- {}", marker, q.author),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, panel_area, &mut app.panel_state);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let (mode_text, keys): (&str, Vec<(&str, &str)>) = if app.panel_open() {
        (" SAVED ", vec![
            ("j/k", "nav"),
            ("Enter", "show"),
            ("d", "delete"),
            ("Esc", "close"),
        ])
    } else {
        (" QUOTE ", vec![
            ("Enter", "new quote"),
            ("f", "save"),
            ("s", "share"),
            ("p", "saved"),
            ("q", "quit"),
        ])
    };

    let mut spans = vec![Span::styled(mode_text, Style::default().bg(Color::Blue).fg(Color::White))];
    for (key, label) in keys {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Rough wrapped line count for sizing the card
fn estimate_lines(text: &str, width: usize) -> usize {
    let chars = text.chars().count();
    (chars + width - 1) / width.max(1)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
