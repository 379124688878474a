use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use runo_core::{decode, GameBackend, PendingAnimation};

pub fn draw<B: GameBackend>(frame: &mut Frame, app: &App<B>) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Min(8),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);
    draw_table(frame, root[1], app);
    draw_hand(frame, root[2], app);

    if app.session.pending_color_choice() {
        draw_color_chooser(frame);
    }
    if app.show_log {
        draw_log_panel(frame, app);
    }
    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_header<B: GameBackend>(frame: &mut Frame, area: Rect, app: &App<B>) {
    let summary = match app.session.snapshot() {
        Some(snapshot) => format!(
            "Agent: {} cards | Color: {} | Difficulty: {}",
            snapshot.agent_hand_size,
            snapshot.current_color.to_uppercase(),
            app.difficulty.label()
        ),
        None => format!(
            "Difficulty: {} (1/2/3 to change, n to start)",
            app.difficulty.label()
        ),
    };
    let message = app.session.action_message().unwrap_or("");
    let error = app.session.error().unwrap_or("");
    let lines = vec![
        Line::from(format!("runo | {}", app.turn_indicator()).bold()),
        Line::from(summary),
        Line::from(message.to_string()),
        Line::from(error.to_string().fg(Color::Red)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Game");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn animation_line(owner: &str, animation: &PendingAnimation) -> Line<'static> {
    Line::from(format!(
        "{owner} card in flight: {} ({}°)",
        decode(&animation.card).display_text(),
        animation.rotation_degrees
    ))
}

fn draw_table<B: GameBackend>(frame: &mut Frame, area: Rect, app: &App<B>) {
    let mut lines = Vec::new();
    match app.session.snapshot() {
        Some(snapshot) => {
            lines.push(Line::from(format!(
                "Top card: {}",
                decode(&snapshot.top_card).display_text()
            )));
            if let Some(banner) = app.winner_banner() {
                lines.push(Line::from(banner.bold().fg(Color::Yellow)));
            }
            if let Some(animation) = app.session.human_animation() {
                lines.push(animation_line("Your", animation));
            }
            if let Some(animation) = app.session.agent_animation() {
                lines.push(animation_line("Agent", animation));
            }
        }
        None => {
            lines.push(Line::from("No game in progress."));
            lines.push(Line::from("Pick a difficulty with 1/2/3, then press n."));
        }
    }
    let block = Block::default().borders(Borders::ALL).title("Table");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_hand<B: GameBackend>(frame: &mut Frame, area: Rect, app: &App<B>) {
    let hand = app.hand();
    let mut items: Vec<ListItem<'_>> = if hand.is_empty() {
        vec![ListItem::new("No cards in hand")]
    } else {
        hand.iter()
            .enumerate()
            .map(|(idx, token)| ListItem::new(app.card_label(idx, token)))
            .collect()
    };
    if app.session.draw_available() {
        let marker = if app.session.locked() { " " } else { "*" };
        items.push(ListItem::new(format!(" {marker}  d: Draw Card")));
    }
    let title = format!("Your hand ({})", hand.len());
    let block = Block::default().borders(Borders::ALL).title(title);
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow));
    let mut state = ListState::default();
    if !hand.is_empty() {
        state.select(Some(app.hand_cursor.min(hand.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_color_chooser(frame: &mut Frame) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("Choose a color for the Wild card:"),
        Line::from("[r] Red   [g] Green   [b] Blue   [y] Yellow"),
    ];
    let block = Block::default()
        .title("Wild")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_log_panel<B: GameBackend>(frame: &mut Frame, app: &App<B>) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines: Vec<Line<'_>> = if app.session.turn_log().is_empty() {
        vec![Line::from("No actions logged yet.")]
    } else {
        app.session
            .turn_log()
            .iter()
            .map(|entry| Line::from(entry.clone()))
            .collect()
    };
    let block = Block::default()
        .title("Agent's Last Turn")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(70, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("q quit | ? help | arrows/jk move"),
        Line::from("enter/space play selected card | d draw"),
        Line::from("n new game | r refresh state | l agent log"),
        Line::from("1/2/3 difficulty (next game)"),
        Line::from("r/g/b/y answer a wild color prompt"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
