use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use chompers_core::{ChatMessage, ChatRole, DEFAULT_MODEL_LABEL};

use crate::app::App;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [body_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    if app.started {
        render_transcript(app, frame, body_area);
    } else {
        render_welcome(frame, body_area);
    }

    render_input(app, frame, input_area);
}

/// Shown until the first submission reveals the transcript.
fn render_welcome(frame: &mut Frame, area: ratatui::layout::Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Chompers",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Chat with your local LLM",
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Type a message and press Enter to start.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let welcome = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(welcome, area);
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: ratatui::layout::Rect) {
    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Chompers ");

    let mut lines: Vec<Line> = Vec::new();
    for msg in &app.messages {
        lines.extend(message_lines(msg));
    }

    if app.typing_indicator_visible() {
        lines.extend(typing_indicator_lines(app.animation_frame));
    }

    let transcript = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.scroll, 0));

    frame.render_widget(transcript, area);
}

/// Pure function from one message to its transcript lines.
///
/// Assistant bubbles carry a model-name label (the reply's `model`, or the
/// default when absent); user bubbles get a plain "You:" label.
pub fn message_lines(msg: &ChatMessage) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    match msg.role {
        ChatRole::User => {
            lines.push(Line::from(Span::styled(
                "You:",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        }
        ChatRole::Assistant => {
            let label = msg.model.as_deref().unwrap_or(DEFAULT_MODEL_LABEL);
            lines.push(Line::from(Span::styled(
                format!("{label}:"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
    }

    for line in msg.content.lines() {
        lines.push(Line::from(line));
    }
    lines.push(Line::default());

    lines
}

/// Placeholder bubble shown while at least one reply is pending.
fn typing_indicator_lines(animation_frame: u8) -> Vec<Line<'static>> {
    // Animated ellipsis: cycles through ".", "..", "..."
    let dots = ".".repeat((animation_frame as usize) + 1);
    vec![
        Line::from(Span::styled(
            format!("{DEFAULT_MODEL_LABEL}:"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Thinking{dots}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ]
}

fn render_input(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    // Send affordance: the border lights up as soon as there is something
    // to send.
    let border_color = if app.has_input() {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Message (Enter to send) ");

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.cursor;

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    // Get the visible slice of the input
    let visible_text: String = app
        .input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, area);

    let cursor_x = (cursor_pos - scroll_offset) as u16;
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}
