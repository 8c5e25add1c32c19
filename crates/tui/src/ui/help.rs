// crates/tui/src/ui/help.rs
//! Key and mouse reference

use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Key, description pairs grouped under a heading
pub const HELP_SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Navigation",
        &[
            ("→ / l", "Next card"),
            ("← / h", "Previous card"),
            ("s", "Jump to a random card"),
            ("g + number", "Go to card number, Enter to confirm"),
            ("Home / End", "First / last card"),
        ],
    ),
    (
        "Mouse",
        &[
            ("Drag left", "Next card"),
            ("Drag right", "Previous card"),
            ("Click an edge", "Move toward that side"),
        ],
    ),
    (
        "Cards",
        &[
            ("a-d / 1-4", "Answer the quiz"),
            ("t", "Cycle theme"),
            ("? / Esc", "Close this help"),
            ("q / Ctrl+C", "Quit"),
        ],
    ),
];

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut lines = Vec::new();
    for (heading, keys) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(
            heading,
            theme.accent_style().add_modifier(Modifier::BOLD),
        )));
        for (key, description) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", key), theme.highlight_style()),
                Span::styled(*description, theme.text_style()),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Navigation requests made while a card is moving are ignored.",
        theme.text_secondary_style(),
    )));

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_color()))
                .title("Help"),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help, area);
}
