// crates/tui/src/ui/mod.rs
//! Rendering

pub mod card;
pub mod help;

use crate::{app::App, state::View, theme::Theme};
use mentorscroll_deck::{CardTransform, Clock, DeckStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Pixels of card offset per terminal column
pub const PX_PER_COLUMN: f32 = 2.5;

/// Pixels of card offset per terminal row
pub const PX_PER_ROW: f32 = 10.0;

/// Widest a card is drawn, in columns
pub const MAX_CARD_WIDTH: u16 = 72;

/// Below this opacity a card is not drawn at all
const MIN_OPACITY: f32 = 0.05;

/// Below this opacity a card is drawn dimmed
const DIM_OPACITY: f32 = 0.75;

pub fn render<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Cards
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    match app.state().view {
        View::Deck => render_deck(frame, chunks[1], app),
        View::Help => help::render(frame, chunks[1], app.theme()),
    }
    render_status_bar(frame, chunks[2], app);
}

/// Screen rectangle for a card placed by `transform` inside `area`
///
/// Offsets are scaled to cells, rotation and depth are not drawn. Returns
/// `None` when the card would be fully off screen or too small to draw.
pub fn card_area(area: Rect, transform: &CardTransform) -> Option<Rect> {
    let base_w = area.width.saturating_sub(8).min(MAX_CARD_WIDTH) as f32;
    let base_h = area.height.saturating_sub(4) as f32;
    if base_w < 10.0 || base_h < 5.0 {
        return None;
    }

    let w = (base_w * transform.scale).round();
    let h = (base_h * transform.scale).round();
    let cx = area.x as f32 + area.width as f32 / 2.0 + transform.offset_x / PX_PER_COLUMN;
    let cy = area.y as f32 + area.height as f32 / 2.0 + transform.offset_y / PX_PER_ROW;

    let left = (cx - w / 2.0).max(area.x as f32);
    let top = (cy - h / 2.0).max(area.y as f32);
    let right = (cx + w / 2.0).min(area.right() as f32);
    let bottom = (cy + h / 2.0).min(area.bottom() as f32);

    if right - left < 2.0 || bottom - top < 2.0 {
        return None;
    }

    Some(Rect::new(
        left.round() as u16,
        top.round() as u16,
        (right - left).round() as u16,
        (bottom - top).round() as u16,
    ))
}

fn render_header<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let theme = app.theme();
    let deck = app.deck();

    let position = match deck.current_index() {
        Some(index) => format!("{} / {}", index + 1, deck.len()),
        None => "no cards".to_string(),
    };

    let mut spans = vec![
        Span::styled(
            "🎓 MentorScroll",
            theme.accent_style().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(position, theme.text_secondary_style()),
    ];
    if let Some(series) = deck.current_card().and_then(|c| c.series) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Episode {} of {}", series.episode(), series.total_episodes()),
            theme.highlight_style(),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_color())),
    );
    frame.render_widget(header, area);
}

fn render_deck<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let theme = app.theme();
    let deck = app.deck();

    if deck.status() == DeckStatus::Empty {
        let empty = Paragraph::new("No reels yet. Generate some with `mentorscroll generate`.")
            .style(theme.text_secondary_style())
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let current = deck.current_index();
    for (index, transform) in app.visible_cards() {
        if transform.opacity < MIN_OPACITY {
            continue;
        }
        let (Some(card), Some(rect)) = (deck.card(index), card_area(area, &transform)) else {
            continue;
        };

        let mut border = Style::default().fg(theme.card_accent(&card.presentation.theme));
        if transform.opacity < DIM_OPACITY {
            border = border.add_modifier(Modifier::DIM);
        }

        frame.render_widget(Clear, rect);
        if Some(index) == current {
            card::render(frame, rect, card, app.state().answer, border, theme);
        } else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(card.title.clone(), border));
            frame.render_widget(block, rect);
        }
    }
}

fn render_status_bar<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let theme = app.theme();
    let text = match app.state().status_message {
        Some(ref msg) => msg.clone(),
        None => "←/→: Navigate | g: Go to | s: Shuffle | a-d: Answer | ?: Help | q: Quit"
            .to_string(),
    };

    let status = Paragraph::new(Line::from(Span::styled(text, theme.text_style()))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_color())),
    );
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorscroll_deck::Direction as NavDirection;

    #[test]
    fn test_identity_card_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = card_area(area, &CardTransform::IDENTITY).unwrap();
        assert_eq!(rect, Rect::new(14, 2, 72, 36));
    }

    #[test]
    fn test_receding_card_peeks_out() {
        let area = Rect::new(0, 0, 100, 40);
        let top = card_area(area, &CardTransform::IDENTITY).unwrap();
        let ahead = card_area(area, &CardTransform::receding(1, true)).unwrap();
        let behind = card_area(area, &CardTransform::receding(1, false)).unwrap();

        assert!(ahead.width < top.width);
        assert!(ahead.x + ahead.width > behind.x + behind.width);
        assert!(ahead.y <= top.y);
    }

    #[test]
    fn test_flying_card_leaves_screen() {
        let area = Rect::new(0, 0, 100, 40);
        let gone = CardTransform::fly_away(NavDirection::Next, 0);
        assert_eq!(card_area(area, &gone), None);
        let gone = CardTransform::fly_away(NavDirection::Previous, 0);
        assert_eq!(card_area(area, &gone), None);
    }

    #[test]
    fn test_tiny_area_draws_nothing() {
        let area = Rect::new(0, 0, 12, 6);
        assert_eq!(card_area(area, &CardTransform::IDENTITY), None);
    }

    #[test]
    fn test_offset_area_stays_inside() {
        let area = Rect::new(0, 3, 80, 20);
        let shuffled = CardTransform::fly_away(NavDirection::Shuffle, 1);
        if let Some(rect) = card_area(area, &shuffled) {
            assert!(rect.y >= area.y);
            assert!(rect.bottom() <= area.bottom());
        }
    }
}
