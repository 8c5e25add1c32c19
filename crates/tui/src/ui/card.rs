// crates/tui/src/ui/card.rs
//! The card on top of the stack

use crate::{state::QuizAnswer, theme::Theme};
use mentorscroll_core::{find_expert, format_count, BodySection, CardBody, ReelCard};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(
    frame: &mut Frame,
    area: Rect,
    card: &ReelCard,
    answer: Option<QuizAnswer>,
    border: Style,
    theme: &Theme,
) {
    let expert = match find_expert(card.expert.as_str()) {
        Some(expert) => format!(" {} {} ", card.presentation.icon, expert.name),
        None => format!(" {} {} ", card.presentation.icon, card.expert),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(expert, border.add_modifier(Modifier::BOLD)))
        .title_bottom(Line::from(footer(card)).right_aligned());

    let body = Paragraph::new(card_lines(card, answer, theme))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, area);
}

/// Text of a card, top to bottom
pub fn card_lines(
    card: &ReelCard,
    answer: Option<QuizAnswer>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        card.title.clone(),
        theme.highlight_style(),
    ))];
    if !card.subtitle.is_empty() {
        lines.push(Line::from(Span::styled(
            card.subtitle.clone(),
            theme.text_secondary_style(),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{} · {} · {} min read",
            card.content_type,
            card.difficulty,
            card.presentation.reading_minutes
        ),
        theme.text_secondary_style(),
    )));
    lines.push(Line::from(""));

    let content = match &card.body {
        CardBody::Generated(content) => content,
        CardBody::Media { video_url, .. } => {
            lines.push(Line::from(vec![
                Span::styled("▶ ", theme.accent_style()),
                Span::styled(video_url.clone(), theme.text_style()),
            ]));
            return lines;
        }
    };

    if let Some(hook) = &content.hook_line {
        lines.push(Line::from(Span::styled(
            hook.clone(),
            theme.text_style().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    let mut step = 0;
    for section in &content.body_sections {
        let line = match section {
            BodySection::Heading(text) => Line::from(Span::styled(
                text.clone(),
                theme.text_style().add_modifier(Modifier::BOLD),
            )),
            BodySection::Paragraph(text) => {
                Line::from(Span::styled(text.clone(), theme.text_style()))
            }
            BodySection::Bullet(text) => Line::from(vec![
                Span::styled("• ", theme.accent_style()),
                Span::styled(text.clone(), theme.text_style()),
            ]),
            BodySection::Step(text) => {
                step += 1;
                Line::from(vec![
                    Span::styled(format!("{}. ", step), theme.accent_style()),
                    Span::styled(text.clone(), theme.text_style()),
                ])
            }
        };
        lines.push(line);
    }

    if let Some(insight) = &content.key_insight {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("💡 Key insight: ", theme.warning_style()),
            Span::styled(insight.clone(), theme.text_style()),
        ]));
    }

    if !content.action_items.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Try this:",
            theme.text_style().add_modifier(Modifier::BOLD),
        )));
        for item in &content.action_items {
            lines.push(Line::from(vec![
                Span::styled("→ ", theme.success_style()),
                Span::styled(item.clone(), theme.text_style()),
            ]));
        }
    }

    if let Some(quiz) = &content.quiz {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("❓ {}", quiz.question()),
            theme.accent_style().add_modifier(Modifier::BOLD),
        )));
        for (i, option) in quiz.options().iter().enumerate() {
            let letter = OPTION_LETTERS.get(i).copied().unwrap_or('?');
            let style = match answer {
                Some(_) if quiz.is_correct(i) => theme.success_style(),
                Some(a) if a.choice == i => theme.error_style(),
                _ => theme.text_style(),
            };
            let mark = match answer {
                Some(_) if quiz.is_correct(i) => " ✓",
                Some(a) if a.choice == i => " ✗",
                _ => "",
            };
            lines.push(Line::from(Span::styled(
                format!("{}) {}{}", letter, option, mark),
                style,
            )));
        }
    }

    lines
}

fn footer(card: &ReelCard) -> String {
    let stats = &card.presentation.stats;
    let mut footer = format!(
        " 👁 {}  ♥ {}  🔖 {} ",
        stats.formatted_views(),
        format_count(stats.likes),
        format_count(stats.saves)
    );
    if !card.tags.is_empty() {
        let tags: Vec<String> = card.tags.iter().take(3).map(|t| format!("#{}", t)).collect();
        footer = format!(" {} ·{}", tags.join(" "), footer);
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorscroll_core::{ContentType, ExpertSlug, ParsedContent, Quiz};

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn sample() -> ReelCard {
        let mut parsed = ParsedContent::titled("Why sleep matters");
        parsed.hook_line = Some("You forget half of today by tonight".to_string());
        parsed.body_sections = vec![
            BodySection::Step("Dim the lights".to_string()),
            BodySection::Bullet("No screens".to_string()),
            BodySection::Step("Same bedtime".to_string()),
        ];
        parsed.key_insight = Some("Memory consolidates during deep sleep".to_string());
        parsed.action_items = vec!["Sleep at 11".to_string()];
        parsed.quiz = Quiz::new(
            "When does consolidation happen?",
            vec!["Deep sleep".to_string(), "Lunch".to_string()],
            0,
        );
        ReelCard::generated(
            ExpertSlug::new("dr-mind"),
            "sleep",
            ContentType::Explanation,
            parsed,
        )
        .with_tags(["health"])
    }

    #[test]
    fn test_sections_in_order() {
        let lines = text(&card_lines(&sample(), None, &Theme::default()));
        assert_eq!(lines[0], "Why sleep matters");
        assert!(lines[1].starts_with("explanation · beginner"));
        assert!(lines.contains(&"You forget half of today by tonight".to_string()));
        assert!(lines.contains(&"1. Dim the lights".to_string()));
        assert!(lines.contains(&"• No screens".to_string()));
        assert!(lines.contains(&"2. Same bedtime".to_string()));
        assert!(
            lines.contains(&"💡 Key insight: Memory consolidates during deep sleep".to_string())
        );
        assert!(lines.contains(&"→ Sleep at 11".to_string()));
        assert!(lines.contains(&"A) Deep sleep".to_string()));
        assert!(lines.contains(&"B) Lunch".to_string()));
    }

    #[test]
    fn test_answer_marks_options() {
        let answer = QuizAnswer {
            choice: 1,
            correct: false,
        };
        let lines = text(&card_lines(&sample(), Some(answer), &Theme::default()));
        assert!(lines.contains(&"A) Deep sleep ✓".to_string()));
        assert!(lines.contains(&"B) Lunch ✗".to_string()));
    }

    #[test]
    fn test_media_card() {
        let card = ReelCard::media(
            ExpertSlug::new("eco-emma"),
            "Reef restoration",
            "https://example.com/reef.mp4",
        );
        let lines = text(&card_lines(&card, None, &Theme::default()));
        assert_eq!(lines.last().map(String::as_str), Some("▶ https://example.com/reef.mp4"));
    }

    #[test]
    fn test_footer_tags() {
        assert!(footer(&sample()).starts_with(" #health ·"));
    }
}
