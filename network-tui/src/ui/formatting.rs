use network_types::PostRecord;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::theme::ThemeColors;

// Total horizontal padding from borders (2 per side)
pub const BORDER_PADDING: u16 = 4;

/// Display form of a post's timestamp; unparseable values are shown as sent
pub fn format_timestamp(post: &PostRecord) -> String {
    match post.parsed_timestamp() {
        Some(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        None => post.timestamp.clone(),
    }
}

pub fn format_likes(likes: u32) -> String {
    if likes == 1 {
        "1 like".to_string()
    } else {
        format!("{} likes", likes)
    }
}

/// Wrap post text to `max_width`, highlighting @mentions
pub fn format_post_content_with_width(
    content: &str,
    is_selected: bool,
    theme: &ThemeColors,
    max_width: usize,
) -> Vec<Line<'static>> {
    let mut lines = vec![];
    let wrap_width = max_width.saturating_sub(4).max(1);

    for line in content.lines() {
        for wrapped_line in textwrap::wrap(line, wrap_width) {
            let mut spans = vec![Span::raw("  ")]; // Indent
            for (i, word) in wrapped_line.split(' ').enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                push_styled_word(&mut spans, word, is_selected, theme);
            }
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn push_styled_word(spans: &mut Vec<Span<'static>>, word: &str, is_selected: bool, theme: &ThemeColors) {
    let (color, bold) = if word.starts_with('@') {
        (theme.primary, true)
    } else {
        (theme.text, is_selected)
    };

    let mut style = Style::default().fg(color);
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    spans.push(Span::styled(word.to_string(), style));
}

/// A rect of the given percentages centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::theme_for;
    use network_types::ColorScheme;

    fn post(timestamp: &str) -> PostRecord {
        PostRecord {
            id: 1,
            user: "alice".to_string(),
            body: String::new(),
            timestamp: timestamp.to_string(),
            likes: 0,
            liked: false,
            comments: vec![],
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&post("Mar 04 2024, 09:15 PM")), "2024-03-04 21:15");
        assert_eq!(format_timestamp(&post("yesterday")), "yesterday");
    }

    #[test]
    fn test_format_likes() {
        assert_eq!(format_likes(1), "1 like");
        assert_eq!(format_likes(0), "0 likes");
    }

    #[test]
    fn test_wrapping_respects_width() {
        let theme = theme_for(ColorScheme::Default);
        let lines = format_post_content_with_width("one two three four five six", false, &theme, 14);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width() <= 14);
        }
    }
}
