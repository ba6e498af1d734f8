use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::formatting::{format_likes, format_post_content_with_width, format_timestamp, BORDER_PADDING};
use super::theme::{get_theme_colors, ThemeColors};
use crate::app::App;
use crate::view::{EditState, LikeColor, Node, Panel, PanelHeader, RenderedPostEntry};

/// Tabs for the three panels, with the visible one highlighted
pub fn render_route_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let visible = app.visible_panel();

    let mut spans = vec![];
    for (panel, label) in [
        (Panel::Feed, " All Posts "),
        (Panel::Following, " Following "),
        (Panel::Profile, " Profile "),
    ] {
        let style = if visible == Some(panel) {
            Style::default()
                .fg(theme.background)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_dim)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        app.router.history().location().to_string(),
        Style::default().fg(theme.secondary),
    ));

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Network "),
    );
    frame.render_widget(bar, area);
}

pub fn render_panel_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let Some(panel) = app.visible_panel() else {
        return;
    };

    let lines = match app.router.panels().header(panel) {
        PanelHeader::Empty => vec![Line::from("")],
        PanelHeader::Loading { title } => vec![Line::from(vec![
            Span::styled(title.clone(), Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
            Span::styled("  loading...", Style::default().fg(theme.text_dim)),
        ])],
        PanelHeader::Titled { title } => vec![Line::from(Span::styled(
            title.clone(),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ))],
        PanelHeader::Profile(header) => {
            let mut first = vec![Span::styled(
                format!("@{}", header.username),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )];
            if let Some(button) = &header.follow {
                let color = if button.is_flashing(Instant::now()) {
                    theme.success
                } else if button.enabled {
                    theme.accent
                } else {
                    theme.text_dim
                };
                first.push(Span::raw("   "));
                first.push(Span::styled(
                    format!("[ {} ]", button.label.as_str()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            }
            vec![
                Line::from(first),
                Line::from(vec![
                    Span::styled(format!("{} ", header.followers_count), Style::default().fg(theme.text)),
                    Span::styled("followers  ", Style::default().fg(theme.text_dim)),
                    Span::styled(format!("{} ", header.following_count), Style::default().fg(theme.text)),
                    Span::styled("following", Style::default().fg(theme.text_dim)),
                ]),
            ]
        }
    };

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(header, area);
}

/// Render the visible panel's render target
pub fn render_feed(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let Some(panel) = app.visible_panel() else {
        return;
    };
    let target = app.router.panels().target(panel);
    let width = area.width.saturating_sub(BORDER_PADDING) as usize;

    let mut lines: Vec<Line<'static>> = vec![];
    let mut selected_line = 0usize;
    let mut entry_index = 0usize;

    for node in target.nodes() {
        match node {
            Node::Skeleton => {
                lines.push(Line::from(Span::styled(
                    "  ░░░░░░░░  ░░░░░",
                    Style::default().fg(theme.text_dim),
                )));
                lines.push(Line::from(Span::styled(
                    format!("  {}", "░".repeat(width.saturating_sub(4).min(48))),
                    Style::default().fg(theme.text_dim),
                )));
                lines.push(Line::from(""));
            }
            Node::Message(text) => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  {}", text),
                    Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC),
                )));
            }
            Node::Post(entry) => {
                let is_selected = entry_index == app.selected;
                if is_selected {
                    selected_line = lines.len();
                }
                lines.extend(entry_lines(entry, is_selected, &theme, width));
                entry_index += 1;
            }
        }
    }

    // Keep the selected entry in view
    let visible_rows = area.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(visible_rows / 3);

    let feed = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(feed, area);
}

fn entry_lines(entry: &RenderedPostEntry, is_selected: bool, theme: &ThemeColors, width: usize) -> Vec<Line<'static>> {
    let marker = if is_selected { "▶ " } else { "  " };
    let visual = entry.like.visual();
    let like_color = match visual.color {
        LikeColor::Red => theme.like,
        LikeColor::Muted => theme.text_dim,
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(
            format!("@{}", entry.post.user),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", format_timestamp(&entry.post)), Style::default().fg(theme.text_dim)),
    ])];

    match &entry.edit {
        EditState::Viewing => {
            lines.extend(format_post_content_with_width(&entry.post.body, is_selected, theme, width));
        }
        EditState::Editing { draft, saving } => {
            let hint = if *saving {
                "saving..."
            } else {
                "Enter/Ctrl+S: Save | Esc: Cancel"
            };
            lines.push(Line::from(vec![
                Span::styled("  ┃ ", Style::default().fg(theme.warning)),
                Span::styled(format!("{}▏", draft), Style::default().fg(theme.text)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", hint),
                Style::default().fg(theme.text_dim),
            )));
        }
    }

    let mut footer = vec![
        Span::raw("  "),
        Span::styled(visual.glyph.symbol(), Style::default().fg(like_color)),
        Span::styled(format!(" {}", format_likes(entry.like.likes)), Style::default().fg(theme.text_dim)),
    ];
    if !entry.post.comments.is_empty() {
        footer.push(Span::styled(
            format!("  {} comments", entry.post.comments.len()),
            Style::default().fg(theme.text_dim),
        ));
    }
    if entry.can_edit() && !entry.is_editing() {
        footer.push(Span::styled("  [e] edit", Style::default().fg(theme.secondary)));
    }
    lines.push(Line::from(footer));
    lines.push(Line::from(""));

    if is_selected {
        lines
            .into_iter()
            .map(|line| line.style(Style::default().bg(theme.highlight_bg)))
            .collect()
    } else {
        lines
    }
}

/// Single-line notice banner
pub fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let Some(notice) = app.notices.current() else {
        return;
    };
    let color = match notice.kind {
        crate::notice::NoticeKind::Success => theme.success,
        crate::notice::NoticeKind::Info => theme.warning,
        crate::notice::NoticeKind::Failure => theme.error,
    };

    let banner = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", notice.text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(banner, area);
}
