use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::formatting::centered_rect;
use super::theme::get_theme_colors;
use crate::app::App;

/// New post composer
pub fn render_composer_modal(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = get_theme_colors(app);
    let modal_area = centered_rect(70, 50, area);

    frame.render_widget(Clear, modal_area);

    let outer_block = Block::default()
        .title(" New Post ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));
    let inner = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    app.composer
        .textarea
        .set_style(Style::default().fg(theme.primary));
    app.composer
        .textarea
        .set_cursor_style(Style::default().fg(theme.background).bg(theme.primary));
    frame.render_widget(&app.composer.textarea, chunks[0]);

    let count = app.composer.char_count();
    let count_color = if count >= app.composer.max_chars {
        theme.error
    } else {
        theme.text_dim
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}/{}", count, app.composer.max_chars),
            Style::default().fg(count_color),
        ))
        .alignment(Alignment::Right),
        chunks[1],
    );

    let instructions = if app.composer.submitting {
        "Posting..."
    } else {
        "Type to compose | Ctrl+S: Submit | Esc: Close"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(instructions, Style::default().fg(theme.text_dim)))
            .alignment(Alignment::Center),
        chunks[2],
    );
}

fn shortcuts() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    vec![
        (
            "Navigation",
            vec![
                ("a", "All posts"),
                ("f", "Following feed"),
                ("p", "My profile"),
                ("Enter / u", "Open author's profile"),
                ("[ / Alt+←", "Back"),
                ("] / Alt+→", "Forward"),
                ("r", "Reload"),
                ("j / k", "Move selection"),
            ],
        ),
        (
            "Actions",
            vec![
                ("l", "Like / unlike selected post"),
                ("F", "Follow / unfollow this profile"),
                ("e", "Edit selected post"),
                ("n", "New post"),
            ],
        ),
        (
            "Editing",
            vec![("Enter / Ctrl+S", "Save"), ("Esc", "Cancel")],
        ),
        ("General", vec![("?", "Toggle help"), ("q / Ctrl+C", "Quit")]),
    ]
}

pub fn render_help_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let modal_area = centered_rect(70, 80, area);

    frame.render_widget(Clear, modal_area);

    let mut lines = vec![Line::from("")];
    for (category, items) in shortcuts() {
        lines.push(Line::from(Span::styled(
            category,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )));
        for (key, description) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", key), Style::default().fg(theme.success)),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                .title(" Keyboard Shortcuts ")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, modal_area);
}
