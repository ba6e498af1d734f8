// UI module - split into cohesive submodules for maintainability
pub mod theme;
mod formatting;
mod overlays;
mod panels;

// Re-export main render function
pub use self::render_main::render;

// Main render logic
mod render_main {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, Paragraph},
        Frame,
    };

    use super::overlays::{render_composer_modal, render_help_modal};
    use super::panels::{render_feed, render_notice, render_panel_header, render_route_bar};
    use super::theme::get_theme_colors;
    use crate::app::{App, InputMode};
    use crate::view::PanelHeader;

    /// Render the UI
    pub fn render(app: &mut App, frame: &mut Frame) {
        let area = frame.area();

        let theme = get_theme_colors(app);

        frame.render_widget(Clear, area);

        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        const MIN_WIDTH: u16 = 50;
        const MIN_HEIGHT: u16 = 16;

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Terminal Too Small",
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(theme.text),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );

            frame.render_widget(warning, area);
            return;
        }

        let header_height = match app.visible_panel().map(|panel| app.router.panels().header(panel)) {
            Some(PanelHeader::Profile(_)) => 4,
            _ => 3,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(header_height),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_route_bar(frame, app, chunks[0]);
        render_panel_header(frame, app, chunks[1]);
        render_feed(frame, app, chunks[2]);
        render_notice(frame, app, chunks[3]);
        render_footer(frame, app, chunks[4]);

        if app.composer.open {
            render_composer_modal(frame, app, area);
        }
        if app.show_help {
            render_help_modal(frame, app, area);
        }
    }

    fn render_footer(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
        let theme = get_theme_colors(app);
        let hints = match app.input_mode {
            InputMode::Navigation => "a: all | f: following | p: profile | l: like | n: new | ?: help | q: quit",
            InputMode::Composing => "Ctrl+S: submit | Esc: close",
            InputMode::Editing(_) => "Enter: save | Esc: cancel",
        };
        let user = app.session().username().unwrap_or("anonymous");

        let footer = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", hints), Style::default().fg(theme.text_dim)),
            Span::styled(
                format!("| {} @ {}", user, app.server_label),
                Style::default().fg(theme.secondary),
            ),
        ]));
        frame.render_widget(footer, area);
    }
}
