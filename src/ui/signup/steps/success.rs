//! Terminal panel shown once registration succeeds

use crate::ui::fit_rect;
use crate::ui::signup::SignupScreen;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

impl SignupScreen {
    pub(crate) fn render_success_panel(&self, frame: &mut Frame) {
        // Full screen when the popup would clip the link URLs
        let area = fit_rect(70, 50, 64, 14, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "HealthConnect",
                    Style::default()
                        .fg(Color::LightBlue)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Check mark
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Heading + thanks
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Links
                Constraint::Min(0),
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "✔",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            chunks[0],
        );

        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                "Registration Successful!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Thank you for signing up.",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(heading, chunks[2]);

        let link = |label: &'static str, url: &str| {
            Line::from(vec![
                Span::styled(
                    format!("[ {} ]", label),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    url.to_string(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ])
        };
        let links = Paragraph::new(vec![
            link("Return to Home", &self.links.home_url),
            link("Go to Login", &self.links.login_url),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(links, chunks[4]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[6]);
    }
}
