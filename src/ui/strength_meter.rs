//! Five-segment password strength bar with a label underneath

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::signup::{PasswordStrength, StrengthLevel};

/// Color for filled segments and the label at a given level
pub fn level_color(level: StrengthLevel) -> Color {
    match level {
        StrengthLevel::Empty => Color::DarkGray,
        StrengthLevel::Low => Color::Red,
        StrengthLevel::Medium => Color::Yellow,
        StrengthLevel::High => Color::Green,
    }
}

/// Needs two rows: the bar and the label
pub struct StrengthMeter {
    strength: PasswordStrength,
}

impl StrengthMeter {
    pub fn new(password: &str) -> Self {
        Self {
            strength: PasswordStrength::evaluate(password),
        }
    }

    pub const HEIGHT: u16 = 2;
}

impl Widget for StrengthMeter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let color = level_color(self.strength.level());
        let segment_width = (rows[0].width.saturating_sub(4) / 5).max(1) as usize;
        let segment = "█".repeat(segment_width);

        let mut spans = Vec::with_capacity(9);
        for (i, filled) in self.strength.segments().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if *filled {
                Style::default().fg(color)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(segment.clone(), style));
        }
        Paragraph::new(Line::from(spans)).render(rows[0], buf);

        Paragraph::new(Line::from(Span::styled(
            self.strength.label(),
            Style::default().fg(color),
        )))
        .render(rows[1], buf);
    }
}
