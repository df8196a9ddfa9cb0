//! Step 1: first name, last name and email

use crate::signup::SignupField;
use crate::ui::signup::SignupScreen;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

impl SignupScreen {
    pub(crate) fn render_identity_step(&mut self, frame: &mut Frame, area: Rect) {
        let column = area.width.saturating_sub(2) / 2;
        let names_height = self
            .field_height(SignupField::FirstName, column)
            .max(self.field_height(SignupField::LastName, column));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(names_height), // First / last name
                Constraint::Length(self.field_height(SignupField::Email, area.width)),
                Constraint::Min(0),
            ])
            .split(area);

        let names = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .spacing(2)
            .split(rows[0]);

        self.render_labeled_field(frame, names[0], SignupField::FirstName);
        self.render_labeled_field(frame, names[1], SignupField::LastName);
        self.render_labeled_field(frame, rows[1], SignupField::Email);
    }
}
