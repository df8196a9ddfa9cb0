//! Step 3: role selection

use crate::signup::SignupField;
use crate::ui::signup::SignupScreen;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

impl SignupScreen {
    pub(crate) fn render_role_step(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                // Label, three options and the error line
                Constraint::Length(self.field_height(SignupField::Role, area.width)),
                Constraint::Min(0),
            ])
            .split(area);

        self.render_labeled_field(frame, rows[0], SignupField::Role);
    }
}
