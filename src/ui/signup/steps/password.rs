//! Step 2: password with live strength meter

use crate::signup::SignupField;
use crate::ui::signup::SignupScreen;
use crate::ui::strength_meter::StrengthMeter;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

impl SignupScreen {
    pub(crate) fn render_password_step(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.input_block_height(SignupField::Password, area.width)),
                Constraint::Length(StrengthMeter::HEIGHT),
                Constraint::Length(1), // Error
                Constraint::Min(0),
            ])
            .split(area);

        self.render_field_input(frame, rows[0], SignupField::Password);
        frame.render_widget(StrengthMeter::new(&self.draft().password), rows[1]);
        self.render_field_error(frame, rows[2], SignupField::Password);
    }
}
