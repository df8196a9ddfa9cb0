//! Three-step signup wizard screen
//!
//! Step 1 collects identity, step 2 the password (with a live strength
//! meter), step 3 the role. "Next" only moves between steps; every field is
//! validated when "Complete Sign Up" is pressed on step 3.

use std::collections::{BTreeMap, BTreeSet};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::api::{ApiError, SignupApi};
use crate::config::{Config, LinksConfig};
use crate::signup::{
    validate, validate_field, FieldErrors, PasswordStrength, Role, SignupDraft, SignupField,
    SignupFormData, Transition, WizardPhase, WizardState,
};
use crate::ui::form_field::FormField;
use crate::ui::strength_meter::StrengthMeter;
use crate::ui::{fit_rect, wrapped_height};

pub mod steps;


const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const TAGLINE: &str = "Join our healthcare platform to access personalized medical services";

/// Below this size the form fills the whole terminal instead of a popup
const FORM_MIN_WIDTH: u16 = 76;
const FORM_MIN_HEIGHT: u16 = 30;

/// What the app loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupAction {
    /// Nothing beyond redrawing
    None,
    /// Validation passed; send this payload
    Submit(SignupFormData),
    /// Leave the application
    Quit,
}

pub struct SignupScreen {
    pub(crate) wizard: WizardState,
    pub(crate) fields: BTreeMap<SignupField, FormField>,
    pub(crate) errors: FieldErrors,
    /// Fields re-validated on every edit (blurred at least once, or after a
    /// submit attempt)
    pub(crate) live_fields: BTreeSet<SignupField>,
    /// Focus index within the current step's fields
    pub(crate) focus: usize,
    pub(crate) links: LinksConfig,
    validate_on_next: bool,
    spinner_frame: usize,
}

impl SignupScreen {
    pub fn new(links: LinksConfig, validate_on_next: bool) -> Self {
        let mut fields = BTreeMap::new();
        for field in SignupField::all() {
            let widget = match field {
                SignupField::Password => FormField::secret(),
                SignupField::Role => FormField::select(
                    Role::all()
                        .iter()
                        .map(|r| r.display_name().to_string())
                        .collect(),
                    field.placeholder(),
                ),
                _ => FormField::text(field.placeholder()),
            };
            fields.insert(*field, widget);
        }

        Self {
            wizard: WizardState::new(),
            fields,
            errors: FieldErrors::default(),
            live_fields: BTreeSet::new(),
            focus: 0,
            links,
            validate_on_next,
            spinner_frame: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.links.clone(), config.wizard.validate_on_next)
    }

    pub fn step(&self) -> u8 {
        self.wizard.step()
    }

    pub fn phase(&self) -> WizardPhase {
        self.wizard.phase()
    }

    pub fn is_submitting(&self) -> bool {
        self.wizard.is_submitting()
    }

    pub fn is_success(&self) -> bool {
        self.wizard.is_success()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: SignupField) -> Option<&str> {
        self.errors.get(field)
    }

    /// Fields shown on the current step
    pub fn step_fields(&self) -> Vec<SignupField> {
        SignupField::for_step(self.wizard.step())
    }

    pub fn focused_field(&self) -> Option<SignupField> {
        self.step_fields().get(self.focus).copied()
    }

    /// Snapshot the current field values
    pub fn draft(&self) -> SignupDraft {
        let text = |field: SignupField| {
            self.fields
                .get(&field)
                .map(FormField::value)
                .unwrap_or_default()
        };
        let role = self
            .fields
            .get(&SignupField::Role)
            .and_then(FormField::selected_index)
            .and_then(|i| Role::all().get(i).copied());

        SignupDraft {
            first_name: text(SignupField::FirstName),
            last_name: text(SignupField::LastName),
            email: text(SignupField::Email),
            password: text(SignupField::Password),
            role,
        }
    }

    pub fn password_strength(&self) -> PasswordStrength {
        PasswordStrength::evaluate(&self.draft().password)
    }

    /// Overwrite a field's value as if the user had typed it
    pub fn set_field(&mut self, field: SignupField, value: &str) {
        if self.wizard.phase() != WizardPhase::Editing {
            return;
        }
        let value = match field {
            SignupField::Role => match value.parse::<Role>() {
                Ok(role) => role.display_name().to_string(),
                Err(_) => return,
            },
            _ => value.to_string(),
        };
        if let Some(widget) = self.fields.get_mut(&field) {
            widget.set_value(&value);
        }
        self.on_field_changed(field);
    }

    /// Route a key press; returns what the app should do next
    pub fn handle_key(&mut self, key: KeyEvent) -> SignupAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return SignupAction::Quit;
        }

        match self.wizard.phase() {
            WizardPhase::Succeeded => {
                return match key.code {
                    KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => SignupAction::Quit,
                    _ => SignupAction::None,
                };
            }
            // Controls are disabled while the request is in flight
            WizardPhase::Submitting => return SignupAction::None,
            WizardPhase::Editing => {}
        }

        match key.code {
            KeyCode::Enter => {
                if self.wizard.is_last_step() {
                    self.choose_focused_option();
                    if let Some(data) = self.submit() {
                        return SignupAction::Submit(data);
                    }
                } else {
                    self.next();
                }
            }
            KeyCode::Esc => self.previous(),
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            code => {
                let Some(field) = self.focused_field() else {
                    return SignupAction::None;
                };
                let consumed = self
                    .fields
                    .get_mut(&field)
                    .map(|w| w.handle_key(code))
                    .unwrap_or(false);
                if consumed {
                    self.on_field_changed(field);
                } else {
                    match code {
                        KeyCode::Down => self.focus_next(),
                        KeyCode::Up => self.focus_prev(),
                        _ => {}
                    }
                }
            }
        }
        SignupAction::None
    }

    /// Type a string into the focused field, one key at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.step_fields().len();
        if count == 0 {
            return;
        }
        self.blur_focused();
        self.focus = (self.focus + 1) % count;
    }

    pub fn focus_prev(&mut self) {
        let count = self.step_fields().len();
        if count == 0 {
            return;
        }
        self.blur_focused();
        self.focus = if self.focus == 0 {
            count - 1
        } else {
            self.focus - 1
        };
    }

    /// "Next" button
    pub fn next(&mut self) {
        if self.wizard.phase() != WizardPhase::Editing {
            return;
        }
        self.blur_focused();

        if self.validate_on_next {
            let mut blocked = false;
            for field in self.step_fields() {
                let message = validate_field(&self.draft(), field);
                blocked |= message.is_some();
                self.live_fields.insert(field);
                self.errors.set(field, message);
            }
            if blocked {
                self.focus_first_error();
                return;
            }
        }

        if self.wizard.next() == Transition::Moved {
            self.focus = 0;
        }
    }

    /// "Previous" button
    pub fn previous(&mut self) {
        if self.wizard.phase() != WizardPhase::Editing {
            return;
        }
        self.blur_focused();
        if self.wizard.previous() == Transition::Moved {
            self.focus = 0;
        }
    }

    /// "Complete Sign Up": validate everything and, if valid, enter the
    /// submitting phase and hand back the payload to send
    pub fn submit(&mut self) -> Option<SignupFormData> {
        if self.wizard.phase() != WizardPhase::Editing || !self.wizard.is_last_step() {
            return None;
        }

        match validate(&self.draft()) {
            Ok(data) => {
                self.errors.clear();
                self.wizard.begin_submit();
                self.spinner_frame = 0;
                tracing::info!(role = %data.role, "Submitting registration");
                Some(data)
            }
            Err(errors) => {
                tracing::debug!(
                    count = errors.len(),
                    fields = %errors.iter().map(|(f, _)| f.key()).collect::<Vec<_>>().join(","),
                    "Signup validation failed"
                );
                self.live_fields.extend(SignupField::all().iter().copied());
                self.errors = errors;
                self.focus_first_error();
                None
            }
        }
    }

    /// Settle the in-flight submission.
    ///
    /// Failures are only logged; the form returns to step 3 so the user can
    /// try again.
    pub fn finish_submission(&mut self, result: Result<(), ApiError>) {
        if !self.wizard.is_submitting() {
            return;
        }
        match result {
            Ok(()) => {
                tracing::info!("User registered successfully");
                self.wizard.finish_submit(true);
            }
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "Failed to register");
                self.wizard.finish_submit(false);
            }
        }
    }

    /// Submit through `api` and wait for the result.
    ///
    /// Returns `None` when validation failed and nothing was sent.
    pub async fn submit_with(&mut self, api: &dyn SignupApi) -> Option<Result<(), ApiError>> {
        let data = self.submit()?;
        let result = api.register(&data).await;
        self.finish_submission(result.clone());
        Some(result)
    }

    /// Advance animations
    pub fn tick(&mut self) {
        if self.wizard.is_submitting() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
    }

    /// Enter on an untouched select takes the highlighted row as the answer
    fn choose_focused_option(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let chosen = self
            .fields
            .get_mut(&field)
            .is_some_and(FormField::choose_highlighted);
        if chosen {
            self.on_field_changed(field);
        }
    }

    fn blur_focused(&mut self) {
        if let Some(field) = self.focused_field() {
            self.live_fields.insert(field);
            let message = validate_field(&self.draft(), field);
            self.errors.set(field, message);
        }
    }

    fn on_field_changed(&mut self, field: SignupField) {
        if self.live_fields.contains(&field) {
            let message = validate_field(&self.draft(), field);
            self.errors.set(field, message);
        }
    }

    /// Move focus to the first invalid field on the current step
    fn focus_first_error(&mut self) {
        if let Some(idx) = self
            .step_fields()
            .iter()
            .position(|f| self.errors.contains(*f))
        {
            self.focus = idx;
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        if self.wizard.is_success() {
            self.render_success_panel(frame);
            return;
        }

        let area = fit_rect(80, 90, FORM_MIN_WIDTH, FORM_MIN_HEIGHT, frame.area());
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
                Span::raw(" Sign Up "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content_width = inner.width.saturating_sub(2);
        let header_height = 1 + wrapped_height(TAGLINE, content_width);
        let step_height = self.step_height(content_width);
        // Spacers are dropped first when the terminal is short
        let needed = header_height + 2 + step_height + 3;
        let spacer = u16::from(inner.height.saturating_sub(2) >= needed + 2);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(header_height), // Title + tagline
                Constraint::Length(spacer),
                Constraint::Length(2), // Progress
                Constraint::Length(spacer),
                Constraint::Min(step_height), // Step fields
                Constraint::Length(1),        // Errors on other steps
                Constraint::Length(1),        // Buttons
                Constraint::Length(1),        // Key hints
            ])
            .split(inner);

        self.render_header(frame, chunks[0]);
        self.render_progress(frame, chunks[2]);

        match self.wizard.step() {
            1 => self.render_identity_step(frame, chunks[4]),
            2 => self.render_password_step(frame, chunks[4]),
            _ => self.render_role_step(frame, chunks[4]),
        }

        self.render_other_step_errors(frame, chunks[5]);
        self.render_buttons(frame, chunks[6]);
        self.render_key_hints(frame, chunks[7]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "HealthConnect",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(header, area);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let step = self.wizard.step();
        let markers: Vec<Span> = (1..=3u8)
            .flat_map(|i| {
                let style = if step >= i {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let gap = if i < 3 { "          " } else { "" };
                [Span::styled(format!("({})", i), style), Span::raw(gap)]
            })
            .collect();

        let track_width = area.width.saturating_sub(2) as usize;
        let filled = (self.wizard.progress() * track_width as f64).round() as usize;
        let track = Line::from(vec![
            Span::styled("━".repeat(filled), Style::default().fg(Color::Cyan)),
            Span::styled(
                "─".repeat(track_width.saturating_sub(filled)),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let progress =
            Paragraph::new(vec![Line::from(markers), track]).alignment(Alignment::Center);
        frame.render_widget(progress, area);
    }

    fn render_other_step_errors(&self, frame: &mut Frame, area: Rect) {
        let step = self.wizard.step();
        let elsewhere: Vec<&str> = self
            .errors
            .iter()
            .filter(|(f, _)| f.step() != step)
            .map(|(f, _)| f.label().split(" (").next().unwrap_or(""))
            .collect();
        if elsewhere.is_empty() {
            return;
        }
        let line = Paragraph::new(Line::from(Span::styled(
            format!("Fix on other steps: {}", elsewhere.join(", ")),
            Style::default().fg(Color::Red),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(line, area);
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let previous_disabled = self.wizard.is_first_step() || self.wizard.is_submitting();
        let previous_style = if previous_disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        frame.render_widget(
            Paragraph::new(Span::styled("[ ← Previous ]", previous_style)),
            halves[0],
        );

        let primary = if self.wizard.is_submitting() {
            Span::styled(
                format!("[ {} Submitting... ]", SPINNER[self.spinner_frame]),
                Style::default().fg(Color::DarkGray),
            )
        } else if self.wizard.is_last_step() {
            Span::styled(
                "[ Complete Sign Up ]",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "[ Next → ]",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(
            Paragraph::new(primary).alignment(Alignment::Right),
            halves[1],
        );
    }

    fn render_key_hints(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" field  "),
        ];
        if self.wizard.step() == 3 {
            spans.push(Span::styled("Space", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(" choose  "));
        }
        spans.extend([
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(if self.wizard.is_last_step() {
                " sign up  "
            } else {
                " next  "
            }),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" back  "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]);
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }

    /// Rows for the wrapped label plus the bordered input at `width`
    pub(crate) fn input_block_height(&self, field: SignupField, width: u16) -> u16 {
        let input_height = self
            .fields
            .get(&field)
            .map(FormField::render_height)
            .unwrap_or(1);
        wrapped_height(field.label(), width) + input_height + 2
    }

    /// Rows for label, input and the inline error line
    pub(crate) fn field_height(&self, field: SignupField, width: u16) -> u16 {
        self.input_block_height(field, width) + 1
    }

    /// Rows the current step needs to show every field at `width`
    pub(crate) fn step_height(&self, width: u16) -> u16 {
        match self.wizard.step() {
            1 => {
                let column = width.saturating_sub(2) / 2;
                let names = self
                    .field_height(SignupField::FirstName, column)
                    .max(self.field_height(SignupField::LastName, column));
                names + self.field_height(SignupField::Email, width)
            }
            2 => self.input_block_height(SignupField::Password, width) + StrengthMeter::HEIGHT + 1,
            _ => self.field_height(SignupField::Role, width),
        }
    }

    /// Label, bordered input and inline error for one field
    pub(crate) fn render_labeled_field(&mut self, frame: &mut Frame, area: Rect, field: SignupField) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.input_block_height(field, area.width)),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_field_input(frame, rows[0], field);
        self.render_field_error(frame, rows[1], field);
    }

    /// Label row followed by the bordered input
    pub(crate) fn render_field_input(&mut self, frame: &mut Frame, area: Rect, field: SignupField) {
        let focused = self.focused_field() == Some(field);
        let has_error = self.errors.contains(field);
        let Some(widget) = self.fields.get_mut(&field) else {
            return;
        };

        let label_height = wrapped_height(field.label(), area.width);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(label_height), Constraint::Min(3)])
            .split(area);

        let label_style = if has_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(field.label(), label_style)).wrap(Wrap { trim: true }),
            rows[0],
        );

        let border_color = if focused {
            Color::Cyan
        } else if has_error {
            Color::Red
        } else {
            Color::Gray
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let input_area = input_block.inner(rows[1]);
        frame.render_widget(input_block, rows[1]);
        widget.render(frame, input_area, focused);
    }

    /// Inline validation message, if the field has one
    pub(crate) fn render_field_error(&self, frame: &mut Frame, area: Rect, field: SignupField) {
        if let Some(message) = self.errors.get(field) {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
                area,
            );
        }
    }
}
