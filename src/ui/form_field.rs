//! Reusable form field widgets for TUI forms

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

/// Character drawn in place of each masked character
const MASK_CHAR: char = '•';

/// A form field widget that can handle different input types
#[derive(Debug, Clone)]
pub enum FormField {
    /// Single-line text input; `cursor_pos` counts characters, not bytes
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: String,
        masked: bool,
    },
    /// Selection from predefined options with nothing chosen initially
    EnumSelect {
        options: Vec<String>,
        /// Highlighted row
        highlighted: usize,
        /// Chosen option, if any
        selected: Option<usize>,
        placeholder: String,
        list_state: ListState,
    },
}

impl FormField {
    pub fn text(placeholder: impl Into<String>) -> Self {
        FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.into(),
            masked: false,
        }
    }

    /// Text input whose characters are never drawn
    pub fn secret() -> Self {
        FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: String::new(),
            masked: true,
        }
    }

    pub fn select(options: Vec<String>, placeholder: impl Into<String>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        FormField::EnumSelect {
            options,
            highlighted: 0,
            selected: None,
            placeholder: placeholder.into(),
            list_state,
        }
    }

    /// Get the current value as a string (empty when nothing is selected)
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } => value.clone(),
            FormField::EnumSelect {
                options, selected, ..
            } => selected
                .and_then(|i| options.get(i))
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Set the value from a string
    pub fn set_value(&mut self, new_value: &str) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => {
                *value = new_value.to_string();
                *cursor_pos = value.chars().count();
            }
            FormField::EnumSelect {
                options,
                highlighted,
                selected,
                list_state,
                ..
            } => {
                if let Some(idx) = options.iter().position(|o| o == new_value) {
                    *highlighted = idx;
                    *selected = Some(idx);
                    list_state.select(Some(idx));
                }
            }
        }
    }

    /// Index of the chosen option for select fields
    pub fn selected_index(&self) -> Option<usize> {
        match self {
            FormField::EnumSelect { selected, .. } => *selected,
            FormField::TextInput { .. } => None,
        }
    }

    /// Choose the highlighted option of a select that has nothing chosen yet.
    /// Returns true if the choice changed.
    pub fn choose_highlighted(&mut self) -> bool {
        match self {
            FormField::EnumSelect {
                options,
                highlighted,
                selected,
                ..
            } if selected.is_none() && *highlighted < options.len() => {
                *selected = Some(*highlighted);
                true
            }
            _ => false,
        }
    }

    /// Handle a key event, returns true if the key was consumed (and may have
    /// changed the value)
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => match key {
                KeyCode::Char(c) => {
                    let at = byte_offset(value, *cursor_pos);
                    value.insert(at, c);
                    *cursor_pos += 1;
                    true
                }
                KeyCode::Backspace => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                        let at = byte_offset(value, *cursor_pos);
                        value.remove(at);
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.chars().count() {
                        let at = byte_offset(value, *cursor_pos);
                        value.remove(at);
                    }
                    true
                }
                KeyCode::Left => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                    }
                    true
                }
                KeyCode::Right => {
                    if *cursor_pos < value.chars().count() {
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.chars().count();
                    true
                }
                _ => false,
            },
            FormField::EnumSelect {
                options,
                highlighted,
                selected,
                list_state,
                ..
            } => match key {
                KeyCode::Up | KeyCode::Char('k') => {
                    if *highlighted > 0 {
                        *highlighted -= 1;
                        list_state.select(Some(*highlighted));
                    }
                    true
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if *highlighted < options.len().saturating_sub(1) {
                        *highlighted += 1;
                        list_state.select(Some(*highlighted));
                    }
                    true
                }
                KeyCode::Char(' ') => {
                    if *highlighted < options.len() {
                        *selected = Some(*highlighted);
                    }
                    true
                }
                _ => false,
            },
        }
    }

    /// Get the height needed to render this field's input area
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextInput { .. } => 1,
            FormField::EnumSelect { options, .. } => (options.len() as u16).clamp(1, 5),
        }
    }

    /// Render the field
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                masked,
            } => {
                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    let mut text: String = if *masked {
                        std::iter::repeat(MASK_CHAR)
                            .take(value.chars().count())
                            .collect()
                    } else {
                        value.clone()
                    };
                    if focused {
                        let at = byte_offset(&text, *cursor_pos);
                        text.insert(at, '|');
                    }
                    Line::from(text)
                };

                let para = Paragraph::new(content).style(Style::default().fg(if focused {
                    Color::White
                } else {
                    Color::Gray
                }));
                frame.render_widget(para, area);
            }
            FormField::EnumSelect {
                options,
                selected,
                placeholder,
                list_state,
                ..
            } => {
                let items: Vec<ListItem> = options
                    .iter()
                    .enumerate()
                    .map(|(i, opt)| {
                        let chosen = *selected == Some(i);
                        let marker = if chosen { "(*) " } else { "( ) " };
                        let style = if chosen {
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Gray)
                        };
                        ListItem::new(Line::from(vec![
                            Span::styled(marker, style),
                            Span::styled(opt.as_str(), style),
                        ]))
                    })
                    .collect();

                let mut list = List::new(items);
                if focused {
                    list = list
                        .highlight_style(
                            Style::default()
                                .add_modifier(Modifier::REVERSED)
                                .fg(Color::Cyan),
                        )
                        .highlight_symbol("> ");
                }

                if selected.is_none() && !focused {
                    let hint = Paragraph::new(Line::from(Span::styled(
                        placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    )));
                    frame.render_widget(hint, area);
                } else {
                    frame.render_stateful_widget(list, area, list_state);
                }
            }
        }
    }
}

/// Byte offset of the `char_idx`-th character, clamped to the end
fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
