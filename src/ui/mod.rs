pub mod form_field;
pub mod signup;
pub mod strength_meter;
pub mod terminal_guard;

pub use signup::{SignupAction, SignupScreen};

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper to create a centered rect
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centered popup that falls back to the whole area when the centered rect
/// would be smaller than `min_width` x `min_height`
pub(crate) fn fit_rect(
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
    r: Rect,
) -> Rect {
    let centered = centered_rect(percent_x, percent_y, r);
    if centered.width < min_width || centered.height < min_height {
        r
    } else {
        centered
    }
}

/// Rows `text` takes when word-wrapped to `width` columns
pub(crate) fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width);
    if width == 0 {
        return 1;
    }

    let mut lines = 1usize;
    let mut used = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if used > 0 && used + 1 + len <= width {
            used += 1 + len;
            continue;
        }
        if used > 0 {
            lines += 1;
        }
        // Words longer than a line are broken across rows
        lines += len.saturating_sub(1) / width;
        used = match len % width {
            0 => width,
            rest => rest,
        };
    }
    u16::try_from(lines).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_falls_back_to_full_area() {
        let large = Rect::new(0, 0, 100, 40);
        let popup = fit_rect(80, 90, 76, 30, large);
        assert_eq!(popup.width, 80);
        assert!(popup.height >= 30);

        let small = Rect::new(0, 0, 80, 24);
        assert_eq!(fit_rect(80, 90, 76, 30, small), small);
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("First Name", 10), 1);
        assert_eq!(wrapped_height("First Name", 9), 2);
        // "Password (Uppercase," / "lowercase, special" / ...
        let label = "Password (Uppercase, lowercase, special character and number)";
        assert_eq!(wrapped_height(label, 80), 1);
        assert_eq!(wrapped_height(label, 30), 3);
        assert_eq!(wrapped_height("abcdefghij", 4), 3);
    }
}
