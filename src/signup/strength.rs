//! Password strength scoring
//!
//! The score is the number of satisfied predicates out of five:
//! minimum length, an uppercase letter, a lowercase letter, a digit and a
//! symbol. Character classes are ASCII only, so the result does not depend
//! on locale.

/// Minimum password length counted by the meter and required by validation
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Highest possible score
pub const MAX_SCORE: u8 = 5;

pub fn has_min_length(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

pub fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

/// Anything outside `[A-Za-z0-9]` counts, including spaces and non-ASCII
pub fn has_symbol(password: &str) -> bool {
    password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Count of satisfied strength predicates, 0..=5
pub fn score(password: &str) -> u8 {
    [
        has_min_length(password),
        has_uppercase(password),
        has_lowercase(password),
        has_digit(password),
        has_symbol(password),
    ]
    .into_iter()
    .filter(|ok| *ok)
    .count() as u8
}

/// Color bucket for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    /// Nothing entered yet
    Empty,
    /// Score 1-2
    Low,
    /// Score 3
    Medium,
    /// Score 4-5
    High,
}

/// Evaluated strength of a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    score: u8,
}

impl PasswordStrength {
    pub fn evaluate(password: &str) -> Self {
        Self {
            score: score(password),
        }
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn label(&self) -> &'static str {
        match self.score {
            0 => "Enter a password",
            1 => "Very weak",
            2 => "Weak",
            3 => "Medium",
            4 => "Strong",
            _ => "Very strong",
        }
    }

    pub fn level(&self) -> StrengthLevel {
        match self.score {
            0 => StrengthLevel::Empty,
            1 | 2 => StrengthLevel::Low,
            3 => StrengthLevel::Medium,
            _ => StrengthLevel::High,
        }
    }

    /// Fill state of the five meter segments; segment `i` (1-based) is
    /// filled when the score is at least `i`
    pub fn segments(&self) -> [bool; MAX_SCORE as usize] {
        let mut segments = [false; MAX_SCORE as usize];
        for (i, segment) in segments.iter_mut().enumerate() {
            *segment = self.score as usize > i;
        }
        segments
    }

    /// Text rendering of the meter, e.g. "████░"
    pub fn bar(&self) -> String {
        self.segments()
            .iter()
            .map(|filled| if *filled { '█' } else { '░' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_scores() {
        assert_eq!(score(""), 0);
        assert_eq!(score("Abcdef1!"), 5);
        assert_eq!(score("abcdefgh"), 2);
        assert_eq!(score("ABCDEFGH"), 2);
        assert_eq!(score("Abcdefg1"), 4);
        assert_eq!(score("Ab1!"), 4);
        assert_eq!(score("a"), 1);
        assert_eq!(score("12345678"), 2);
    }

    #[test]
    fn test_every_predicate_combination() {
        // One representative character per predicate, padded for length
        let pieces = ["A", "b", "1", "!"];
        for mask in 0u8..16 {
            let mut base = String::new();
            for (bit, piece) in pieces.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    base.push_str(piece);
                }
            }
            let classes = mask.count_ones() as u8;
            assert_eq!(score(&base), classes, "short password {:?}", base);

            if let Some(filler) = base.chars().next() {
                let long: String = base
                    .chars()
                    .chain(std::iter::repeat(filler))
                    .take(MIN_PASSWORD_LENGTH)
                    .collect();
                assert_eq!(score(&long), classes + 1, "long password {:?}", long);
            }
        }
    }

    #[test]
    fn test_adding_missing_class_never_lowers_score() {
        let samples = ["", "abc", "ABC", "123", "!!", "abcdefgh", "Abcdefg1"];
        let additions = ['Z', 'z', '7', '#'];
        for sample in samples {
            let before = score(sample);
            for extra in additions {
                let after = score(&format!("{}{}", sample, extra));
                assert!(after >= before, "{:?} + {:?}", sample, extra);
                assert!(after <= MAX_SCORE);
            }
        }
    }

    #[test]
    fn test_non_ascii_letters_count_as_symbols() {
        assert!(!has_uppercase("É"));
        assert!(!has_lowercase("é"));
        assert!(has_symbol("é"));
        assert_eq!(score("é"), 1);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(!has_min_length("ééééééé"));
        assert!(has_min_length("éééééééé"));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = ["", "a", "aB", "aB1", "aB1!", "aB1!aaaa"]
            .iter()
            .map(|p| PasswordStrength::evaluate(p).label())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Enter a password",
                "Very weak",
                "Weak",
                "Medium",
                "Strong",
                "Very strong"
            ]
        );
    }

    #[test]
    fn test_levels() {
        assert_eq!(PasswordStrength::evaluate("").level(), StrengthLevel::Empty);
        assert_eq!(PasswordStrength::evaluate("a").level(), StrengthLevel::Low);
        assert_eq!(PasswordStrength::evaluate("aB").level(), StrengthLevel::Low);
        assert_eq!(
            PasswordStrength::evaluate("aB1").level(),
            StrengthLevel::Medium
        );
        assert_eq!(
            PasswordStrength::evaluate("aB1!").level(),
            StrengthLevel::High
        );
        assert_eq!(
            PasswordStrength::evaluate("Abcdef1!").level(),
            StrengthLevel::High
        );
    }

    #[test]
    fn test_segments_and_bar() {
        let strength = PasswordStrength::evaluate("Abcdefg1");
        assert_eq!(strength.segments(), [true, true, true, true, false]);
        assert_eq!(strength.bar(), "████░");
        assert_eq!(PasswordStrength::evaluate("").bar(), "░░░░░");
    }
}
