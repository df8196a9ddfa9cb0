//! Field rules for the signup form
//!
//! Each field has a small ordered list of checks; the first failing check
//! supplies the message shown under that field.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

use super::model::{SignupDraft, SignupField, SignupFormData};
use super::strength;

/// `local@domain.tld` with no whitespace and a dotted domain
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-']+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Password checks in reporting order
const PASSWORD_RULES: &[(fn(&str) -> bool, &str)] = &[
    (
        strength::has_min_length,
        "Password must be at least 8 characters",
    ),
    (
        strength::has_uppercase,
        "Password must contain at least one uppercase letter",
    ),
    (
        strength::has_lowercase,
        "Password must contain at least one lowercase letter",
    ),
    (
        strength::has_digit,
        "Password must contain at least one number",
    ),
    (
        strength::has_symbol,
        "Password must contain at least one special character",
    ),
];

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn check_required(value: &str, message: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        return Some("Email is required".to_string());
    }
    if !is_valid_email(email) {
        return Some("Please enter a valid email address".to_string());
    }
    None
}

fn check_password(password: &str) -> Option<String> {
    PASSWORD_RULES
        .iter()
        .find(|(rule, _)| !rule(password))
        .map(|(_, message)| (*message).to_string())
}

/// Validate a single field of the draft, returning its error message
pub fn validate_field(draft: &SignupDraft, field: SignupField) -> Option<String> {
    match field {
        SignupField::FirstName => check_required(&draft.first_name, "First name is required"),
        SignupField::LastName => check_required(&draft.last_name, "Last name is required"),
        SignupField::Email => check_email(&draft.email),
        SignupField::Password => check_password(&draft.password),
        SignupField::Role => draft
            .role
            .is_none()
            .then(|| "Please select a role".to_string()),
    }
}

/// Validate the whole draft, producing the request payload on success
pub fn validate(draft: &SignupDraft) -> Result<SignupFormData, FieldErrors> {
    let mut errors = FieldErrors::default();
    for field in SignupField::all() {
        if let Some(message) = validate_field(draft, *field) {
            errors.insert(*field, message);
        }
    }

    match draft.role {
        Some(role) if errors.is_empty() => Ok(SignupFormData {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
            role,
        }),
        _ => Err(errors),
    }
}

/// Field-keyed validation messages, ordered by field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<SignupField, String>,
}

impl FieldErrors {
    pub fn insert(&mut self, field: SignupField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn remove(&mut self, field: SignupField) {
        self.errors.remove(&field);
    }

    /// Replace the entry for `field` with a fresh validation result
    pub fn set(&mut self, field: SignupField, message: Option<String>) {
        match message {
            Some(message) => self.insert(field, message),
            None => self.remove(field),
        }
    }

    pub fn get(&self, field: SignupField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: SignupField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignupField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// First field with an error
    pub fn first_field(&self) -> Option<SignupField> {
        self.errors.keys().next().copied()
    }

    /// Wizard step owning the first error
    pub fn first_step(&self) -> Option<u8> {
        self.first_field().map(|f| f.step())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field.key(), message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::model::Role;

    fn valid_draft() -> SignupDraft {
        SignupDraft {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "Abcdef1!".to_string(),
            role: Some(Role::Patient),
        }
    }

    #[test]
    fn test_valid_draft_produces_payload() {
        let data = validate(&valid_draft()).unwrap();
        assert_eq!(data.first_name, "John");
        assert_eq!(data.role, Role::Patient);
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = validate(&SignupDraft::default()).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(
            errors.get(SignupField::FirstName),
            Some("First name is required")
        );
        assert_eq!(
            errors.get(SignupField::LastName),
            Some("Last name is required")
        );
        assert_eq!(errors.get(SignupField::Email), Some("Email is required"));
        assert_eq!(
            errors.get(SignupField::Password),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(errors.get(SignupField::Role), Some("Please select a role"));
        assert_eq!(errors.first_field(), Some(SignupField::FirstName));
        assert_eq!(errors.first_step(), Some(1));
    }

    #[test]
    fn test_whitespace_name_is_rejected() {
        let mut draft = valid_draft();
        draft.first_name = "   ".to_string();
        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(SignupField::FirstName));
    }

    #[test]
    fn test_email_syntax() {
        for ok in [
            "john.doe@example.com",
            "a+tag@sub.example.org",
            "o'neil@example.ie",
        ] {
            assert!(is_valid_email(ok), "{}", ok);
        }
        for bad in [
            "john",
            "john@",
            "@example.com",
            "john@example",
            "john doe@example.com",
            "john@exa mple.com",
            "john@@example.com",
            "john@-example.com",
        ] {
            assert!(!is_valid_email(bad), "{}", bad);
        }

        let mut draft = valid_draft();
        draft.email = "not-an-email".to_string();
        assert_eq!(
            validate_field(&draft, SignupField::Email).as_deref(),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_password_reports_first_missing_rule() {
        let cases = [
            ("Ab1!", "Password must be at least 8 characters"),
            (
                "abcdef1!",
                "Password must contain at least one uppercase letter",
            ),
            (
                "ABCDEF1!",
                "Password must contain at least one lowercase letter",
            ),
            ("Abcdefg!", "Password must contain at least one number"),
            (
                "Abcdefg1",
                "Password must contain at least one special character",
            ),
        ];
        for (password, expected) in cases {
            let mut draft = valid_draft();
            draft.password = password.to_string();
            assert_eq!(
                validate_field(&draft, SignupField::Password).as_deref(),
                Some(expected),
                "{}",
                password
            );
        }
    }

    #[test]
    fn test_password_accepted_only_at_full_strength() {
        for password in ["Abcdef1!", "Zz9#Zz9#", "Correct Horse 9"] {
            assert_eq!(strength::score(password), strength::MAX_SCORE);
            let mut draft = valid_draft();
            draft.password = password.to_string();
            assert!(validate_field(&draft, SignupField::Password).is_none());
        }
    }

    #[test]
    fn test_missing_role() {
        let mut draft = valid_draft();
        draft.role = None;
        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.first_field(), Some(SignupField::Role));
        assert_eq!(errors.first_step(), Some(3));
    }

    #[test]
    fn test_field_errors_set_and_display() {
        let mut errors = FieldErrors::default();
        errors.set(SignupField::Role, Some("Please select a role".to_string()));
        errors.set(SignupField::Email, Some("Email is required".to_string()));
        assert_eq!(
            errors.to_string(),
            "email: Email is required\nrole: Please select a role"
        );

        errors.set(SignupField::Email, None);
        assert_eq!(errors.len(), 1);
        assert!(!errors.contains(SignupField::Email));
    }
}
