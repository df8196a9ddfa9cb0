//! Signup payload and draft types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a new account signs up as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
    Visitor,
}

impl Role {
    /// All roles in display order
    pub fn all() -> &'static [Role] {
        &[Role::Doctor, Role::Patient, Role::Visitor]
    }

    /// Wire value sent to the registration endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::Visitor => "visitor",
        }
    }

    /// Human-readable name for the role picker
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Doctor => "Doctor",
            Role::Patient => "Patient",
            Role::Visitor => "Visitor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            "visitor" => Ok(Role::Visitor),
            other => Err(format!(
                "unknown role '{}', expected one of: doctor, patient, visitor",
                other
            )),
        }
    }
}

/// Validated registration payload, serialized as the request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Editable form state before validation.
///
/// `role` starts unset; the form never preselects one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Fields of the signup form, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignupField {
    FirstName,
    LastName,
    Email,
    Password,
    Role,
}

impl SignupField {
    pub fn all() -> &'static [SignupField] {
        &[
            SignupField::FirstName,
            SignupField::LastName,
            SignupField::Email,
            SignupField::Password,
            SignupField::Role,
        ]
    }

    /// JSON key of the field in the request body
    pub fn key(&self) -> &'static str {
        match self {
            SignupField::FirstName => "firstName",
            SignupField::LastName => "lastName",
            SignupField::Email => "email",
            SignupField::Password => "password",
            SignupField::Role => "role",
        }
    }

    /// Label shown above the input
    pub fn label(&self) -> &'static str {
        match self {
            SignupField::FirstName => "First Name",
            SignupField::LastName => "Last Name",
            SignupField::Email => "Email",
            SignupField::Password => {
                "Password (Uppercase, lowercase, special character and number)"
            }
            SignupField::Role => "Role",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            SignupField::FirstName => "eg: John",
            SignupField::LastName => "Doe",
            SignupField::Email => "john.doe@example.com",
            SignupField::Password => "",
            SignupField::Role => "Select your role",
        }
    }

    /// Wizard step (1-3) on which the field is collected
    pub fn step(&self) -> u8 {
        match self {
            SignupField::FirstName | SignupField::LastName | SignupField::Email => 1,
            SignupField::Password => 2,
            SignupField::Role => 3,
        }
    }

    /// Fields collected on a given wizard step
    pub fn for_step(step: u8) -> Vec<SignupField> {
        Self::all()
            .iter()
            .copied()
            .filter(|f| f.step() == step)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serializes_with_camel_case_keys() {
        let data = SignupFormData {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "Abcdef1!".to_string(),
            role: Role::Patient,
        };

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com",
                "password": "Abcdef1!",
                "role": "patient",
            })
        );
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("doctor".parse::<Role>().unwrap(), Role::Doctor);
        assert_eq!(" Patient ".parse::<Role>().unwrap(), Role::Patient);
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn test_fields_by_step() {
        assert_eq!(
            SignupField::for_step(1),
            vec![
                SignupField::FirstName,
                SignupField::LastName,
                SignupField::Email
            ]
        );
        assert_eq!(SignupField::for_step(2), vec![SignupField::Password]);
        assert_eq!(SignupField::for_step(3), vec![SignupField::Role]);
        assert!(SignupField::for_step(4).is_empty());
    }
}
