//! Signup form domain: payload types, field rules, password strength and
//! the wizard state machine. Nothing in here touches the terminal or network.

pub mod model;
pub mod strength;
pub mod validation;
pub mod wizard;

pub use model::{Role, SignupDraft, SignupField, SignupFormData};
pub use strength::{PasswordStrength, StrengthLevel};
pub use validation::{validate, validate_field, FieldErrors};
pub use wizard::{Transition, WizardPhase, WizardState};
