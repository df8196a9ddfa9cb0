//! Registration API client
//!
//! - `SignupApi` is the seam the wizard submits through
//! - `HttpSignupClient` posts the payload as JSON with reqwest
//! - `ApiError` separates transport failures from rejected requests

pub mod error;
pub mod signup;

pub use error::ApiError;
pub use signup::{HttpSignupClient, SignupApi};
