//! HealthConnect - terminal signup wizard for the HealthConnect platform
//!
//! The library holds the form model, validation, strength scoring and the
//! wizard screen so the binary and integration tests share one implementation.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod signup;
pub mod ui;
