//! Render methods for each wizard step

mod identity;
mod password;
mod role;
mod success;
