//! Merchant signup: phone -> OTP -> (business name) -> PIN
//!
//! [`machine`] decides transitions from server responses alone; [`flow`] runs
//! the API calls and keeps the session the signup screen renders.

mod flow;
mod machine;

pub use flow::*;
pub use machine::*;
