//! Pages reachable without a session

mod login;
mod signup;

pub use login::*;
pub use signup::*;
