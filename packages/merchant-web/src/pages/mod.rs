//! Page components

pub mod merchant;
pub mod public;

mod not_found;

pub use not_found::*;
