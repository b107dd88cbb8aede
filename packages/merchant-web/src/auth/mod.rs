//! Authentication for the dashboard

mod context;
mod storage;

pub use context::*;
pub use storage::*;
