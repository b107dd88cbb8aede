//! Reusable UI components

mod dashboard_layout;
mod loading;
mod payments_table;
mod redirect;
mod section_cards;
mod sidebar;
mod toast_host;

pub use dashboard_layout::*;
pub use loading::*;
pub use payments_table::*;
pub use redirect::*;
pub use section_cards::*;
pub use sidebar::*;
pub use toast_host::*;
