//! Pages behind the merchant session

mod home;
mod profile;
mod qr_payment;
mod receipt_search;
mod receipt_view;
mod settings;

pub use home::*;
pub use profile::*;
pub use qr_payment::*;
pub use receipt_search::*;
pub use receipt_view::*;
pub use settings::*;
