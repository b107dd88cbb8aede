//! Route definitions for the application

use dioxus::prelude::*;

use crate::components::{DashboardLayout, PublicOnlyLayout};
use crate::pages::merchant::{Home, Profile, QrPayment, ReceiptSearch, ReceiptView, Settings};
use crate::pages::public::{Login, Signup};
use crate::pages::NotFound;

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::Login {})]

    // Public routes
    #[layout(PublicOnlyLayout)]
        #[route("/login")]
        Login {},

        #[route("/signup")]
        Signup {},
    #[end_layout]

    // Merchant routes
    #[layout(DashboardLayout)]
        #[route("/home")]
        Home {},

        #[route("/qr-payment")]
        QrPayment {},

        #[route("/profile")]
        Profile {},

        #[route("/settings")]
        Settings {},

        #[route("/receipt/:receipt_id")]
        ReceiptView { receipt_id: String },

        #[route("/receipt-search")]
        ReceiptSearch {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
