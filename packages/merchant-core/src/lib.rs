//! Proof Platform merchant dashboard - UI-independent logic
//!
//! Everything the dashboard does that is not markup lives here: the signup
//! flow, login, the authentication context, dashboard loading, payment
//! collection, receipt lookup and profile forms. The web front-end binds these
//! to components; tests drive them directly against the mocks in [`testing`].
//!
//! The server owns every business rule. Code here only shapes requests and
//! turns responses into the next screen state.

pub mod busy;
pub mod collection;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod login;
pub mod notice;
pub mod profile;
pub mod receipts;
pub mod session;
pub mod signup;
pub mod testing;
pub mod traits;

pub use config::Config;
pub use notice::{DisplayError, Notice, Submission};
pub use session::{AuthSession, AuthStore, MemorySessionStore, SessionStore};
pub use signup::{SignupFlow, SignupSession, SignupStep};
pub use traits::{BaseAuthApi, BasePaymentsApi, BaseProfileApi, BaseReceiptsApi};

pub use proof_client::{ApiError, Merchant, ProofClient};
