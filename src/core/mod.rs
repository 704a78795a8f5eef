//! Core domain types: the form record, validation rules, referral context,
//! session storage, and configuration.

pub mod config;
pub mod form;
pub mod referral;
pub mod session;
pub mod validate;

pub use config::Config;
pub use form::{DeveloperProfile, FieldUpdate, FormState, Role};
pub use referral::{SchoolInfo, SchoolReferral};
pub use session::SessionStore;
