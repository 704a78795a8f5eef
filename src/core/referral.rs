//! Partner-school referral context
//!
//! When a student follows a partner-school invitation link, the web app
//! persists a referral record before handing off to the signup flow. The
//! wizard reads it once at startup, treats it as read-only, and clears it
//! after a successful partner registration. Field names stay camelCase so
//! the JSON matches what the web app writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The partner school behind a referral
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A pre-authorized signup originating from a partner-school invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolReferral {
    /// Whether this signup really came through a school link; a referral
    /// with this unset behaves like a direct signup
    pub is_from_school: bool,

    /// Registration token issued by the school, consumed by the partner
    /// endpoint
    pub token: String,

    pub school: SchoolInfo,

    /// When the referral was stored locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SchoolReferral {
    pub fn new(token: impl Into<String>, school: SchoolInfo) -> Self {
        Self {
            is_from_school: true,
            token: token.into(),
            school,
            saved_at: Some(Utc::now()),
        }
    }
}
