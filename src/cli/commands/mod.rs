//! Command implementations

pub mod completions;
pub mod referral;
pub mod signup;
