//! TeamBrains signup wizard
//!
//! An interactive terminal wizard that registers student and entrepreneur
//! accounts against the TeamBrains platform API.

pub mod api;
pub mod cli;
pub mod core;
pub mod wizard;
