//! Remote API boundary

pub mod gateway;

pub use gateway::{SessionToken, SubmissionError, SubmissionGateway};
