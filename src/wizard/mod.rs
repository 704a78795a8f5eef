//! The signup wizard: step sequencing and interactive rendering

pub mod controller;
pub mod steps;

pub use controller::{Progress, WizardController, WizardError, WizardStep};
