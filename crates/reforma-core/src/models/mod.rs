//! Data models for the application
//!
//! Every model here is created fresh for one inbound request and dropped once
//! the response is produced; nothing is shared across requests.

mod style_preset;
mod submission;

pub mod fields;

pub use style_preset::*;
pub use submission::*;
