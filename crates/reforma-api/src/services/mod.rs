//! Collaborators called by the handlers

pub mod generation;

pub use generation::{GeminiConfig, GeminiImageGenerator, ImageGenerator};
