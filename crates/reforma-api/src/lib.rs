//! Reforma API Library
//!
//! This crate provides the HTTP handlers, the multipart transport adapter, the
//! image generator client and application setup.

mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
mod telemetry;
pub mod utils;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::{GeminiConfig, GeminiImageGenerator, ImageGenerator};
pub use state::AppState;
