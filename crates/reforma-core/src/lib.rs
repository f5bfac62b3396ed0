//! Reforma Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! submission pipeline (coercion, validation, ingestion, prompt assembly) shared
//! by the Reforma components. It has no HTTP dependency.

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod prompt;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, VisualizerConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use ingest::{ingest_submission, IngestOptions};
pub use models::{BufferedFile, RawPart, StylePreset, ValidatedSubmission};
pub use prompt::{build_furniture_clause, build_influence_clause, build_prompt, PromptParams};
pub use validation::{SchemaIssue, ValidationError};
