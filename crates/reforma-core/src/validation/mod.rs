//! Validation modules
//!
//! Coercion of string-typed form values, file metadata checks and the schema
//! validator for the coerced field set. Every check returns
//! `Result<_, ValidationError>` so the stages compose left to right with `?`.

pub mod coercion;
pub mod error;
pub mod file;
pub mod schema;

pub use coercion::{parse_boolean_flag, parse_number, parse_structured};
pub use error::{SchemaIssue, ValidationError};
pub use file::{
    validate_file, validate_file_sequence, FileValidationOptions, SequenceBounds,
    ALLOWED_IMAGE_TYPES, MAX_FILE_SIZE,
};
pub use schema::{validate_schema, CoercedFields, SchemaFields, STYLE_INFLUENCE_MAX};
