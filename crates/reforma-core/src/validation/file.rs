//! File metadata validation
//!
//! Only declared metadata is inspected (presence, MIME type, size). Pixel data
//! is never decoded.

use crate::models::BufferedFile;

use super::error::ValidationError;

/// Image content types accepted by default
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Default per-file size limit (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Per-call overrides for file checks
#[derive(Debug, Clone)]
pub struct FileValidationOptions {
    pub allowed_types: Vec<String>,
    /// The transport already enforces this while streaming; checked again here.
    pub max_size: usize,
}

impl Default for FileValidationOptions {
    fn default() -> Self {
        Self {
            allowed_types: ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
            max_size: MAX_FILE_SIZE,
        }
    }
}

/// Count bounds for a repeated file field
#[derive(Debug, Clone, Copy)]
pub struct SequenceBounds {
    pub min: usize,
    pub max: usize,
}

/// Normalize MIME type by stripping parameters (e.g. "image/png; charset=binary" -> "image/png").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate a single image file
pub fn validate_file(
    file: Option<&BufferedFile>,
    field_name: &str,
    opts: &FileValidationOptions,
) -> Result<(), ValidationError> {
    let file = file.ok_or_else(|| ValidationError::MissingField(field_name.to_string()))?;

    let mime_type = file
        .mime_type
        .as_deref()
        .map(normalize_mime_type)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ValidationError::MissingMimeType(field_name.to_string()))?;

    if !opts
        .allowed_types
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&mime_type))
    {
        return Err(ValidationError::InvalidMimeType {
            field: field_name.to_string(),
            allowed: opts.allowed_types.clone(),
        });
    }

    if file.size_bytes > opts.max_size {
        return Err(ValidationError::FileTooLarge {
            field: field_name.to_string(),
            size: file.size_bytes,
            max: opts.max_size,
        });
    }

    Ok(())
}

/// Validate a repeated file field: count bounds first, then each member as `field[index]`
pub fn validate_file_sequence(
    files: &[BufferedFile],
    field_name: &str,
    bounds: SequenceBounds,
    opts: &FileValidationOptions,
) -> Result<(), ValidationError> {
    if files.len() < bounds.min {
        return Err(ValidationError::TooFewFiles {
            field: field_name.to_string(),
            min: bounds.min,
        });
    }

    if files.len() > bounds.max {
        return Err(ValidationError::TooManyFiles {
            field: field_name.to_string(),
            max: bounds.max,
        });
    }

    files.iter().enumerate().try_for_each(|(index, file)| {
        validate_file(Some(file), &format!("{}[{}]", field_name, index), opts)
    })
}
