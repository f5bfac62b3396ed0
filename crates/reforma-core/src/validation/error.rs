use std::fmt;

/// One violated schema rule, addressed by a dotted wire path such as `stylePreset.imageUrl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub path: String,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Client-caused submission errors.
///
/// Messages are built only from field names and static rule text, so they are
/// safe to return verbatim. Consumers should match on the variant or on
/// [`ValidationError::code`], never on the message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("The field '{0}' is required")]
    MissingField(String),

    #[error("The file '{0}' does not have a valid MIME type")]
    MissingMimeType(String),

    #[error("The file '{field}' must be an image ({})", .allowed.join(", "))]
    InvalidMimeType { field: String, allowed: Vec<String> },

    #[error("The file '{field}' exceeds the maximum size of {max} bytes")]
    FileTooLarge { field: String, size: usize, max: usize },

    #[error("You must provide at least {min} file(s) in '{field}'")]
    TooFewFiles { field: String, min: usize },

    #[error("You cannot provide more than {max} file(s) in '{field}'")]
    TooManyFiles { field: String, max: usize },

    #[error("The field '{0}' must be a valid number")]
    InvalidNumber(String),

    #[error("The field '{0}' is not valid JSON")]
    InvalidJson(String),

    #[error("Validation errors: {}", join_issues(.0))]
    Schema(Vec<SchemaIssue>),
}

impl ValidationError {
    /// Machine-readable code for this failure kind
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "FIELD_REQUIRED",
            ValidationError::MissingMimeType(_) => "MISSING_MIME_TYPE",
            ValidationError::InvalidMimeType { .. } => "INVALID_MIME_TYPE",
            ValidationError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            ValidationError::TooFewFiles { .. } => "TOO_FEW_FILES",
            ValidationError::TooManyFiles { .. } => "TOO_MANY_FILES",
            ValidationError::InvalidNumber(_) => "INVALID_NUMBER",
            ValidationError::InvalidJson(_) => "INVALID_JSON",
            ValidationError::Schema(_) => "SCHEMA_VIOLATION",
        }
    }

    /// Field the error is scoped to, when it concerns a single field
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField(field)
            | ValidationError::MissingMimeType(field)
            | ValidationError::InvalidNumber(field)
            | ValidationError::InvalidJson(field) => Some(field),
            ValidationError::InvalidMimeType { field, .. }
            | ValidationError::FileTooLarge { field, .. }
            | ValidationError::TooFewFiles { field, .. }
            | ValidationError::TooManyFiles { field, .. } => Some(field),
            ValidationError::Schema(_) => None,
        }
    }
}
