//! Schema validation for the coerced form fields.
//!
//! Runs in two passes over the same input and never stops at the first
//! problem: a structural pass (presence and JSON types of the untyped
//! `stylePreset` value) and a rule pass (`validator` derive for string rules,
//! explicit bounds for `styleInfluence`). All issues end up in one
//! `ValidationError::Schema`, sorted by path.

use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::models::{fields, StylePreset};

use super::error::{SchemaIssue, ValidationError};

pub const STYLE_INFLUENCE_MIN: f64 = 0.0;
/// Inclusive upper bound; the influence thresholds are percentages of a 0-100 slider.
pub const STYLE_INFLUENCE_MAX: f64 = 100.0;

/// Field set after string coercion, before any rule has been checked
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedFields {
    pub room_type: Option<String>,
    pub text_prompt: Option<String>,
    pub style_influence: f64,
    pub is_refinement: Option<bool>,
    pub style_preset: Value,
}

/// Field set that passed the schema, with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFields {
    pub room_type: String,
    pub text_prompt: String,
    pub style_influence: f64,
    pub is_refinement: bool,
    pub style_preset: StylePreset,
}

#[derive(Debug, Validate)]
struct StylePresetRules {
    #[validate(length(min = 1, message = "Preset name is required"))]
    name: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    image_url: Option<String>,
}

#[derive(Debug, Validate)]
struct SubmissionRules {
    #[validate(length(min = 1, message = "Room type is required"))]
    room_type: Option<String>,
    #[validate(nested)]
    style_preset: StylePresetRules,
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string_member(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
    issues: &mut Vec<SchemaIssue>,
) -> Option<String> {
    match object.get(key) {
        None | Some(Value::Null) => {
            issues.push(SchemaIssue::new(path, "Required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(SchemaIssue::new(
                path,
                format!("Expected string, received {}", json_type_name(other)),
            ));
            None
        }
    }
}

fn preset_shape(value: &Value, issues: &mut Vec<SchemaIssue>) -> StylePresetRules {
    let Some(object) = value.as_object() else {
        issues.push(SchemaIssue::new(
            fields::STYLE_PRESET,
            format!("Expected object, received {}", json_type_name(value)),
        ));
        return StylePresetRules {
            name: None,
            image_url: None,
        };
    };

    StylePresetRules {
        name: string_member(object, "name", "stylePreset.name", issues),
        image_url: string_member(object, "imageUrl", "stylePreset.imageUrl", issues),
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Flatten nested `ValidationErrors` into dotted camelCase paths
fn collect_rule_issues(prefix: &str, errors: &ValidationErrors, issues: &mut Vec<SchemaIssue>) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &to_camel_case(field));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Failed rule '{}'", err.code));
                    issues.push(SchemaIssue::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_rule_issues(&path, inner, issues),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_rule_issues(&format!("{}.{}", path, index), inner, issues);
                }
            }
        }
    }
}

fn check_style_influence(value: f64, issues: &mut Vec<SchemaIssue>) {
    if value < STYLE_INFLUENCE_MIN {
        issues.push(SchemaIssue::new(
            fields::STYLE_INFLUENCE,
            format!("Style influence must be at least {}", STYLE_INFLUENCE_MIN),
        ));
    } else if value > STYLE_INFLUENCE_MAX {
        issues.push(SchemaIssue::new(
            fields::STYLE_INFLUENCE,
            format!("Style influence must be at most {}", STYLE_INFLUENCE_MAX),
        ));
    }
}

/// Validate the coerced field set, reporting every violated rule at once
pub fn validate_schema(input: CoercedFields) -> Result<SchemaFields, ValidationError> {
    let mut issues = Vec::new();

    if input.room_type.is_none() {
        issues.push(SchemaIssue::new(fields::ROOM_TYPE, "Required"));
    }
    let preset = preset_shape(&input.style_preset, &mut issues);
    check_style_influence(input.style_influence, &mut issues);

    let rules = SubmissionRules {
        room_type: input.room_type,
        style_preset: preset,
    };
    if let Err(errors) = rules.validate() {
        collect_rule_issues("", &errors, &mut issues);
    }

    if !issues.is_empty() {
        issues.sort_by(|a, b| a.path.cmp(&b.path));
        return Err(ValidationError::Schema(issues));
    }

    match (rules.room_type, rules.style_preset.name, rules.style_preset.image_url) {
        (Some(room_type), Some(name), Some(image_url)) => Ok(apply_defaults(
            room_type,
            input.text_prompt,
            input.style_influence,
            input.is_refinement,
            StylePreset { name, image_url },
        )),
        // Every None above has already produced a "Required" issue.
        _ => Err(ValidationError::Schema(vec![SchemaIssue::new(
            fields::STYLE_PRESET,
            "Required",
        )])),
    }
}

/// The single place optional fields receive their defaults
fn apply_defaults(
    room_type: String,
    text_prompt: Option<String>,
    style_influence: f64,
    is_refinement: Option<bool>,
    style_preset: StylePreset,
) -> SchemaFields {
    SchemaFields {
        room_type,
        text_prompt: text_prompt.unwrap_or_default(),
        style_influence,
        is_refinement: is_refinement.unwrap_or(false),
        style_preset,
    }
}
