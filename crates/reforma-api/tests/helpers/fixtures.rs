//! Test fixtures: image blobs and form builders.

use axum_test::multipart::{MultipartForm, Part};

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(create_minimal_png())
        .file_name(file_name.to_string())
        .mime_type("image/png")
}

pub const PRESET_JSON: &str =
    r#"{"name":"Scandinavian","imageUrl":"https://cdn.example.com/presets/scandinavian.jpg"}"#;

/// Text fields of a valid submission, without any file
pub fn base_fields() -> MultipartForm {
    MultipartForm::new()
        .add_text("roomType", "living room")
        .add_text("styleInfluence", "50")
        .add_text("stylePreset", PRESET_JSON)
}

/// Smallest submission that passes validation
pub fn valid_form() -> MultipartForm {
    base_fields().add_part("roomImage", png_part("room.png"))
}
