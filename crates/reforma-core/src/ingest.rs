//! Multipart ingestion pipeline
//!
//! Drains a stream of already-decoded parts exactly once, sorts them into a
//! field bag and a file bag, and turns the bags into a [`ValidatedSubmission`]:
//!
//! 1. collect parts in stream order (the only early exit is a transport error)
//! 2. require the room image
//! 3. validate files, short-circuiting on the first failure
//! 4. coerce scalar fields
//! 5. run the schema validator and merge with the buffered files

use std::collections::HashMap;

use futures::{Stream, StreamExt};

use crate::error::AppError;
use crate::models::{fields, BufferedFile, RawPart, ValidatedSubmission};
use crate::validation::{
    parse_boolean_flag, parse_number, parse_structured, validate_file, validate_file_sequence,
    validate_schema, CoercedFields, FileValidationOptions, SequenceBounds, ValidationError,
};

/// Mood board size limits once at least one mood board image is sent
pub const MOOD_BOARD_BOUNDS: SequenceBounds = SequenceBounds { min: 1, max: 10 };

/// Options for one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub file: FileValidationOptions,
}

/// A file field holds either one file or, for the mood board, an ordered list
#[derive(Debug)]
enum FileSlot {
    Single(BufferedFile),
    Many(Vec<BufferedFile>),
}

#[derive(Debug, Default)]
struct RawFieldBag(HashMap<String, String>);

impl RawFieldBag {
    fn insert(&mut self, name: String, value: String) {
        self.0.insert(name, value);
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn take(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }
}

#[derive(Debug, Default)]
struct RawFileBag(HashMap<String, FileSlot>);

impl RawFileBag {
    fn insert(&mut self, file: BufferedFile) {
        if fields::is_multi_file(&file.field_name) {
            // Multi-file names only ever hold `Many`.
            if let FileSlot::Many(files) = self
                .0
                .entry(file.field_name.clone())
                .or_insert_with(|| FileSlot::Many(Vec::new()))
            {
                files.push(file);
            }
        } else {
            self.0
                .insert(file.field_name.clone(), FileSlot::Single(file));
        }
    }

    fn take_single(&mut self, name: &str) -> Option<BufferedFile> {
        match self.0.remove(name)? {
            FileSlot::Single(file) => Some(file),
            FileSlot::Many(mut files) => files.pop(),
        }
    }

    fn take_many(&mut self, name: &str) -> Vec<BufferedFile> {
        match self.0.remove(name) {
            Some(FileSlot::Many(files)) => files,
            Some(FileSlot::Single(file)) => vec![file],
            None => Vec::new(),
        }
    }
}

/// Drain the part stream and produce a validated submission.
///
/// The stream is consumed to the end before any validation happens; an `Err`
/// item from the stream is a fatal transport error and is returned as is.
pub async fn ingest_submission<S>(
    parts: S,
    options: &IngestOptions,
) -> Result<ValidatedSubmission, AppError>
where
    S: Stream<Item = Result<RawPart, AppError>>,
{
    let mut parts = std::pin::pin!(parts);
    let mut field_bag = RawFieldBag::default();
    let mut file_bag = RawFileBag::default();

    while let Some(part) = parts.next().await {
        match part? {
            RawPart::File(file) => {
                tracing::debug!(
                    field = %file.field_name,
                    size_bytes = file.size_bytes,
                    mime_type = ?file.mime_type,
                    "Buffered file part"
                );
                file_bag.insert(file);
            }
            RawPart::Field { name, value } => {
                tracing::debug!(field = %name, value_len = value.len(), "Received text field");
                field_bag.insert(name, value);
            }
        }
    }

    finalize(field_bag, file_bag, options).map_err(AppError::from)
}

fn finalize(
    mut field_bag: RawFieldBag,
    mut file_bag: RawFileBag,
    options: &IngestOptions,
) -> Result<ValidatedSubmission, ValidationError> {
    let room_image = file_bag
        .take_single(fields::ROOM_IMAGE)
        .ok_or_else(|| ValidationError::MissingField(fields::ROOM_IMAGE.to_string()))?;
    let mood_board_images = file_bag.take_many(fields::MOOD_BOARD_IMAGES);
    let furniture_image = file_bag.take_single(fields::FURNITURE_IMAGE);
    let previous_result_image = file_bag.take_single(fields::PREVIOUS_RESULT_IMAGE);

    let opts = &options.file;
    validate_file(Some(&room_image), fields::ROOM_IMAGE, opts)?;
    if !mood_board_images.is_empty() {
        validate_file_sequence(
            &mood_board_images,
            fields::MOOD_BOARD_IMAGES,
            MOOD_BOARD_BOUNDS,
            opts,
        )?;
    }
    if let Some(ref file) = furniture_image {
        validate_file(Some(file), fields::FURNITURE_IMAGE, opts)?;
    }
    if let Some(ref file) = previous_result_image {
        validate_file(Some(file), fields::PREVIOUS_RESULT_IMAGE, opts)?;
    }

    let style_influence = parse_number(
        field_bag.get(fields::STYLE_INFLUENCE),
        fields::STYLE_INFLUENCE,
    )?;
    let is_refinement = parse_boolean_flag(field_bag.get(fields::IS_REFINEMENT));
    let style_preset = parse_structured(field_bag.get(fields::STYLE_PRESET), fields::STYLE_PRESET)?;

    let validated = validate_schema(CoercedFields {
        room_type: field_bag.take(fields::ROOM_TYPE),
        text_prompt: field_bag.take(fields::TEXT_PROMPT),
        style_influence,
        is_refinement: Some(is_refinement),
        style_preset,
    })?;

    Ok(ValidatedSubmission {
        room_image,
        room_type: validated.room_type,
        style_preset: validated.style_preset,
        mood_board_images,
        furniture_image,
        previous_result_image,
        text_prompt: validated.text_prompt,
        style_influence: validated.style_influence,
        is_refinement: validated.is_refinement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    const PRESET: &str =
        r#"{"name":"Japandi","imageUrl":"https://cdn.example.com/presets/japandi.jpg"}"#;

    fn text(name: &str, value: &str) -> RawPart {
        RawPart::Field {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn image(name: &str, file_name: &str, mime: &str) -> RawPart {
        RawPart::File(BufferedFile::new(
            name,
            Some(file_name.to_string()),
            Some(mime.to_string()),
            vec![0x89u8, 0x50, 0x4e, 0x47],
        ))
    }

    fn valid_parts() -> Vec<RawPart> {
        vec![
            image("roomImage", "room.png", "image/png"),
            text("roomType", "living room"),
            text("styleInfluence", "50"),
            text("stylePreset", PRESET),
        ]
    }

    async fn ingest(parts: Vec<RawPart>) -> Result<ValidatedSubmission, AppError> {
        let items: Vec<Result<RawPart, AppError>> = parts.into_iter().map(Ok).collect();
        ingest_submission(stream::iter(items), &IngestOptions::default()).await
    }

    fn validation_error(result: Result<ValidatedSubmission, AppError>) -> ValidationError {
        match result {
            Err(AppError::Validation(err)) => err,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn minimal_submission_gets_defaults() {
        let submission = ingest(valid_parts()).await.unwrap();
        assert_eq!(submission.room_type, "living room");
        assert_eq!(submission.style_preset.name, "Japandi");
        assert!(submission.mood_board_images.is_empty());
        assert_eq!(submission.text_prompt, "");
        assert!(!submission.is_refinement);
        assert!(submission.furniture_image.is_none());
        assert!(submission.previous_result_image.is_none());
        assert_eq!(submission.style_influence, 50.0);
    }

    #[tokio::test]
    async fn missing_room_image_is_reported_before_anything_else() {
        let parts = vec![
            text("roomType", ""),
            text("styleInfluence", "not a number"),
            text("stylePreset", "{not json"),
        ];
        let err = validation_error(ingest(parts).await);
        assert_eq!(err, ValidationError::MissingField("roomImage".to_string()));
        assert!(err.to_string().contains("roomImage"));
    }

    #[tokio::test]
    async fn mood_board_keeps_arrival_order() {
        let mut parts = valid_parts();
        parts.push(image("moodBoardImages", "a.jpg", "image/jpeg"));
        parts.push(text("textPrompt", "warm lighting"));
        parts.push(image("moodBoardImages", "b.webp", "image/webp"));
        parts.push(image("moodBoardImages", "c.png", "image/png"));

        let submission = ingest(parts).await.unwrap();
        let names: Vec<_> = submission
            .mood_board_images
            .iter()
            .filter_map(|f| f.file_name.as_deref())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.webp", "c.png"]);
        assert_eq!(submission.text_prompt, "warm lighting");
    }

    #[tokio::test]
    async fn eleven_mood_board_images_exceed_the_maximum() {
        let mut parts = valid_parts();
        for i in 0..11 {
            parts.push(image("moodBoardImages", &format!("{}.jpg", i), "image/jpeg"));
        }
        let err = validation_error(ingest(parts).await);
        assert_eq!(
            err,
            ValidationError::TooManyFiles {
                field: "moodBoardImages".to_string(),
                max: 10
            }
        );
    }

    #[tokio::test]
    async fn single_file_fields_keep_the_last_occurrence() {
        let mut parts = valid_parts();
        parts.push(image("furnitureImage", "old-sofa.png", "image/png"));
        parts.push(image("furnitureImage", "new-sofa.png", "image/png"));
        parts.push(image("roomImage", "room-2.jpg", "image/jpeg"));

        let submission = ingest(parts).await.unwrap();
        assert_eq!(
            submission.furniture_image.unwrap().file_name.as_deref(),
            Some("new-sofa.png")
        );
        assert_eq!(submission.room_image.file_name.as_deref(), Some("room-2.jpg"));
    }

    #[tokio::test]
    async fn text_fields_are_last_write_wins() {
        let mut parts = valid_parts();
        parts.push(text("roomType", "kitchen"));
        let submission = ingest(parts).await.unwrap();
        assert_eq!(submission.room_type, "kitchen");
    }

    #[tokio::test]
    async fn negative_influence_is_a_schema_error() {
        let mut parts = valid_parts();
        parts.push(text("styleInfluence", "-1"));
        match validation_error(ingest(parts).await) {
            ValidationError::Schema(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].path, "styleInfluence");
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_preset_json_is_not_a_schema_error() {
        let mut parts = valid_parts();
        parts.push(text("stylePreset", "{not json"));
        let err = validation_error(ingest(parts).await);
        assert_eq!(err, ValidationError::InvalidJson("stylePreset".to_string()));
        assert_eq!(err.code(), "INVALID_JSON");
    }

    #[tokio::test]
    async fn refinement_flag_and_previous_result() {
        let mut parts = valid_parts();
        parts.push(text("isRefinement", "1"));
        parts.push(image("previousResultImage", "result.png", "image/png"));
        let submission = ingest(parts).await.unwrap();
        assert!(submission.is_refinement);
        assert_eq!(
            submission.base_image().file_name.as_deref(),
            Some("result.png")
        );
    }

    #[tokio::test]
    async fn boolean_literals_in_other_fields_stay_strings() {
        let mut parts = valid_parts();
        parts.push(text("roomType", "true"));
        parts.push(text("textPrompt", "false"));
        let submission = ingest(parts).await.unwrap();
        assert_eq!(submission.room_type, "true");
        assert_eq!(submission.text_prompt, "false");
    }

    #[tokio::test]
    async fn disallowed_furniture_type_is_rejected() {
        let mut parts = valid_parts();
        parts.push(image("furnitureImage", "sofa.gif", "image/gif"));
        let err = validation_error(ingest(parts).await);
        assert_eq!(err.field(), Some("furnitureImage"));
    }

    #[tokio::test]
    async fn transport_errors_abort_ingestion() {
        let items: Vec<Result<RawPart, AppError>> = vec![
            Ok(image("roomImage", "room.png", "image/png")),
            Err(AppError::PayloadTooLarge("file exceeds limit".to_string())),
            Ok(text("roomType", "bedroom")),
        ];
        let result = ingest_submission(stream::iter(items), &IngestOptions::default()).await;
        assert!(matches!(result, Err(AppError::PayloadTooLarge(_))));
    }
}
