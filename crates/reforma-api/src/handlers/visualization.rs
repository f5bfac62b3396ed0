use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use reforma_core::{build_prompt, ingest_submission, AppError, PromptParams};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::multipart::part_stream;

pub const SUCCESS_MESSAGE: &str = "Visualization generated successfully";

#[derive(Debug, Serialize, ToSchema)]
pub struct VisualizationResponse {
    pub message: String,
    pub data: VisualizationData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VisualizationData {
    /// Generated image, base64 encoded
    pub image: String,
    pub metadata: VisualizationMetadata,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationMetadata {
    pub room_type: String,
    /// Name of the style preset
    pub style_preset: String,
    pub is_refinement: bool,
}

/// Generate a room visualization
///
/// Reads the multipart form, validates it, renders the design prompt and asks
/// the image generator for the result.
///
/// # Errors
/// - `AppError::BadRequest` - body is not multipart/form-data
/// - `AppError::Validation` - a form field or file failed validation
/// - `AppError::PayloadTooLarge` - too many parts or a part over its size limit
/// - `AppError::Timeout` - the client stalled while sending the body
/// - `AppError::Generation` - the image provider failed
#[utoipa::path(
    post,
    path = "/generate-visualization",
    tag = "visualization",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Visualization generated", body = VisualizationResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 408, description = "Client stalled while uploading", body = ErrorResponse),
        (status = 413, description = "Request too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(operation = "generate_visualization")
)]
pub async fn generate_visualization(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VisualizationResponse>, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection, "Request is not multipart");
        AppError::BadRequest("Content must be multipart/form-data".to_string())
    })?;

    let parts = part_stream(multipart, state.multipart_limits.clone());
    let submission = ingest_submission(parts, &state.ingest).await?;

    tracing::info!(
        room_type = %submission.room_type,
        style_preset = %submission.style_preset.name,
        mood_board_images = submission.mood_board_images.len(),
        has_furniture = submission.furniture_image.is_some(),
        is_refinement = submission.is_refinement,
        buffered_bytes = submission.buffered_bytes(),
        "Submission validated"
    );

    let prompt = build_prompt(&PromptParams::from_submission(&submission));
    let image = state.generator.generate(&submission, &prompt).await?;

    tracing::info!(
        generator = state.generator.name(),
        image_len = image.len(),
        "Visualization generated"
    );

    Ok(Json(VisualizationResponse {
        message: SUCCESS_MESSAGE.to_string(),
        data: VisualizationData {
            image,
            metadata: VisualizationMetadata {
                room_type: submission.room_type,
                style_preset: submission.style_preset.name,
                is_refinement: submission.is_refinement,
            },
        },
    }))
}
