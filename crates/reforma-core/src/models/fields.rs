//! Multipart field names recognized by the visualization form.

pub const ROOM_IMAGE: &str = "roomImage";
pub const MOOD_BOARD_IMAGES: &str = "moodBoardImages";
pub const FURNITURE_IMAGE: &str = "furnitureImage";
pub const PREVIOUS_RESULT_IMAGE: &str = "previousResultImage";

pub const ROOM_TYPE: &str = "roomType";
pub const TEXT_PROMPT: &str = "textPrompt";
pub const STYLE_INFLUENCE: &str = "styleInfluence";
pub const IS_REFINEMENT: &str = "isRefinement";
pub const STYLE_PRESET: &str = "stylePreset";

/// The only file field that collects several files instead of keeping the last one.
pub fn is_multi_file(field_name: &str) -> bool {
    field_name == MOOD_BOARD_IMAGES
}
