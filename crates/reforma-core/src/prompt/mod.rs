//! Prompt assembly
//!
//! Pure rendering over the templates in [`templates`]; nothing here does I/O.

pub mod templates;

use crate::models::ValidatedSubmission;

use templates::*;

/// Below this the preset style wins
pub const PRESET_PRIORITY_THRESHOLD: f64 = 33.0;
/// Above this the mood board wins
pub const MOOD_BOARD_PRIORITY_THRESHOLD: f64 = 66.0;

/// Values substituted into the base template
#[derive(Debug, Clone, PartialEq)]
pub struct PromptParams {
    pub is_refinement: bool,
    pub room_type: String,
    pub style_preset_name: String,
    pub influence_prompt: String,
    pub text_prompt: String,
    pub furniture_prompt: String,
}

impl PromptParams {
    pub fn from_submission(submission: &ValidatedSubmission) -> Self {
        Self {
            is_refinement: submission.is_refinement,
            room_type: submission.room_type.clone(),
            style_preset_name: submission.style_preset.name.clone(),
            influence_prompt: build_influence_clause(
                submission.mood_board_images.len(),
                submission.style_influence,
                &submission.style_preset.name,
            ),
            text_prompt: submission.text_prompt.clone(),
            furniture_prompt: build_furniture_clause(
                submission.furniture_image.is_some(),
                &submission.room_type,
            ),
        }
    }
}

/// Pick the influence sentence for the slider value.
///
/// Without mood board images the slider is meaningless and the preset alone
/// guides the design. 33 and 66 both fall in the balanced band.
pub fn build_influence_clause(
    mood_board_count: usize,
    style_influence: f64,
    preset_name: &str,
) -> String {
    if mood_board_count == 0 {
        return INFLUENCE_PRESET_ONLY.to_string();
    }

    if style_influence < PRESET_PRIORITY_THRESHOLD {
        INFLUENCE_PRIORITIZE_PRESET.replace(STYLE_NAME_TOKEN, preset_name)
    } else if style_influence > MOOD_BOARD_PRIORITY_THRESHOLD {
        INFLUENCE_PRIORITIZE_MOOD_BOARD.to_string()
    } else {
        INFLUENCE_BALANCED.replace(STYLE_NAME_TOKEN, preset_name)
    }
}

pub fn build_furniture_clause(has_furniture_image: bool, room_type: &str) -> String {
    if !has_furniture_image {
        return String::new();
    }
    FURNITURE_INTEGRATION.replace(ROOM_TYPE_TOKEN, room_type)
}

/// Render the final instruction text
pub fn build_prompt(params: &PromptParams) -> String {
    let template = if params.is_refinement {
        IMAGE_REFINEMENT
    } else {
        ROOM_REDESIGN
    };

    let user_request = if params.text_prompt.is_empty() {
        DEFAULT_USER_REQUEST
    } else {
        params.text_prompt.as_str()
    };

    // Clauses go in first: the furniture clause carries its own {{ROOM_TYPE}}.
    template
        .replace(INFLUENCE_TOKEN, &params.influence_prompt)
        .replace(FURNITURE_TOKEN, &params.furniture_prompt)
        .replace(ROOM_TYPE_TOKEN, &params.room_type)
        .replace(STYLE_NAME_TOKEN, &params.style_preset_name)
        .replace(USER_REQUEST_TOKEN, user_request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BufferedFile, StylePreset};

    fn params(is_refinement: bool) -> PromptParams {
        PromptParams {
            is_refinement,
            room_type: "kitchen".to_string(),
            style_preset_name: "Industrial".to_string(),
            influence_prompt: build_influence_clause(2, 50.0, "Industrial"),
            text_prompt: String::new(),
            furniture_prompt: build_furniture_clause(true, "kitchen"),
        }
    }

    fn image(field: &str) -> BufferedFile {
        BufferedFile::new(
            field,
            Some("a.jpg".to_string()),
            Some("image/jpeg".to_string()),
            vec![1u8, 2, 3],
        )
    }

    #[test]
    fn influence_without_mood_board() {
        for influence in [0.0, 50.0, 100.0] {
            assert_eq!(
                build_influence_clause(0, influence, "Boho"),
                INFLUENCE_PRESET_ONLY
            );
        }
    }

    #[test]
    fn influence_thresholds() {
        let low = build_influence_clause(3, 10.0, "Boho");
        assert!(low.starts_with("Heavily prioritize the preset style (Boho)"));

        let high = build_influence_clause(3, 80.0, "Boho");
        assert_eq!(high, INFLUENCE_PRIORITIZE_MOOD_BOARD);

        let mid = build_influence_clause(3, 50.0, "Boho");
        assert!(mid.starts_with("Blend the preset style (Boho)"));
    }

    #[test]
    fn influence_boundaries_are_balanced() {
        for influence in [33.0, 66.0] {
            let clause = build_influence_clause(1, influence, "Boho");
            assert!(clause.starts_with("Blend"), "{} gave {}", influence, clause);
        }
        assert!(build_influence_clause(1, 32.9, "Boho").contains("over the mood board"));
        assert_eq!(
            build_influence_clause(1, 66.1, "Boho"),
            INFLUENCE_PRIORITIZE_MOOD_BOARD
        );
    }

    #[test]
    fn furniture_clause() {
        assert_eq!(build_furniture_clause(false, "bedroom"), "");

        let clause = build_furniture_clause(true, "bedroom");
        assert!(clause.contains("within the bedroom"));
        assert!(!clause.contains("{{"));
    }

    #[test]
    fn no_placeholder_survives() {
        for refinement in [false, true] {
            let prompt = build_prompt(&params(refinement));
            assert!(!prompt.contains("{{"), "{}", prompt);
            assert!(!prompt.contains("}}"), "{}", prompt);
        }
    }

    #[test]
    fn template_selected_by_mode() {
        let redesign = build_prompt(&params(false));
        assert!(redesign.contains("Redesign the provided room image."));
        assert!(redesign.contains("Generate the redesigned room image."));

        let refinement = build_prompt(&params(true));
        assert!(refinement.contains("Refine the provided image based on the user request."));
        assert!(refinement.contains("Generate the refined room image."));
    }

    #[test]
    fn empty_request_uses_default() {
        let prompt = build_prompt(&params(false));
        assert!(prompt.contains("\"No specific requests.\""));

        let mut with_request = params(false);
        with_request.text_prompt = "add a kitchen island".to_string();
        let prompt = build_prompt(&with_request);
        assert!(prompt.contains("\"add a kitchen island\""));
        assert!(!prompt.contains(DEFAULT_USER_REQUEST));
    }

    #[test]
    fn whitespace_request_is_kept() {
        let mut blank = params(false);
        blank.text_prompt = "   ".to_string();
        let prompt = build_prompt(&blank);
        assert!(prompt.contains("\"   \""), "{}", prompt);
        assert!(!prompt.contains(DEFAULT_USER_REQUEST));
    }

    #[test]
    fn from_submission_derives_clauses() {
        let submission = ValidatedSubmission {
            room_image: image("roomImage"),
            room_type: "living room".to_string(),
            style_preset: StylePreset {
                name: "Japandi".to_string(),
                image_url: "https://cdn.example.com/japandi.jpg".to_string(),
            },
            mood_board_images: vec![image("moodBoardImages"), image("moodBoardImages")],
            furniture_image: Some(image("furnitureImage")),
            previous_result_image: None,
            text_prompt: String::new(),
            style_influence: 90.0,
            is_refinement: false,
        };

        let params = PromptParams::from_submission(&submission);
        assert_eq!(params.style_preset_name, "Japandi");
        assert_eq!(params.influence_prompt, INFLUENCE_PRIORITIZE_MOOD_BOARD);
        assert!(params.furniture_prompt.contains("within the living room"));

        let prompt = build_prompt(&params);
        assert!(prompt.contains("- Room Type: living room"));
        assert!(prompt.contains("- Aesthetic Style: Japandi"));
        assert!(prompt.contains("**Furniture Integration:**"));
    }
}
