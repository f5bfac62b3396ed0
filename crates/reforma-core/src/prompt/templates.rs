//! Prompt templates for interior design visualizations.
//!
//! `{{TOKEN}}` markers are substituted by [`super::build_prompt`]. The text
//! around them can be edited freely; the markers themselves must stay.

pub const ROOM_TYPE_TOKEN: &str = "{{ROOM_TYPE}}";
pub const STYLE_NAME_TOKEN: &str = "{{STYLE_NAME}}";
pub const INFLUENCE_TOKEN: &str = "{{INFLUENCE_INSTRUCTION}}";
pub const USER_REQUEST_TOKEN: &str = "{{USER_REQUEST}}";
pub const FURNITURE_TOKEN: &str = "{{FURNITURE_INSTRUCTION}}";

/// Redesign a room from the original photo
pub const ROOM_REDESIGN: &str = r#"
Act as an expert interior designer. Redesign the provided room image.

**Primary Instructions:**
- Room Type: {{ROOM_TYPE}}
- Aesthetic Style: {{STYLE_NAME}}
- Style Influence: {{INFLUENCE_INSTRUCTION}}
- User's specific requests: "{{USER_REQUEST}}"
{{FURNITURE_INSTRUCTION}}

**Design Constraints:**
1.  The final image MUST be a photorealistic rendering.
2.  Do NOT change the room's core structure, such as walls, windows, or doors position.
3.  Maintain the amount of windows.
4.  Focus on changing materials (flooring, walls), furniture, lighting, and decor to match the requested style.
5.  Maintain the original room's geometry and proportions.
6.  Maintain the picture perspective.

Generate the redesigned room image.
"#;

/// Adjust an image that was already generated
pub const IMAGE_REFINEMENT: &str = r#"
Act as an expert interior designer. Refine the provided image based on the user request.

**Primary Instructions:**
- Room Type: {{ROOM_TYPE}}
- Aesthetic Style: {{STYLE_NAME}}
- Style Influence: {{INFLUENCE_INSTRUCTION}}
- User's specific requests: "{{USER_REQUEST}}"
{{FURNITURE_INSTRUCTION}}

**Design Constraints:**
1.  The final image MUST be a photorealistic rendering.
2.  Do NOT change the room's core structure, such as walls, windows, or doors position.
3.  Maintain the amount of windows.
4.  Apply the requested changes to the image.
5.  Maintain the original room's geometry and proportions.
6.  Maintain the picture perspective.

Generate the refined room image.
"#;

// Style influence: how much weight the mood board gets against the preset.

/// Slider below 33
pub const INFLUENCE_PRIORITIZE_PRESET: &str =
    "Heavily prioritize the preset style ({{STYLE_NAME}}) over the mood board images.";

/// Slider above 66
pub const INFLUENCE_PRIORITIZE_MOOD_BOARD: &str =
    "Heavily prioritize the provided mood board images for style inspiration over the preset style.";

/// Slider between 33 and 66, both included
pub const INFLUENCE_BALANCED: &str =
    "Blend the preset style ({{STYLE_NAME}}) and the mood board images evenly.";

/// No mood board sent
pub const INFLUENCE_PRESET_ONLY: &str = "Use the preset style as the primary design guide.";

/// Appended when a furniture photo is attached
pub const FURNITURE_INTEGRATION: &str = r#"
**Furniture Integration:**
- An image of a specific piece of furniture has been provided. You MUST incorporate this exact piece of furniture into the final design.
- **Crucial Placement Instructions:**
    1.  **Analyze Layout:** First, analyze the original room's layout, perspective, and existing furniture arrangement.
    2.  **Natural Placement:** Place the new furniture in a functionally appropriate and aesthetically pleasing position within the {{ROOM_TYPE}}. For example, a sofa should be against a wall or defining a seating area, not floating awkwardly in a corner.
    3.  **Correct Scale & Perspective:** The furniture MUST be scaled to realistic proportions relative to the room and other objects. Its perspective must perfectly align with the room's vanishing points.
    4.  **Seamless Integration:** The final result should be photorealistic and look like a single, cohesive photograph. The furniture should not look like it was digitally added.
    5.  **Lighting and Shadows:** Meticulously match the lighting on the new furniture to the room's existing light sources. It must cast accurate and soft shadows on the floor and surrounding objects to ground it in the scene.
"#;

/// Used when the user wrote no request
pub const DEFAULT_USER_REQUEST: &str = "No specific requests.";
