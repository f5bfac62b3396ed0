use bytes::Bytes;

use super::StylePreset;

/// A file part whose content has been fully received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedFile {
    pub field_name: String,
    pub file_name: Option<String>,
    /// Content type declared by the client, if any. Never sniffed from the bytes.
    pub mime_type: Option<String>,
    pub size_bytes: usize,
    pub content: Bytes,
}

impl BufferedFile {
    pub fn new(
        field_name: impl Into<String>,
        file_name: Option<String>,
        mime_type: Option<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let content = content.into();
        Self {
            field_name: field_name.into(),
            file_name,
            mime_type,
            size_bytes: content.len(),
            content,
        }
    }
}

/// One decoded unit of a multipart submission
#[derive(Debug, Clone, PartialEq)]
pub enum RawPart {
    /// A text part; the value is always a string on the wire
    Field { name: String, value: String },
    /// A file part, already buffered by the transport adapter
    File(BufferedFile),
}

/// Fully validated, typed visualization request
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub room_image: BufferedFile,
    pub room_type: String,
    pub style_preset: StylePreset,
    /// Arrival order is preserved; 0 to 10 entries
    pub mood_board_images: Vec<BufferedFile>,
    pub furniture_image: Option<BufferedFile>,
    /// Previously generated result, sent back as context when refining
    pub previous_result_image: Option<BufferedFile>,
    /// Empty when the caller wrote no request
    pub text_prompt: String,
    pub style_influence: f64,
    pub is_refinement: bool,
}

impl ValidatedSubmission {
    /// Image the transformation is applied to: the previous result when
    /// refining with one attached, the original room photo otherwise.
    pub fn base_image(&self) -> &BufferedFile {
        match (&self.previous_result_image, self.is_refinement) {
            (Some(previous), true) => previous,
            _ => &self.room_image,
        }
    }

    /// Total bytes held in memory for this submission
    pub fn buffered_bytes(&self) -> usize {
        self.room_image.size_bytes
            + self
                .mood_board_images
                .iter()
                .map(|f| f.size_bytes)
                .sum::<usize>()
            + self.furniture_image.as_ref().map_or(0, |f| f.size_bytes)
            + self
                .previous_result_image
                .as_ref()
                .map_or(0, |f| f.size_bytes)
    }
}
