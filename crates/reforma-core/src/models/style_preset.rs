use serde::{Deserialize, Serialize};

/// A named, pre-defined style reference chosen by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    pub name: String,
    pub image_url: String,
}
