//! Application state shared by the handlers.
//!
//! Built once at startup and read-only afterwards; nothing in here changes
//! between requests.

use std::sync::Arc;

use reforma_core::{Config, IngestOptions};

use crate::services::ImageGenerator;
use crate::utils::multipart::MultipartLimits;

pub struct AppState {
    pub ingest: IngestOptions,
    pub multipart_limits: MultipartLimits,
    pub generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    pub fn new(config: &Config, generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            ingest: config.ingest_options(),
            multipart_limits: MultipartLimits::from_config(config),
            generator,
        }
    }
}
