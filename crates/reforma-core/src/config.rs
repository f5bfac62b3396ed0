//! Configuration module
//!
//! Everything is read from the environment (and `.env` via dotenvy) once at
//! startup. Unset or unparsable optional values fall back to their defaults.

use std::env;
use std::time::Duration;

use crate::ingest::IngestOptions;
use crate::validation::{FileValidationOptions, ALLOWED_IMAGE_TYPES};

const SERVER_PORT: u16 = 8080;
const MAX_FILE_SIZE_MB: usize = 10;
const MAX_FIELD_SIZE_KB: usize = 1024;
const MAX_PARTS: usize = 30;
const MAX_FILES: usize = 15;
const MAX_FIELDS: usize = 20;
const PART_READ_TIMEOUT_SECS: u64 = 30;
const GEMINI_MODEL: &str = "gemini-2.5-flash-image";
const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GENERATION_TIMEOUT_SECS: u64 = 120;

/// Server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Limits applied while reading a multipart submission
#[derive(Clone, Debug)]
pub struct UploadLimits {
    pub max_file_size_bytes: usize,
    pub max_field_size_bytes: usize,
    pub max_parts: usize,
    pub max_files: usize,
    pub max_fields: usize,
    pub allowed_content_types: Vec<String>,
    pub part_read_timeout_secs: u64,
}

/// Image generation provider settings
#[derive(Clone, Debug)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct VisualizerConfig {
    pub base: BaseConfig,
    pub uploads: UploadLimits,
    pub gemini: GeminiSettings,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config(pub Box<VisualizerConfig>);

impl Config {
    fn inner(&self) -> &VisualizerConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = VisualizerConfig::from_lookup(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.inner().uploads.max_file_size_bytes
    }

    pub fn max_field_size_bytes(&self) -> usize {
        self.inner().uploads.max_field_size_bytes
    }

    pub fn max_parts(&self) -> usize {
        self.inner().uploads.max_parts
    }

    pub fn max_files(&self) -> usize {
        self.inner().uploads.max_files
    }

    pub fn max_fields(&self) -> usize {
        self.inner().uploads.max_fields
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.inner().uploads.allowed_content_types
    }

    pub fn part_read_timeout(&self) -> Duration {
        Duration::from_secs(self.inner().uploads.part_read_timeout_secs)
    }

    /// Upper bound for a whole request body: every file at its maximum plus
    /// every text field at its maximum.
    pub fn max_request_bytes(&self) -> usize {
        let uploads = &self.inner().uploads;
        uploads
            .max_file_size_bytes
            .saturating_mul(uploads.max_files)
            .saturating_add(uploads.max_field_size_bytes.saturating_mul(uploads.max_fields))
    }

    pub fn gemini_api_key(&self) -> &str {
        &self.inner().gemini.api_key
    }

    pub fn gemini_model(&self) -> &str {
        &self.inner().gemini.model
    }

    pub fn gemini_api_base_url(&self) -> &str {
        &self.inner().gemini.api_base_url
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.inner().gemini.timeout_secs)
    }

    /// Options handed to the ingestion pipeline
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            file: FileValidationOptions {
                allowed_types: self.allowed_content_types().to_vec(),
                max_size: self.max_file_size_bytes(),
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl VisualizerConfig {
    /// Build the configuration from any key lookup. `Config::from_env` passes
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let allowed_content_types = lookup("ALLOWED_IMAGE_CONTENT_TYPES")
            .map(|s| split_list(&s))
            .filter(|types| !types.is_empty())
            .unwrap_or_else(|| ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect());

        let base = BaseConfig {
            server_port,
            cors_origins,
            environment,
        };

        let uploads = UploadLimits {
            max_file_size_bytes: parse_or(lookup("MAX_FILE_SIZE_MB"), MAX_FILE_SIZE_MB)
                .saturating_mul(1024 * 1024),
            max_field_size_bytes: parse_or(lookup("MAX_FIELD_SIZE_KB"), MAX_FIELD_SIZE_KB)
                .saturating_mul(1024),
            max_parts: parse_or(lookup("MAX_PARTS"), MAX_PARTS),
            max_files: parse_or(lookup("MAX_FILES"), MAX_FILES),
            max_fields: parse_or(lookup("MAX_FIELDS"), MAX_FIELDS),
            allowed_content_types,
            part_read_timeout_secs: parse_or(
                lookup("PART_READ_TIMEOUT_SECS"),
                PART_READ_TIMEOUT_SECS,
            ),
        };

        let gemini = GeminiSettings {
            api_key: lookup("GEMINI_API_KEY")
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    anyhow::anyhow!("GEMINI_API_KEY must be set for image generation")
                })?,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string()),
            api_base_url: lookup("GEMINI_API_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| GEMINI_API_BASE_URL.to_string()),
            timeout_secs: parse_or(lookup("GENERATION_TIMEOUT_SECS"), GENERATION_TIMEOUT_SECS),
        };

        Ok(VisualizerConfig {
            base,
            uploads,
            gemini,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let is_production = matches!(
            self.base.environment.to_lowercase().as_str(),
            "production" | "prod"
        );
        if is_production && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.uploads.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.uploads.max_files == 0 || self.uploads.max_parts == 0 {
            return Err(anyhow::anyhow!(
                "MAX_FILES and MAX_PARTS must be greater than 0"
            ));
        }

        if self.uploads.part_read_timeout_secs == 0 || self.gemini.timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "PART_READ_TIMEOUT_SECS and GENERATION_TIMEOUT_SECS must be greater than 0"
            ));
        }

        if !self.gemini.api_base_url.starts_with("http://")
            && !self.gemini.api_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "GEMINI_API_BASE_URL must be an http(s) URL"
            ));
        }

        Ok(())
    }
}
