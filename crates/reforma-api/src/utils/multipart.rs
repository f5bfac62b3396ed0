//! Multipart transport adapter
//!
//! Turns an axum `Multipart` body into the `RawPart` stream consumed by
//! `reforma_core::ingest_submission`. Limits are enforced while reading, so an
//! oversized or overlong body is rejected before it is fully buffered.

use std::time::Duration;

use axum::extract::multipart::{Field, Multipart};
use bytes::{Bytes, BytesMut};
use futures::Stream;
use reforma_core::{AppError, BufferedFile, Config, RawPart};

use crate::error::multipart_error;

/// Per-request limits for the multipart reader
#[derive(Debug, Clone)]
pub struct MultipartLimits {
    pub max_parts: usize,
    pub max_files: usize,
    pub max_fields: usize,
    pub max_file_size: usize,
    pub max_field_size: usize,
    /// Applied to every single await on the body (next part header, next chunk)
    pub read_timeout: Duration,
}

impl MultipartLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_parts: config.max_parts(),
            max_files: config.max_files(),
            max_fields: config.max_fields(),
            max_file_size: config.max_file_size_bytes(),
            max_field_size: config.max_field_size_bytes(),
            read_timeout: config.part_read_timeout(),
        }
    }
}

struct PartReader {
    multipart: Multipart,
    limits: MultipartLimits,
    parts: usize,
    files: usize,
    fields: usize,
}

impl PartReader {
    async fn next_part(&mut self) -> Result<Option<RawPart>, AppError> {
        let next = tokio::time::timeout(self.limits.read_timeout, self.multipart.next_field())
            .await
            .map_err(|_| AppError::Timeout("Timed out waiting for the next form part".to_string()))?
            .map_err(multipart_error)?;

        let Some(mut field) = next else {
            return Ok(None);
        };

        self.parts += 1;
        if self.parts > self.limits.max_parts {
            return Err(AppError::PayloadTooLarge(format!(
                "Too many parts (maximum {})",
                self.limits.max_parts
            )));
        }

        let name = field.name().unwrap_or_default().to_string();

        // A part carrying a filename is a file, whatever its content type.
        if let Some(file_name) = field.file_name().map(str::to_string) {
            self.files += 1;
            if self.files > self.limits.max_files {
                return Err(AppError::PayloadTooLarge(format!(
                    "Too many files (maximum {})",
                    self.limits.max_files
                )));
            }

            let mime_type = field.content_type().map(str::to_string);
            let content = read_limited(
                &mut field,
                self.limits.max_file_size,
                self.limits.read_timeout,
            )
            .await?
            .ok_or_else(|| {
                AppError::PayloadTooLarge(format!(
                    "File '{}' exceeds the maximum size of {} MB",
                    name,
                    self.limits.max_file_size / 1024 / 1024
                ))
            })?;

            return Ok(Some(RawPart::File(BufferedFile::new(
                name,
                Some(file_name),
                mime_type,
                content,
            ))));
        }

        self.fields += 1;
        if self.fields > self.limits.max_fields {
            return Err(AppError::PayloadTooLarge(format!(
                "Too many fields (maximum {})",
                self.limits.max_fields
            )));
        }

        let content = read_limited(
            &mut field,
            self.limits.max_field_size,
            self.limits.read_timeout,
        )
        .await?
        .ok_or_else(|| {
            AppError::PayloadTooLarge(format!(
                "Field '{}' exceeds the maximum size of {} KB",
                name,
                self.limits.max_field_size / 1024
            ))
        })?;

        let value = String::from_utf8(content.to_vec())
            .map_err(|_| AppError::BadRequest(format!("Field '{}' is not valid UTF-8", name)))?;

        Ok(Some(RawPart::Field { name, value }))
    }
}

/// Read a part chunk by chunk. `Ok(None)` means the part went over `max_size`.
async fn read_limited(
    field: &mut Field<'_>,
    max_size: usize,
    read_timeout: Duration,
) -> Result<Option<Bytes>, AppError> {
    let mut buffer = BytesMut::new();

    loop {
        let chunk = tokio::time::timeout(read_timeout, field.chunk())
            .await
            .map_err(|_| AppError::Timeout("Timed out reading form part content".to_string()))?
            .map_err(multipart_error)?;

        let Some(chunk) = chunk else {
            return Ok(Some(buffer.freeze()));
        };

        if buffer.len() + chunk.len() > max_size {
            return Ok(None);
        }
        buffer.extend_from_slice(&chunk);
    }
}

/// Expose the multipart body as a stream of decoded parts.
///
/// The stream ends after the first error.
pub fn part_stream(
    multipart: Multipart,
    limits: MultipartLimits,
) -> impl Stream<Item = Result<RawPart, AppError>> {
    let reader = PartReader {
        multipart,
        limits,
        parts: 0,
        files: 0,
        fields: 0,
    };

    futures::stream::try_unfold(reader, |mut reader| async move {
        let part = reader.next_part().await?;
        Ok::<_, AppError>(part.map(|part| (part, reader)))
    })
}
