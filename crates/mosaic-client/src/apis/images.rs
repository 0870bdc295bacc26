use std::path::Path;

use mosaic_core::entities::{Ack, ImageRecord};
use mosaic_core::envelope::unwrap_envelope;
use mosaic_core::{validate, ApiError};

use crate::endpoints;
use crate::http::{ApiClient, FilePart, RequestSpec};

/// Form field name the upload endpoint expects.
const UPLOAD_FIELD: &str = "file";

/// Client for the `/images/*` endpoints.
#[derive(Clone)]
pub struct ImagesApi {
    client: ApiClient,
}

impl ImagesApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /images/upload` (multipart).
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` — before any network call — for an unsupported
    /// content type or a file over the 5MB limit; otherwise any
    /// transport/application error.
    pub async fn upload(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<ImageRecord, ApiError> {
        validate::image_upload(mime_type, bytes.len() as u64)?;
        let part = FilePart {
            field: UPLOAD_FIELD.to_string(),
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        };
        let value = self
            .client
            .send(RequestSpec::post_multipart(
                endpoints::IMAGES_UPLOAD,
                vec![part],
            ))
            .await?;
        unwrap_envelope(value)
    }

    /// Read a file from disk and upload it, inferring the content type from
    /// the extension.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` when the extension is not a supported image
    /// format or the file cannot be read; otherwise as [`Self::upload`].
    pub async fn upload_path(&self, path: &Path) -> Result<ImageRecord, ApiError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Validation("invalid file name".into()))?
            .to_string();
        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(validate::mime_for_extension)
            .ok_or_else(|| {
                ApiError::Validation(
                    "unsupported image format (JPEG, PNG, GIF, or WebP only)".into(),
                )
            })?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ApiError::Validation(format!("cannot read {}: {e}", path.display())))?;
        // Size check before pulling the bytes into memory.
        validate::image_upload(mime_type, metadata.len())?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Validation(format!("cannot read {}: {e}", path.display())))?;
        self.upload(&file_name, mime_type, bytes).await
    }

    /// `GET /images/my` — images owned by the authenticated user.
    ///
    /// # Errors
    ///
    /// Any transport/application error.
    pub async fn my_images(&self) -> Result<Vec<ImageRecord>, ApiError> {
        let value = self
            .client
            .send(RequestSpec::get(endpoints::IMAGES_MY))
            .await?;
        unwrap_envelope(value)
    }

    /// `DELETE /images/:id`.
    ///
    /// # Errors
    ///
    /// Any transport/application error.
    pub async fn delete(&self, id: u64) -> Result<Ack, ApiError> {
        let value = self
            .client
            .send(RequestSpec::delete(endpoints::image_by_id(id)))
            .await?;
        super::ack_from(value)
    }
}
