use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use futures_util::TryStreamExt;
use tracing::instrument;

use crate::errors::AppError;
use crate::media::normalizer::{normalize_image, ImageError, MAX_UPLOAD_BYTES};

/// Accepts one uploaded image and returns the card-ready rendition. The
/// decode/resize/encode work is CPU-bound and runs on the blocking pool.
#[post("")]
#[instrument(skip(payload))]
pub async fn upload_image(mut payload: Multipart) -> Result<HttpResponse, AppError> {
    let mut bytes: Vec<u8> = Vec::new();

    // One file per request, the first field wins.
    if let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {}", e)))?
    {
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {}", e)))?
        {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(ImageError::TooLarge(MAX_UPLOAD_BYTES).into());
            }
            bytes.extend_from_slice(&chunk);
        }
    }

    let normalized = web::block(move || normalize_image(&bytes))
        .await
        .map_err(|e| AppError::InternalError(format!("Image task failed: {}", e)))??;

    tracing::debug!(
        width = normalized.width,
        height = normalized.height,
        bytes = normalized.bytes,
        "Normalized upload"
    );

    Ok(HttpResponse::Ok().json(normalized))
}
