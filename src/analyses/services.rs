use bytes::Bytes;
use tracing::{debug, warn};

use super::repo;
use crate::error::ApiError;
use crate::report::{normalize, validate, NutritionReport};
use crate::state::AppState;
use crate::vision::ANALYSIS_INSTRUCTION;

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Rejects uploads that do not declare an image content type. Runs before
/// any bytes are handed to the vision model.
pub fn require_image(content_type: &str) -> Result<(), ApiError> {
    if !content_type.starts_with("image/") {
        return Err(ApiError::InvalidInput(format!(
            "expected an image/* upload, got `{content_type}`"
        )));
    }
    Ok(())
}

pub fn check_size(len: usize) -> Result<(), ApiError> {
    if len > MAX_IMAGE_BYTES {
        return Err(ApiError::InvalidInput(format!(
            "image is {len} bytes, the limit is {MAX_IMAGE_BYTES}"
        )));
    }
    Ok(())
}

/// Full analysis pipeline for one request: guard the upload, call the vision
/// model, normalize and validate its output, then persist best-effort. A
/// storage fault is logged and swallowed so the caller still gets the report.
pub async fn analyze_and_store(
    state: &AppState,
    user_id: &str,
    nome: Option<&str>,
    image: Bytes,
    content_type: &str,
) -> Result<NutritionReport, ApiError> {
    require_image(content_type)?;
    check_size(image.len())?;

    let vision = state.vision.as_ref().ok_or(ApiError::VisionUnavailable)?;

    let raw = vision
        .analyze(image, content_type, ANALYSIS_INSTRUCTION)
        .await
        .map_err(ApiError::UpstreamTransient)?;

    let normalized = normalize(&raw);
    let report = validate(normalized)?;

    match &state.db {
        Some(db) => {
            if let Err(err) = repo::insert_analysis(db, user_id, nome, &report).await {
                warn!(error = %err, %user_id, "failed to persist analysis, returning result anyway");
            }
        }
        None => {
            debug!(%user_id, "storage not configured, skipping persistence");
        }
    }

    Ok(report)
}
