use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose, Engine};
use bytes::Bytes;
use tracing::instrument;

use super::dto::{AnalyzeBase64Request, HealthResponse, ListQuery, UserAnalysesResponse};
use super::repo;
use super::services::{self, MAX_IMAGE_BYTES};
use crate::error::ApiError;
use crate::report::NutritionReport;
use crate::state::AppState;

pub fn analyze_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_multipart))
        .route("/analyze/base64", post(analyze_base64))
        // above the 10MB image limit so our own size check produces the error
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 2 * 1024 * 1024))
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the NutriScan nutrition analyzer!"
    }))
}

/// Reports whether the optional dependencies are configured. Does not probe
/// either of them.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    fn flag(configured: bool) -> &'static str {
        if configured {
            "configured"
        } else {
            "unconfigured"
        }
    }
    Json(HealthResponse {
        status: "ok",
        storage: flag(state.db.is_some()),
        vision: flag(state.vision.is_some()),
    })
}

/// POST /analyze (multipart)
/// Fields: image (required, image/*, max 10MB), user_id (required), nome.
#[instrument(skip(state, mp))]
pub async fn analyze_multipart(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<NutritionReport>, ApiError> {
    let mut image: Option<(Bytes, String)> = None;
    let mut user_id: Option<String> = None;
    let mut nome: Option<String> = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("image") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                // reject before buffering a non-image payload
                services::require_image(&content_type)?;
                let data = field.bytes().await.map_err(|e| {
                    ApiError::InvalidInput(format!("failed to read image field: {e}"))
                })?;
                image = Some((data, content_type));
            }
            Some("user_id") => {
                user_id = Some(field.text().await.map_err(|e| {
                    ApiError::InvalidInput(format!("failed to read user_id field: {e}"))
                })?);
            }
            Some("nome") => {
                nome = Some(field.text().await.map_err(|e| {
                    ApiError::InvalidInput(format!("failed to read nome field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let (body, content_type) = image
        .ok_or_else(|| ApiError::InvalidInput("multipart field `image` is required".into()))?;
    let user_id = user_id
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidInput("multipart field `user_id` is required".into()))?;

    let report =
        services::analyze_and_store(&state, &user_id, nome.as_deref(), body, &content_type).await?;
    Ok(Json(report))
}

/// POST /analyze/base64: same pipeline, image as a base64 string in JSON.
#[instrument(skip(state, body))]
pub async fn analyze_base64(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBase64Request>,
) -> Result<Json<NutritionReport>, ApiError> {
    if body.user_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("user_id must not be empty".into()));
    }

    let bytes = general_purpose::STANDARD
        .decode(body.image_base64.as_bytes())
        .map_err(|_| ApiError::InvalidInput("image_base64 is not valid base64".into()))?;

    let content_type = body.content_type.as_deref().unwrap_or("image/jpeg");
    let report = services::analyze_and_store(
        &state,
        &body.user_id,
        body.nome.as_deref(),
        Bytes::from(bytes),
        content_type,
    )
    .await?;
    Ok(Json(report))
}

#[instrument(skip(state))]
pub async fn list_user_analyses(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(q): Query<ListQuery>,
) -> Result<Json<UserAnalysesResponse>, ApiError> {
    if q.limit < 0 {
        return Err(ApiError::InvalidInput("limit must be non-negative".into()));
    }
    let db = state.db.as_ref().ok_or(ApiError::StorageUnavailable)?;
    let analyses = repo::list_by_user(db, &user_id, q.limit).await?;
    Ok(Json(UserAnalysesResponse { user_id, analyses }))
}
