//! REST endpoints for uploads.

use axum::{
    extract::{Extension, Path},
    Json,
};
use uuid::Uuid;

use crate::common::EngagementError;
use crate::domains::uploads::actions as upload_actions;
use crate::domains::uploads::{Upload, UploadInput};
use crate::server::app::AppState;

/// Store an upload.
pub async fn upload_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<UploadInput>,
) -> Result<Json<Upload>, EngagementError> {
    let stored = upload_actions::upload(input, &state.deps).await?;
    Ok(Json(stored))
}

/// Fetch a stored upload by id.
pub async fn find_upload_handler(
    Extension(state): Extension<AppState>,
    Path(upload_id): Path<Uuid>,
) -> Result<Json<Upload>, EngagementError> {
    let upload = upload_actions::find_upload_by_id(upload_id, &state.deps).await?;
    Ok(Json(upload))
}
