//! Axum route handler for the Guide API.

use axum::{extract::State, Json};

use crate::guide::generator::{generate_guide, GuideRequest, GuideResponse};
use crate::state::AppState;

/// POST /generate-guide
///
/// Always answers 200; a failed generation carries `error` and an empty `guide`.
pub async fn handle_generate_guide(
    State(state): State<AppState>,
    Json(request): Json<GuideRequest>,
) -> Json<GuideResponse> {
    Json(generate_guide(state.guide_writer.as_ref(), &request).await)
}
