pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::document::handlers::handle_generate_docx;
use crate::guide::handlers::handle_generate_guide;
use crate::state::AppState;
use crate::uploads::handlers::handle_upload_doc;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-guide", post(handle_generate_guide))
        // Uploads are unbounded; the default 2MB body cap does not apply here.
        .route(
            "/upload-doc",
            post(handle_upload_doc).layer(DefaultBodyLimit::disable()),
        )
        .route("/generate-docx", post(handle_generate_docx))
        .with_state(state)
}
