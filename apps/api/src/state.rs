use std::sync::Arc;

use crate::config::Config;
use crate::guide::generator::GuideWriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable guide backend. Default: `LlmClient`.
    pub guide_writer: Arc<dyn GuideWriter>,
}
