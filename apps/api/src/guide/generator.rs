//! Guide generator — turns a topic, objectives, tone and format into a prompt and
//! asks the LLM for the recovery guide text.
//!
//! Generation failures never surface as HTTP errors: they are reported in-band
//! through `GuideResponse::error` with an empty guide.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::guide::prompts::{DEFAULT_FORMAT, DEFAULT_TONE, GUIDE_PROMPT_TEMPLATE};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Clone, Deserialize)]
pub struct GuideRequest {
    pub topic: String,
    pub objectives: Vec<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

impl GuideRequest {
    pub fn tone(&self) -> &str {
        self.tone.as_deref().unwrap_or(DEFAULT_TONE)
    }

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideResponse {
    pub guide: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Anything that can turn a prompt into guide text.
///
/// `AppState` holds an `Arc<dyn GuideWriter>`; production uses `LlmClient`.
#[async_trait]
pub trait GuideWriter: Send + Sync {
    async fn write(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl GuideWriter for LlmClient {
    async fn write(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt).await
    }
}

/// Builds the guide prompt. Each objective becomes a `- ` prefixed line.
pub fn build_prompt(request: &GuideRequest) -> String {
    let objectives = request
        .objectives
        .iter()
        .map(|o| format!("- {o}"))
        .collect::<Vec<_>>()
        .join("\n");

    fill_template(
        GUIDE_PROMPT_TEMPLATE,
        &[
            ("topic", request.topic.as_str()),
            ("objectives", objectives.as_str()),
            ("tone", request.tone()),
            ("format", request.format()),
        ],
    )
}

/// Substitutes `{key}` placeholders in a single left-to-right pass.
/// Inserted values are never scanned again, so caller text is kept verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let matched = values.iter().find_map(|(key, value)| {
            let token = format!("{{{key}}}");
            tail.starts_with(&token).then_some((token.len(), *value))
        });

        match matched {
            Some((len, value)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Runs one generation. Never fails: errors come back as `guide = ""` plus `error`.
pub async fn generate_guide(writer: &dyn GuideWriter, request: &GuideRequest) -> GuideResponse {
    let prompt = build_prompt(request);

    match writer.write(&prompt).await {
        Ok(guide) => {
            info!(topic = %request.topic, chars = guide.len(), "Guide generated");
            GuideResponse { guide, error: None }
        }
        Err(e) => {
            warn!(topic = %request.topic, "Guide generation failed: {e}");
            GuideResponse {
                guide: String::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
