//! Axum route handler for .docx generation.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::info;

use crate::document::{
    attachment_filename, layout_guide, load_logo, render_docx, DocxRequest, GuideBlock,
    DOCX_MEDIA_TYPE,
};
use crate::errors::AppError;
use crate::state::AppState;

/// RFC 5987 `attr-char` minus alphanumerics; everything else is percent-encoded.
const ATTR_CHAR_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// POST /generate-docx
///
/// Returns the assembled guide as a .docx attachment named after the topic.
pub async fn handle_generate_docx(
    State(state): State<AppState>,
    Json(request): Json<DocxRequest>,
) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&content_disposition(&attachment_filename(
        &request.topic,
    )))
    .map_err(|_| {
        AppError::Validation(format!("topic '{}' cannot be used as a file name", request.topic))
    })?;

    let logo = load_logo(&state.config.logo_path()).await?;
    let has_logo = logo.is_some();

    let blocks = layout_guide(&request, logo);
    let block_count = blocks.len();
    let bytes = render_blocks(blocks).await?;

    info!(
        topic = %request.topic,
        blocks = block_count,
        bytes = bytes.len(),
        has_logo,
        "Guide document generated"
    );

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_MEDIA_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// RFC 6266 attachment header: an ASCII `filename` fallback plus the exact
/// name as UTF-8 in `filename*`.
///
/// In the fallback, non-ASCII and control characters become `_`, and `"` and
/// `\` are backslash-escaped.
pub fn content_disposition(filename: &str) -> String {
    let mut fallback = String::with_capacity(filename.len());
    for c in filename.chars() {
        match c {
            '"' | '\\' => {
                fallback.push('\\');
                fallback.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => fallback.push(c),
            _ => fallback.push('_'),
        }
    }

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(filename, ATTR_CHAR_ESCAPES)
    )
}

async fn render_blocks(blocks: Vec<GuideBlock>) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || render_docx(blocks))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("docx render task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_plain_topic() {
        assert_eq!(
            content_disposition(&attachment_filename("My Plan")),
            "attachment; filename=\"My_Plan_Recovery_Guide.docx\"; filename*=UTF-8''My_Plan_Recovery_Guide.docx"
        );
    }

    #[test]
    fn test_content_disposition_escapes_quotes() {
        let header = content_disposition(&attachment_filename("He said \"hi\""));
        assert_eq!(
            header,
            "attachment; filename=\"He_said_\\\"hi\\\"_Recovery_Guide.docx\"; filename*=UTF-8''He_said_%22hi%22_Recovery_Guide.docx"
        );
        assert!(HeaderValue::from_str(&header).is_ok());
    }

    #[test]
    fn test_content_disposition_non_ascii_topic_stays_ascii() {
        let header = content_disposition(&attachment_filename("Estrés y calma"));
        assert!(header.is_ascii());
        assert!(header.contains("filename=\"Estr_s_y_calma_Recovery_Guide.docx\""));
        assert!(header.contains("filename*=UTF-8''Estr%C3%A9s_y_calma_Recovery_Guide.docx"));
    }

    #[test]
    fn test_content_disposition_backslash_and_newline() {
        let header = content_disposition("a\\b\nc.docx");
        assert!(header.starts_with("attachment; filename=\"a\\\\b_c.docx\";"));
        assert!(header.ends_with("filename*=UTF-8''a%5Cb%0Ac.docx"));
        assert!(HeaderValue::from_str(&header).is_ok());
    }
}
