//! Guide document outline — the ordered blocks of the .docx, independent of the
//! rendering library.
//!
//! # Line classification (guide body)
//! - empty / whitespace-only line → blank paragraph
//! - trimmed line starting with `-` → bullet, text kept as trimmed (dash included)
//! - anything else → plain paragraph with the trimmed text

use serde::Deserialize;

use crate::document::logo::Logo;

pub const TITLE_LINES: [&str; 2] = ["RecoveryPen AI", "Trauma-Informed Companion"];
pub const OBJECTIVES_HEADING: &str = "Objectives";
pub const GUIDE_HEADING: &str = "Recovery Guide";
pub const UPLOAD_SUMMARY_HEADING: &str = "Upload Summary";
const FILENAME_SUFFIX: &str = "_Recovery_Guide.docx";

#[derive(Debug, Clone, Deserialize)]
pub struct DocxRequest {
    pub topic: String,
    pub objectives: Vec<String>,
    pub guide: String,
    #[serde(default)]
    pub upload_summary: Option<String>,
}

/// One element of the assembled document, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum GuideBlock {
    /// Cover-page image.
    Logo(Logo),
    /// Centered bold cover text, one entry per line.
    Title(Vec<String>),
    PageBreak,
    /// Heading; level 1 is the topic, level 2 the section titles.
    Heading { level: u8, text: String },
    Bullet(String),
    Paragraph(String),
    Blank,
}

/// Lays out the full guide document.
pub fn layout_guide(request: &DocxRequest, logo: Option<Logo>) -> Vec<GuideBlock> {
    let mut blocks = Vec::new();

    // Cover page
    if let Some(logo) = logo {
        blocks.push(GuideBlock::Logo(logo));
    }
    blocks.push(GuideBlock::Title(
        TITLE_LINES.iter().map(|s| s.to_string()).collect(),
    ));
    blocks.push(GuideBlock::PageBreak);

    blocks.push(heading(1, &request.topic));

    blocks.push(heading(2, OBJECTIVES_HEADING));
    blocks.extend(
        request
            .objectives
            .iter()
            .map(|o| GuideBlock::Bullet(format!("- {o}"))),
    );

    blocks.push(heading(2, GUIDE_HEADING));
    blocks.extend(request.guide.split('\n').map(classify_line));

    if let Some(summary) = request.upload_summary.as_deref().filter(|s| !s.is_empty()) {
        blocks.push(heading(2, UPLOAD_SUMMARY_HEADING));
        blocks.push(GuideBlock::Paragraph(summary.to_string()));
    }

    blocks
}

/// Classifies one line of guide text.
pub fn classify_line(line: &str) -> GuideBlock {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        GuideBlock::Blank
    } else if trimmed.starts_with('-') {
        GuideBlock::Bullet(trimmed.to_string())
    } else {
        GuideBlock::Paragraph(trimmed.to_string())
    }
}

/// `"My Plan"` → `"My_Plan_Recovery_Guide.docx"`.
pub fn attachment_filename(topic: &str) -> String {
    format!("{}{FILENAME_SUFFIX}", topic.replace(' ', "_"))
}

fn heading(level: u8, text: &str) -> GuideBlock {
    GuideBlock::Heading {
        level,
        text: text.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
