//! Renders a guide outline into .docx bytes with docx-rs.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, Footer, Header, IndentLevel, Level,
    LevelJc, LevelText, NumberFormat, Numbering, NumberingId, Paragraph, Pic, Run,
    SpecialIndentType, Start, Style, StyleType,
};

use crate::document::layout::GuideBlock;
use crate::document::logo::Logo;
use crate::errors::AppError;

pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const HEADER_TEXT: &str = "RecoveryPen AI | Trauma-Informed Companion";
pub const FOOTER_TEXT: &str = "Page - ";

const EMU_PER_INCH: u64 = 914_400;
const LOGO_WIDTH_EMU: u64 = 2 * EMU_PER_INCH;
/// Half-points, so 40 = 20pt.
const TITLE_SIZE: usize = 40;

const BULLET_NUMBERING_ID: usize = 1;
const HEADING_STYLES: [(&str, &str, usize); 2] =
    [("Heading1", "Heading 1", 32), ("Heading2", "Heading 2", 26)];
const LIST_BULLET_STYLE: &str = "ListBullet";

/// Builds the document and packs it into an in-memory buffer.
pub fn render_docx(blocks: Vec<GuideBlock>) -> Result<Vec<u8>, AppError> {
    let mut docx = base_document();
    for block in blocks {
        docx = docx.add_paragraph(render_block(block));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| AppError::Docx(format!("failed to serialize document: {e}")))?;
    Ok(buffer.into_inner())
}

/// Styles, bullet numbering and the branded header/footer.
fn base_document() -> Docx {
    let mut docx = Docx::new();

    for (id, name, size) in HEADING_STYLES {
        docx = docx.add_style(
            Style::new(id, StyleType::Paragraph)
                .name(name)
                .size(size)
                .bold(),
        );
    }

    docx.add_style(Style::new(LIST_BULLET_STYLE, StyleType::Paragraph).name("List Bullet"))
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )
                .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
        .header(Header::new().add_paragraph(centered(HEADER_TEXT)))
        .footer(Footer::new().add_paragraph(centered(FOOTER_TEXT)))
}

fn render_block(block: GuideBlock) -> Paragraph {
    match block {
        GuideBlock::Logo(logo) => Paragraph::new().add_run(Run::new().add_image(logo_picture(logo))),
        GuideBlock::Title(lines) => {
            let mut run = Run::new().size(TITLE_SIZE).bold();
            for line in lines {
                run = run.add_text(line).add_break(BreakType::TextWrapping);
            }
            Paragraph::new()
                .add_run(run.add_break(BreakType::TextWrapping))
                .align(AlignmentType::Center)
        }
        GuideBlock::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
        GuideBlock::Heading { level, text } => Paragraph::new()
            .add_run(Run::new().add_text(text))
            .style(heading_style(level)),
        GuideBlock::Bullet(text) => Paragraph::new()
            .add_run(Run::new().add_text(text))
            .style(LIST_BULLET_STYLE)
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        GuideBlock::Paragraph(text) => Paragraph::new().add_run(Run::new().add_text(text)),
        GuideBlock::Blank => Paragraph::new(),
    }
}

fn heading_style(level: u8) -> &'static str {
    match level {
        1 => HEADING_STYLES[0].0,
        _ => HEADING_STYLES[1].0,
    }
}

fn centered(text: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text))
        .align(AlignmentType::Center)
}

/// Fixed 2" width, height follows the image's aspect ratio.
fn logo_picture(logo: Logo) -> Pic {
    let (width_emu, height_emu) = logo_extent_emu(logo.width_px, logo.height_px);
    Pic::new_with_dimensions(logo.bytes, logo.width_px, logo.height_px).size(width_emu, height_emu)
}

fn logo_extent_emu(width_px: u32, height_px: u32) -> (u32, u32) {
    let height = if width_px == 0 {
        LOGO_WIDTH_EMU
    } else {
        LOGO_WIDTH_EMU * u64::from(height_px) / u64::from(width_px)
    };
    (LOGO_WIDTH_EMU as u32, height.min(u64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::layout::{layout_guide, DocxRequest};
    use crate::document::logo::tests::TINY_PNG;

    fn make_request() -> DocxRequest {
        DocxRequest {
            topic: "My Plan".to_string(),
            objectives: vec!["Breathe".to_string()],
            guide: "Intro\n\n- Step one\nStep two".to_string(),
            upload_summary: Some("File 'notes.txt' uploaded and indexed.".to_string()),
        }
    }

    #[test]
    fn test_render_produces_zip_container() {
        let bytes = render_docx(layout_guide(&make_request(), None)).unwrap();
        assert!(bytes.starts_with(b"PK"), "docx must be a zip archive");
    }

    /// (style, text, numbered) for every body paragraph of a rendered document.
    fn rendered_paragraphs(bytes: &[u8]) -> Vec<(Option<String>, String, bool)> {
        let docx = docx_rs::read_docx(bytes).unwrap();
        docx.document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(p) => Some((
                    p.property.style.as_ref().map(|s| s.val.clone()),
                    p.raw_text(),
                    p.property.numbering_property.is_some(),
                )),
                _ => None,
            })
            .collect()
    }

    fn zip_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        std::io::Read::read_to_string(&mut archive.by_name(name).unwrap(), &mut xml).unwrap();
        xml
    }

    #[test]
    fn test_rendered_body_keeps_order_styles_and_bullets() {
        let bytes = render_docx(layout_guide(&make_request(), None)).unwrap();
        let paragraphs = rendered_paragraphs(&bytes);

        let styled = |style: &str, text: &str, numbered: bool| {
            (Some(style.to_string()), text.to_string(), numbered)
        };
        let plain = |text: &str| (None, text.to_string(), false);

        assert!(paragraphs[0].1.starts_with("RecoveryPen AI\nTrauma-Informed Companion"));
        assert_eq!(paragraphs[1], plain("\n"), "page break paragraph");

        let body_start = paragraphs
            .iter()
            .position(|p| p.0.as_deref() == Some("Heading1"))
            .expect("topic heading rendered");
        assert_eq!(
            &paragraphs[body_start..],
            &[
                styled("Heading1", "My Plan", false),
                styled("Heading2", "Objectives", false),
                styled("ListBullet", "- Breathe", true),
                styled("Heading2", "Recovery Guide", false),
                plain("Intro"),
                plain(""),
                styled("ListBullet", "- Step one", true),
                plain("Step two"),
                styled("Heading2", "Upload Summary", false),
                plain("File 'notes.txt' uploaded and indexed."),
            ]
        );
    }

    #[test]
    fn test_rendered_header_and_footer_text() {
        let bytes = render_docx(layout_guide(&make_request(), None)).unwrap();
        assert!(zip_entry(&bytes, "word/header1.xml").contains(HEADER_TEXT));
        assert!(zip_entry(&bytes, "word/footer1.xml").contains(FOOTER_TEXT));
    }

    #[test]
    fn test_render_with_logo() {
        let logo = Logo {
            bytes: TINY_PNG.to_vec(),
            width_px: 1,
            height_px: 1,
        };
        let with_logo = render_docx(layout_guide(&make_request(), Some(logo))).unwrap();
        let without_logo = render_docx(layout_guide(&make_request(), None)).unwrap();

        assert!(with_logo.starts_with(b"PK"));
        assert!(with_logo.len() > without_logo.len());
    }

    #[test]
    fn test_logo_extent_keeps_aspect_ratio() {
        assert_eq!(logo_extent_emu(400, 200), (1_828_800, 914_400));
        assert_eq!(logo_extent_emu(100, 100), (1_828_800, 1_828_800));
    }

    #[test]
    fn test_heading_levels_map_to_styles() {
        assert_eq!(heading_style(1), "Heading1");
        assert_eq!(heading_style(2), "Heading2");
    }
}
