//! Cover-page logo loading.

use std::io::Cursor;
use std::path::Path;

use crate::errors::AppError;

/// Logo image bytes with their pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// Reads the logo at `path`. A missing file is `Ok(None)`; an unreadable or
/// undecodable file is an error.
pub async fn load_logo(path: &Path) -> Result<Option<Logo>, AppError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let (width_px, height_px) = image::ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| AppError::Docx(format!("logo at {} is not a readable image: {e}", path.display())))?;

    Ok(Some(Logo {
        bytes,
        width_px,
        height_px,
    }))
}
