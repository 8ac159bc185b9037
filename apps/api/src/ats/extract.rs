//! Resume file → plain text.
//!
//! PDFs go through `pdf-extract`; any other UTF-8 upload is taken as text
//! unless its extension names a known binary document format.

use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";
const BINARY_EXTENSIONS: &[&str] = &["doc", "docx", "odt", "pages"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported resume format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Resume file contains no readable text")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Text,
}

/// Decides how to read an upload from its filename and leading bytes.
/// Magic bytes win over the extension; unknown extensions fall back to a UTF-8 check.
pub fn detect_format(filename: Option<&str>, bytes: &[u8]) -> Result<ResumeFormat, ExtractError> {
    if bytes.starts_with(PDF_MAGIC) {
        return Ok(ResumeFormat::Pdf);
    }

    let extension = filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => Err(ExtractError::Pdf(
            "file has a .pdf extension but is not a PDF document".to_string(),
        )),
        Some(ext) if BINARY_EXTENSIONS.contains(&ext) => {
            Err(ExtractError::UnsupportedFormat(format!(".{ext}")))
        }
        _ if std::str::from_utf8(bytes).is_ok() => Ok(ResumeFormat::Text),
        _ => Err(ExtractError::UnsupportedFormat(
            "binary content".to_string(),
        )),
    }
}

/// Extracts plain text from an uploaded resume. CPU-bound for PDFs, so
/// async callers run it on the blocking pool.
pub fn extract_resume_text(filename: Option<&str>, bytes: &[u8]) -> Result<String, ExtractError> {
    let format = detect_format(filename, bytes)?;
    debug!(?format, size = bytes.len(), "extracting resume text");

    let text = match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?,
        ResumeFormat::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}
