//! Text extraction for uploaded resumes.
//!
//! Supports PDF (via `pdf-extract`, pages concatenated with a separating
//! newline) and UTF-8 plain text. No OCR: encrypted or image-only PDFs fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("File is not valid UTF-8 text")]
    InvalidUtf8,
}

/// The two upload media types the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    PlainText,
}

/// Resolves the media type from the declared content type, falling back to the
/// filename extension when the browser sends something generic.
pub fn resolve_media_type(
    content_type: Option<&str>,
    filename: Option<&str>,
) -> Result<MediaType, ExtractionError> {
    match content_type {
        Some("application/pdf") => return Ok(MediaType::Pdf),
        Some("text/plain") => return Ok(MediaType::PlainText),
        _ => {}
    }

    match filename.and_then(|f| f.rsplit('.').next()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => Ok(MediaType::Pdf),
        Some(ext) if ext.eq_ignore_ascii_case("txt") => Ok(MediaType::PlainText),
        _ => Err(ExtractionError::UnsupportedType(
            content_type
                .or(filename)
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}

/// Extracts the full text content of an uploaded file.
///
/// The file is read fully into memory once per run; resumes are small, so no
/// streaming is needed.
pub fn extract_text(data: &[u8], media_type: MediaType) -> Result<String, ExtractionError> {
    match media_type {
        MediaType::Pdf => {
            pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractionError::Pdf(e.to_string()))
        }
        MediaType::PlainText => String::from_utf8(data.to_vec())
            .map_err(|_| ExtractionError::InvalidUtf8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_media_type_from_content_type() {
        assert_eq!(
            resolve_media_type(Some("application/pdf"), None).unwrap(),
            MediaType::Pdf
        );
        assert_eq!(
            resolve_media_type(Some("text/plain"), None).unwrap(),
            MediaType::PlainText
        );
    }

    #[test]
    fn test_resolve_media_type_falls_back_to_extension() {
        assert_eq!(
            resolve_media_type(Some("application/octet-stream"), Some("resume.PDF")).unwrap(),
            MediaType::Pdf
        );
        assert_eq!(
            resolve_media_type(None, Some("resume.txt")).unwrap(),
            MediaType::PlainText
        );
    }

    #[test]
    fn test_resolve_media_type_rejects_unknown() {
        let err = resolve_media_type(Some("image/png"), Some("photo.png")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(_)));
    }

    #[test]
    fn test_extract_plain_text_roundtrip() {
        let text = extract_text("Jane Doe\njane@x.com".as_bytes(), MediaType::PlainText).unwrap();
        assert_eq!(text, "Jane Doe\njane@x.com");
    }

    #[test]
    fn test_extract_plain_text_invalid_utf8() {
        let err = extract_text(&[0xff, 0xfe, 0x00], MediaType::PlainText).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidUtf8));
    }

    #[test]
    fn test_extract_pdf_rejects_garbage() {
        let err = extract_text(b"not a pdf at all", MediaType::Pdf).unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }
}
