//! Download artifact naming and the per-run artifact listing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three downloadable formats of a generated resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Markdown,
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

/// Filename for one artifact: `improved_resume_<yyyymmdd>.<ext>`.
pub fn artifact_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "improved_resume_{}.{}",
        date.format("%Y%m%d"),
        format.extension()
    )
}

/// Formats offered for download. PDF is omitted when rendering is disabled.
pub fn available_formats(pdf_export: bool) -> Vec<ExportFormat> {
    let mut formats = Vec::with_capacity(3);
    if pdf_export {
        formats.push(ExportFormat::Pdf);
    }
    formats.push(ExportFormat::Markdown);
    formats.push(ExportFormat::Text);
    formats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
    }

    #[test]
    fn test_artifact_filenames_for_fixed_date() {
        assert_eq!(
            artifact_filename(ExportFormat::Pdf, fixed_date()),
            "improved_resume_20240315.pdf"
        );
        assert_eq!(
            artifact_filename(ExportFormat::Markdown, fixed_date()),
            "improved_resume_20240315.md"
        );
        assert_eq!(
            artifact_filename(ExportFormat::Text, fixed_date()),
            "improved_resume_20240315.txt"
        );
    }

    #[test]
    fn test_pdf_omitted_when_rendering_disabled() {
        assert_eq!(
            available_formats(false),
            vec![ExportFormat::Markdown, ExportFormat::Text]
        );
        assert_eq!(
            available_formats(true),
            vec![ExportFormat::Pdf, ExportFormat::Markdown, ExportFormat::Text]
        );
    }

    #[test]
    fn test_format_serde_uses_lowercase_names() {
        let format: ExportFormat = serde_json::from_str(r#""markdown""#).unwrap();
        assert_eq!(format, ExportFormat::Markdown);
        assert_eq!(serde_json::to_string(&ExportFormat::Pdf).unwrap(), r#""pdf""#);
    }
}
