//! Axum route handlers for the analyze / generate / export pipelines.
//!
//! Each run is one linear pass: read upload → extract text → build prompt →
//! completion call → respond. Empty extracted text aborts before any network
//! call is made.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract;
use crate::formatter::{self, exports};
use crate::pipeline::artifacts::{artifact_filename, available_formats, ExportFormat};
use crate::pipeline::prompts;
use crate::render;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct ArtifactInfo {
    pub format: ExportFormat,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub markdown: String,
    pub artifacts: Vec<ArtifactInfo>,
    /// Set when PDF export is disabled; tells the user how to enable it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub content: String,
    pub format: ExportFormat,
}

const PDF_DISABLED_NOTICE: &str =
    "PDF export is disabled. Set ENABLE_PDF_EXPORT=true and restart to enable PDF downloads.";

// ────────────────────────────────────────────────────────────────────────────
// Upload handling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct UploadedResume {
    data: Bytes,
    filename: Option<String>,
    content_type: Option<String>,
    job_role: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadedResume, AppError> {
    let mut data: Option<Bytes> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut job_role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                filename = field.file_name().map(str::to_string);
                content_type = field.content_type().map(str::to_string);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?,
                );
            }
            Some("job_role") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read job_role: {e}")))?;
                if !text.trim().is_empty() {
                    job_role = Some(text);
                }
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| {
        AppError::Validation("Missing 'file' field: upload a PDF or TXT resume".to_string())
    })?;

    Ok(UploadedResume {
        data,
        filename,
        content_type,
        job_role,
    })
}

/// Extracts text from the upload and enforces the non-empty contract.
/// PDF parsing is CPU-bound, so it runs on the blocking pool.
async fn extract_upload_text(upload: &UploadedResume) -> Result<String, AppError> {
    let media_type =
        extract::resolve_media_type(upload.content_type.as_deref(), upload.filename.as_deref())
            .map_err(|e| AppError::Extraction(e.to_string()))?;

    let data = upload.data.clone();
    let text = tokio::task::spawn_blocking(move || extract::extract_text(&data, media_type))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(AppError::EmptyContent);
    }
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/analyze
///
/// Returns AI-generated critique of the uploaded resume.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_upload_text(&upload).await?;

    let prompt = prompts::build_critique_prompt(&text, upload.job_role.as_deref());
    let analysis = state
        .llm
        .complete(prompts::CRITIQUE_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Completion(e.to_string()))?;

    info!("Analyze run complete ({} chars of critique)", analysis.len());
    Ok(Json(AnalyzeResponse { analysis }))
}

/// POST /api/v1/resumes/generate
///
/// Returns a rewritten resume as markdown plus the artifact listing the UI
/// offers for download. The artifacts themselves come from /export.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_upload_text(&upload).await?;

    let prompt = prompts::build_rewrite_prompt(&text, upload.job_role.as_deref());
    let markdown = state
        .llm
        .complete(prompts::REWRITE_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Completion(e.to_string()))?;

    let date = Utc::now().date_naive();
    let artifacts = available_formats(state.config.pdf_export)
        .into_iter()
        .map(|format| ArtifactInfo {
            format,
            filename: artifact_filename(format, date),
        })
        .collect();
    let pdf_notice = (!state.config.pdf_export).then(|| PDF_DISABLED_NOTICE.to_string());

    info!("Generate run complete ({} chars of markdown)", markdown.len());
    Ok(Json(GenerateResponse {
        markdown,
        artifacts,
        pdf_notice,
    }))
}

/// POST /api/v1/resumes/export
///
/// Formats previously generated markdown into one downloadable artifact.
/// Stateless: the UI holds the markdown between generate and export.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let date = Utc::now().date_naive();
    let filename = artifact_filename(request.format, date);

    let bytes = match request.format {
        ExportFormat::Markdown => exports::markdown_export(&request.content, date),
        ExportFormat::Text => exports::text_export(&request.content),
        ExportFormat::Pdf => {
            if !state.config.pdf_export {
                return Err(AppError::Configuration(PDF_DISABLED_NOTICE.to_string()));
            }
            let content = request.content.clone();
            let styles = state.styles.clone();
            // Layout + serialization is CPU-bound.
            tokio::task::spawn_blocking(move || {
                let blocks = formatter::classify(&content);
                render::render_pdf(&blocks, &styles)
            })
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))?
            .map_err(|e| AppError::Render(e.to_string()))?
        }
    };

    let headers = [
        (
            header::CONTENT_TYPE,
            request.format.content_type().to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::formatter::StyleSheet;
    use crate::llm_client::LlmClient;
    use axum::http::StatusCode;

    fn test_state(pdf_export: bool) -> AppState {
        AppState {
            llm: LlmClient::new("test-key".to_string()),
            config: Config {
                openai_api_key: "test-key".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
                pdf_export,
            },
            styles: StyleSheet::default(),
        }
    }

    #[tokio::test]
    async fn test_blank_upload_aborts_before_any_network_call() {
        // Whitespace-only extracted text must fail with EmptyContent; no
        // completion request is ever built for it.
        let upload = UploadedResume {
            data: Bytes::from_static(b"   \n\t\n"),
            filename: Some("resume.txt".to_string()),
            content_type: Some("text/plain".to_string()),
            job_role: None,
        };
        let err = extract_upload_text(&upload).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyContent));
    }

    #[tokio::test]
    async fn test_upload_text_extraction_roundtrip() {
        let upload = UploadedResume {
            data: Bytes::from_static(b"Jane Doe\njane@x.com\n"),
            filename: Some("resume.txt".to_string()),
            content_type: Some("text/plain".to_string()),
            job_role: Some("Backend Engineer".to_string()),
        };
        let text = extract_upload_text(&upload).await.unwrap();
        assert_eq!(text, "Jane Doe\njane@x.com\n");
    }

    #[tokio::test]
    async fn test_export_text_succeeds_without_pdf_rendering() {
        let request = ExportRequest {
            content: "# Jane\n- did *things*\n".to_string(),
            format: ExportFormat::Text,
        };
        let response = handle_export(State(test_state(false)), Json(request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"improved_resume_"));
        assert!(disposition.ends_with(".txt\""));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains('#'));
        assert!(!text.contains('*'));
    }

    #[tokio::test]
    async fn test_export_markdown_prepends_timestamp_header() {
        let request = ExportRequest {
            content: "## Skills\n- Rust\n".to_string(),
            format: ExportFormat::Markdown,
        };
        let response = handle_export(State(test_state(false)), Json(request))
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("*Generated on "));
        assert!(text.ends_with("## Skills\n- Rust\n"));
    }

    #[tokio::test]
    async fn test_export_pdf_disabled_is_configuration_error() {
        let request = ExportRequest {
            content: "Jane Doe\n## Experience\n- Built X\n".to_string(),
            format: ExportFormat::Pdf,
        };
        let err = handle_export(State(test_state(false)), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_export_pdf_enabled_returns_pdf_bytes() {
        let request = ExportRequest {
            content: "Jane Doe\njane@x.com\n## Experience\n- Built X\n".to_string(),
            format: ExportFormat::Pdf,
        };
        let response = handle_export(State(test_state(true)), Json(request))
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_rejects_empty_content() {
        let request = ExportRequest {
            content: "   \n".to_string(),
            format: ExportFormat::Text,
        };
        let err = handle_export(State(test_state(true)), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_generate_response_serializes_artifact_listing() {
        let response = GenerateResponse {
            markdown: "Jane Doe".to_string(),
            artifacts: vec![ArtifactInfo {
                format: ExportFormat::Markdown,
                filename: "improved_resume_20240315.md".to_string(),
            }],
            pdf_notice: Some(PDF_DISABLED_NOTICE.to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["artifacts"][0]["format"], "markdown");
        assert_eq!(
            json["artifacts"][0]["filename"],
            "improved_resume_20240315.md"
        );
        assert!(json["pdf_notice"].as_str().unwrap().contains("ENABLE_PDF_EXPORT"));
    }
}
