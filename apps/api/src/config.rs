use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Missing required variables fail at startup, not on the first request.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Runtime switch for PDF export. When false the generate response omits
    /// the PDF artifact and `format=pdf` exports return a configuration error;
    /// Markdown and plain-text downloads keep working.
    pub pdf_export: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            pdf_export: std::env::var("ENABLE_PDF_EXPORT")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
