use crate::config::Config;
use crate::formatter::StyleSheet;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// No database, cache, or object store: every run is stateless, and the
/// uploaded file lives only for the duration of one request.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Fixed style tag → visual attributes mapping, built once at startup.
    pub styles: StyleSheet,
}
