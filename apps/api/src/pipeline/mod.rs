// The two resume pipelines (analyze, generate) plus artifact export.
// Flow: upload → extract → prompt → completion → display text or artifacts.

pub mod artifacts;
pub mod handlers;
pub mod prompts;
