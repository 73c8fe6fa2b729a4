// PDF rendering: block layout onto letter pages plus lopdf serialization.
// CPU-bound work; callers run it inside tokio::task::spawn_blocking.

pub mod metrics;
pub mod pdf;

pub use pdf::render_pdf;
