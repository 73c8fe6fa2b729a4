//! Document Formatter — converts loosely-structured generated resume text
//! into styled blocks and downloadable byte payloads.
//!
//! The formatter is a pure function of its input text and the static style
//! sheet: classification emits blocks in input line order, inline markdown is
//! resolved to emphasis spans, and the block sequence is handed to the
//! renderer (`crate::render`) for PDF layout.

pub mod blocks;
pub mod exports;
pub mod inline;
pub mod stylesheet;

pub use blocks::{classify, BlockKind};
pub use stylesheet::StyleSheet;
