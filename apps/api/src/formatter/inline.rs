//! Inline markdown rewriting — a pure text transform, independent of block
//! classification.
//!
//! Resolves `**bold**`, `*italic*`, `_italic_` and `[text](url)` into styled
//! spans so no raw markdown syntax reaches the final block text. Underscore
//! emphasis becomes italic rather than being stripped.

use regex::Regex;
use std::sync::OnceLock;

/// Emphasis applied to one span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Bold,
    Italic,
}

/// One contiguous run of text with a single emphasis.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Plain,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Bold,
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Italic,
        }
    }
}

fn inline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*\*([^*]+)\*\*|\*([^*]+)\*|_([^_]+)_|\[([^\]]+)\]\(([^)]+)\)")
            .expect("inline markdown pattern is valid")
    })
}

/// Resolves inline emphasis and links in `text` into a span sequence.
///
/// Unpaired delimiters are left verbatim — a lone `*` or `_` is ordinary text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in inline_re().captures_iter(text) {
        let m = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        if m.start() > last {
            spans.push(Span::plain(&text[last..m.start()]));
        }
        if let Some(bold) = caps.get(1) {
            spans.push(Span::bold(bold.as_str()));
        } else if let Some(italic) = caps.get(2) {
            spans.push(Span::italic(italic.as_str()));
        } else if let Some(underscore) = caps.get(3) {
            spans.push(Span::italic(underscore.as_str()));
        } else if let Some(link_text) = caps.get(4) {
            spans.push(Span::plain(link_text.as_str()));
        }
        last = m.end();
    }

    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }

    spans.retain(|s| !s.text.is_empty());
    spans
}

/// Joins a span sequence back into its displayed text.
pub fn flatten(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
