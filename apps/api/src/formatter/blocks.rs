//! Line classification — turns loosely markdown-shaped resume text into an
//! ordered sequence of styled blocks.
//!
//! Classification is a single pass over lines through an explicit ordered rule
//! list; the first matching rule wins, so the order below is the contract:
//!
//!   skip → name → contact → section → subsection → bullet → body
//!
//! Generated resumes loosely follow: first line = name, next few lines =
//! contact info, `## ` sections, `### ` subsections, `- ` bullets, everything
//! else body text. Malformed structure degrades to body text instead of
//! failing.

use regex::Regex;
use std::sync::OnceLock;

use crate::formatter::inline::{flatten, parse_inline, Span};

/// Role of a block; doubles as the style tag the renderer looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Name,
    Contact,
    SectionHeader,
    SubsectionHeader,
    Bullet,
    Body,
}

/// One styled unit of output text. Spans carry resolved emphasis; no raw
/// markdown syntax survives past classification.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBlock {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

impl DocumentBlock {
    fn new(kind: BlockKind, spans: Vec<Span>) -> Self {
        Self { kind, spans }
    }

    /// The displayed text of this block, emphasis markers resolved.
    pub fn text(&self) -> String {
        flatten(&self.spans)
    }
}

/// Non-heading lines emitted before this many blocks exist are contact info.
const CONTACT_BLOCK_THRESHOLD: usize = 3;

const BULLET_MARKERS: [&str; 3] = ["\u{2022} ", "- ", "* "];

/// Glyph prefixed to every bullet block.
const BULLET_GLYPH: &str = "\u{2022} ";

/// Tokens that, combined with a comma, mark a line as location/date metadata.
/// Coarse on purpose: an ordinary sentence containing a comma and "Remote"
/// will be misclassified. Known heuristic limitation.
const LOCATION_TOKENS: [&str; 2] = ["Remote", "remote"];

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year pattern is valid"))
}

#[derive(Debug, Default)]
struct ClassifierState {
    blocks_emitted: usize,
}

/// One classification rule: `applies` is the predicate, `build` the
/// constructor. `build` returning `None` means the line is dropped.
struct Rule {
    applies: fn(&str, &ClassifierState) -> bool,
    build: fn(&str) -> Option<DocumentBlock>,
}

const RULES: &[Rule] = &[
    Rule {
        applies: skippable_applies,
        build: skippable_build,
    },
    Rule {
        applies: name_applies,
        build: name_build,
    },
    Rule {
        applies: contact_applies,
        build: contact_build,
    },
    Rule {
        applies: section_applies,
        build: section_build,
    },
    Rule {
        applies: subsection_applies,
        build: subsection_build,
    },
    Rule {
        applies: bullet_applies,
        build: bullet_build,
    },
    Rule {
        applies: body_applies,
        build: body_build,
    },
];

fn skippable_applies(line: &str, _state: &ClassifierState) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed == "---" || trimmed.starts_with("```")
}

fn skippable_build(_line: &str) -> Option<DocumentBlock> {
    None
}

// The name is the first non-heading line of the document. Gating on zero
// emitted blocks keeps the name the first block (or absent entirely when the
// document opens with a heading).
fn name_applies(line: &str, state: &ClassifierState) -> bool {
    state.blocks_emitted == 0 && !line.starts_with('#')
}

fn name_build(line: &str) -> Option<DocumentBlock> {
    Some(DocumentBlock::new(
        BlockKind::Name,
        parse_inline(line.trim()),
    ))
}

fn contact_applies(line: &str, state: &ClassifierState) -> bool {
    state.blocks_emitted < CONTACT_BLOCK_THRESHOLD && !line.starts_with('#')
}

fn contact_build(line: &str) -> Option<DocumentBlock> {
    // Links become their display text: "[x](url)" renders as "x".
    Some(DocumentBlock::new(
        BlockKind::Contact,
        parse_inline(line.trim()),
    ))
}

fn section_applies(line: &str, _state: &ClassifierState) -> bool {
    line.starts_with("## ")
}

fn section_build(line: &str) -> Option<DocumentBlock> {
    let text = line["## ".len()..].trim().to_uppercase();
    Some(DocumentBlock::new(
        BlockKind::SectionHeader,
        parse_inline(&text),
    ))
}

fn subsection_applies(line: &str, _state: &ClassifierState) -> bool {
    line.starts_with("### ")
}

fn subsection_build(line: &str) -> Option<DocumentBlock> {
    let text = line["### ".len()..].trim();
    Some(DocumentBlock::new(
        BlockKind::SubsectionHeader,
        parse_inline(text),
    ))
}

fn bullet_applies(line: &str, _state: &ClassifierState) -> bool {
    BULLET_MARKERS.iter().any(|m| line.starts_with(m))
}

fn bullet_build(line: &str) -> Option<DocumentBlock> {
    let rest = BULLET_MARKERS
        .iter()
        .find_map(|m| line.strip_prefix(m))
        .unwrap_or(line);
    let mut spans = vec![Span::plain(BULLET_GLYPH)];
    spans.extend(parse_inline(rest.trim()));
    Some(DocumentBlock::new(BlockKind::Bullet, spans))
}

fn body_applies(_line: &str, _state: &ClassifierState) -> bool {
    true
}

fn body_build(line: &str) -> Option<DocumentBlock> {
    let trimmed = line.trim();
    // Job-title/date/location lines reuse the subsection style.
    let kind = if looks_like_metadata(trimmed) {
        BlockKind::SubsectionHeader
    } else {
        BlockKind::Body
    };
    Some(DocumentBlock::new(kind, parse_inline(trimmed)))
}

fn looks_like_metadata(line: &str) -> bool {
    if line.contains(" | ") {
        return true;
    }
    line.contains(',')
        && (LOCATION_TOKENS.iter().any(|t| line.contains(t)) || year_re().is_match(line))
}

/// Classifies generated resume text into an ordered block sequence.
///
/// Pure function of the input: block order preserves line order, and at most
/// one `Name` block exists (always at index 0 when present).
pub fn classify(text: &str) -> Vec<DocumentBlock> {
    let mut state = ClassifierState::default();
    let mut blocks = Vec::new();

    for raw in text.lines() {
        let line = raw.trim_end();
        for rule in RULES {
            if !(rule.applies)(line, &state) {
                continue;
            }
            if let Some(block) = (rule.build)(line) {
                blocks.push(block);
                state.blocks_emitted = blocks.len();
            }
            break;
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::inline::Emphasis;

    fn kinds(blocks: &[DocumentBlock]) -> Vec<BlockKind> {
        blocks.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let input = "Jane Doe\njane@x.com | 555-1234\n## Experience\n- Built X\n";
        let blocks = classify(input);

        assert_eq!(
            kinds(&blocks),
            vec![
                BlockKind::Name,
                BlockKind::Contact,
                BlockKind::SectionHeader,
                BlockKind::Bullet,
            ]
        );
        assert_eq!(blocks[0].text(), "Jane Doe");
        assert_eq!(blocks[1].text(), "jane@x.com | 555-1234");
        assert_eq!(blocks[2].text(), "EXPERIENCE");
        assert_eq!(blocks[3].text(), "\u{2022} Built X");
    }

    #[test]
    fn test_section_header_trimmed_and_uppercased() {
        let blocks = classify("## Experience \n##  Skills\n");
        assert_eq!(blocks[0].kind, BlockKind::SectionHeader);
        assert_eq!(blocks[0].text(), "EXPERIENCE");
        assert_eq!(blocks[1].text(), "SKILLS");
    }

    #[test]
    fn test_subsection_header_preserves_case() {
        let blocks = classify("### Senior Engineer at Acme\n");
        assert_eq!(blocks[0].kind, BlockKind::SubsectionHeader);
        assert_eq!(blocks[0].text(), "Senior Engineer at Acme");
    }

    #[test]
    fn test_all_three_bullet_markers() {
        // Past the contact threshold so bullets classify as bullets.
        let input = "Jane\na\nb\n\u{2022} one\n- two\n* three\n";
        let blocks = classify(input);
        for block in &blocks[3..] {
            assert_eq!(block.kind, BlockKind::Bullet);
            assert!(block.text().starts_with('\u{2022}'));
        }
        assert_eq!(blocks[4].text(), "\u{2022} two");
    }

    #[test]
    fn test_bullet_resolves_emphasis() {
        let input = "Jane\na\nb\n- shipped **major** release\n";
        let blocks = classify(input);
        let bullet = &blocks[3];
        assert_eq!(bullet.text(), "\u{2022} shipped major release");
        assert!(bullet
            .spans
            .iter()
            .any(|s| s.emphasis == Emphasis::Bold && s.text == "major"));
    }

    #[test]
    fn test_at_most_one_name_and_it_is_first() {
        let input = "Jane Doe\njane@x.com\nNew York\nPlain paragraph.\nAnother paragraph.\n";
        let blocks = classify(input);
        let names: Vec<_> = blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind == BlockKind::Name)
            .collect();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].0, 0);
    }

    #[test]
    fn test_no_name_when_document_opens_with_heading() {
        let input = "## Summary\nA seasoned engineer.\n";
        let blocks = classify(input);
        assert!(blocks.iter().all(|b| b.kind != BlockKind::Name));
        // Contact detection still applies relative to whatever was emitted.
        assert_eq!(blocks[1].kind, BlockKind::Contact);
    }

    #[test]
    fn test_excess_contact_lines_fall_through_to_body() {
        let input = "Jane\nline2\nline3\nThis sentence has no metadata markers\n";
        let blocks = classify(input);
        assert_eq!(blocks[1].kind, BlockKind::Contact);
        assert_eq!(blocks[2].kind, BlockKind::Contact);
        assert_eq!(blocks[3].kind, BlockKind::Body);
    }

    #[test]
    fn test_contact_link_rewritten_to_text() {
        let input = "Jane Doe\n[jane@x.com](mailto:jane@x.com) | 555-1234\n";
        let blocks = classify(input);
        assert_eq!(blocks[1].kind, BlockKind::Contact);
        assert_eq!(blocks[1].text(), "jane@x.com | 555-1234");
    }

    #[test]
    fn test_skips_blanks_rules_and_fences() {
        let input = "Jane\n\n---\n```markdown\n```\ncontact line\n";
        let blocks = classify(input);
        assert_eq!(kinds(&blocks), vec![BlockKind::Name, BlockKind::Contact]);
    }

    #[test]
    fn test_pipe_body_line_reuses_subsection_style() {
        let input = "Jane\na\nb\nAcme Corp | San Francisco | 2021\n";
        let blocks = classify(input);
        assert_eq!(blocks[3].kind, BlockKind::SubsectionHeader);
    }

    #[test]
    fn test_comma_plus_year_is_metadata() {
        let input = "Jane\na\nb\nBoston, 2019 - 2023\n";
        let blocks = classify(input);
        assert_eq!(blocks[3].kind, BlockKind::SubsectionHeader);
    }

    #[test]
    fn test_comma_plus_remote_is_metadata() {
        let input = "Jane\na\nb\nAcme Corp, Remote\n";
        let blocks = classify(input);
        assert_eq!(blocks[3].kind, BlockKind::SubsectionHeader);
    }

    #[test]
    fn test_plain_sentence_with_comma_stays_body() {
        let input = "Jane\na\nb\nBuilt tooling, dashboards and alerts for the team\n";
        let blocks = classify(input);
        assert_eq!(blocks[3].kind, BlockKind::Body);
    }

    #[test]
    fn test_section_marker_wins_over_bullet_interpretation() {
        // "## " lines are never bullets or contacts; first matching rule wins.
        let input = "Jane\n## Skills\n- Rust\n";
        let blocks = classify(input);
        assert_eq!(blocks[1].kind, BlockKind::SectionHeader);
    }

    #[test]
    fn test_empty_input_produces_no_blocks() {
        assert!(classify("").is_empty());
        assert!(classify("\n\n---\n").is_empty());
    }

    #[test]
    fn test_no_raw_markdown_reaches_block_text() {
        let input =
            "**Jane Doe**\n[jane@x.com](mailto:jane@x.com)\n## Experience\n- **Led** _team_ of 5\n";
        let blocks = classify(input);
        for block in &blocks {
            let text = block.text();
            assert!(!text.contains("**"), "raw bold in {text:?}");
            assert!(!text.contains("]("), "raw link in {text:?}");
        }
    }
}
