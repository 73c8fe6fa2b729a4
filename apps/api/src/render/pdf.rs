//! PDF layout and serialization for a classified block sequence.
//!
//! Lays blocks onto US-letter pages (612 x 792 pt) with 50 pt margins, greedy
//! word-wrapping styled spans against the Helvetica metric tables, then writes
//! the document with `lopdf`: Type1 WinAnsi fonts, one uncompressed content
//! stream per page.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

use crate::formatter::blocks::DocumentBlock;
use crate::formatter::inline::{Emphasis, Span};
use crate::formatter::stylesheet::{Alignment, BlockStyle, StyleSheet};
use crate::render::metrics::metrics_for;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 50.0;
const USABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const RULE_GAP: f32 = 3.0;
const RULE_WIDTH: f32 = 0.75;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("PDF serialization failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A run of words sharing one face, pre-measured for positioning.
struct Fragment {
    text: String,
    bold: bool,
    italic: bool,
    width: f32,
}

/// One wrapped output line.
struct Line {
    fragments: Vec<Fragment>,
    width: f32,
}

fn font_name(bold: bool, italic: bool) -> &'static str {
    if bold {
        "F2"
    } else if italic {
        "F3"
    } else {
        "F1"
    }
}

/// Greedy word-wrap of a span sequence at `max_width` points, merging
/// consecutive same-face words into fragments.
fn wrap_spans(spans: &[Span], style: &BlockStyle, max_width: f32) -> Vec<Line> {
    // Block-level bold (name, headers) overrides span emphasis.
    let words: Vec<(&str, bool, bool)> = spans
        .iter()
        .flat_map(|span| {
            let bold = style.bold || span.emphasis == Emphasis::Bold;
            let italic = !bold && span.emphasis == Emphasis::Italic;
            span.text
                .split_whitespace()
                .map(move |w| (w, bold, italic))
        })
        .collect();

    let space_width = metrics_for(false).space_width * style.font_size_pt;
    let mut lines: Vec<Vec<(&str, bool, bool)>> = Vec::new();
    let mut current: Vec<(&str, bool, bool)> = Vec::new();
    let mut current_width = 0.0_f32;

    for (word, bold, italic) in words {
        let word_width = metrics_for(bold).measure_str(word, style.font_size_pt);
        if !current.is_empty() && current_width + space_width + word_width > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = word_width;
        } else {
            if !current.is_empty() {
                current_width += space_width;
            }
            current_width += word_width;
        }
        current.push((word, bold, italic));
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .map(|tokens| build_line(&tokens, style, space_width))
        .collect()
}

fn build_line(tokens: &[(&str, bool, bool)], style: &BlockStyle, space_width: f32) -> Line {
    let mut fragments: Vec<Fragment> = Vec::new();
    for &(word, bold, italic) in tokens {
        match fragments.last_mut() {
            Some(last) if last.bold == bold && last.italic == italic => {
                last.text.push(' ');
                last.text.push_str(word);
                last.width += space_width
                    + metrics_for(bold).measure_str(word, style.font_size_pt);
            }
            _ => fragments.push(Fragment {
                text: word.to_string(),
                bold,
                italic,
                width: metrics_for(bold).measure_str(word, style.font_size_pt),
            }),
        }
    }
    let width = fragments.iter().map(|f| f.width).sum::<f32>()
        + space_width * fragments.len().saturating_sub(1) as f32;
    Line { fragments, width }
}

/// Maps text to WinAnsi bytes. ASCII passes through; common punctuation from
/// the 0x80 window is mapped; everything else becomes '?'.
fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2026}' => 0x85, // ellipsis
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

fn push_line_ops(ops: &mut Vec<Operation>, line: &Line, style: &BlockStyle, y: f32) {
    let x_start = match style.alignment {
        Alignment::Left => MARGIN + style.indent_pt,
        Alignment::Center => MARGIN + ((USABLE_WIDTH - line.width) / 2.0).max(0.0),
    };
    let space_width = metrics_for(false).space_width * style.font_size_pt;
    let (r, g, b) = style.color;

    let mut x = x_start;
    for fragment in &line.fragments {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        ops.push(Operation::new(
            "Tf",
            vec![
                font_name(fragment.bold, fragment.italic).into(),
                style.font_size_pt.into(),
            ],
        ));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_winansi(&fragment.text),
                StringFormat::Literal,
            )],
        ));
        ops.push(Operation::new("ET", vec![]));
        x += fragment.width + space_width;
    }
}

fn push_rule_ops(ops: &mut Vec<Operation>, style: &BlockStyle, y: f32) {
    let (r, g, b) = style.color;
    ops.push(Operation::new("w", vec![RULE_WIDTH.into()]));
    ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new("m", vec![MARGIN.into(), y.into()]));
    ops.push(Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), y.into()]));
    ops.push(Operation::new("S", vec![]));
}

/// Lays out the block sequence and produces the final PDF bytes.
///
/// Pure function of blocks + stylesheet; the document is built fresh per call
/// and discarded once the bytes are returned.
pub fn render_pdf(blocks: &[DocumentBlock], styles: &StyleSheet) -> Result<Vec<u8>, RenderError> {
    let mut pages: Vec<Vec<Operation>> = Vec::new();
    let mut current: Vec<Operation> = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    for block in blocks {
        let style = styles.get(block.kind);
        let lines = wrap_spans(&block.spans, style, USABLE_WIDTH - style.indent_pt);
        if lines.is_empty() {
            continue;
        }

        if !current.is_empty() {
            y -= style.space_before_pt;
        }

        for line in &lines {
            if y - style.leading_pt < MARGIN {
                pages.push(std::mem::take(&mut current));
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= style.leading_pt;
            push_line_ops(&mut current, line, style, y);
        }

        if style.rule_below {
            push_rule_ops(&mut current, style, y - RULE_GAP);
            y -= RULE_GAP + 2.0;
        }
        y -= style.space_after_pt;
    }
    pages.push(current);

    write_document(pages)
}

/// Assembles the page tree and serializes the document.
fn write_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let oblique_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Oblique",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
            "F3" => oblique_id,
        },
    });

    let page_count = pages.len();
    let mut page_ids: Vec<Object> = Vec::with_capacity(page_count);
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids,
        "Count" => page_count as i64,
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}
