//! Fixed visual attributes per block kind.
//!
//! Built once at startup and read-only afterward; the renderer looks styles up
//! by the block's kind, which doubles as its style tag.

use crate::formatter::blocks::BlockKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// Visual attributes for one block kind. Sizes and spacing are in points.
#[derive(Debug, Clone)]
pub struct BlockStyle {
    pub font_size_pt: f32,
    /// Baseline-to-baseline distance for wrapped lines.
    pub leading_pt: f32,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    /// RGB fill color, each component in 0.0..=1.0.
    pub color: (f32, f32, f32),
    pub alignment: Alignment,
    pub bold: bool,
    /// Section headers draw a horizontal rule under the text.
    pub rule_below: bool,
    pub indent_pt: f32,
}

/// The fixed style tag → attributes mapping.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    name: BlockStyle,
    contact: BlockStyle,
    section_header: BlockStyle,
    subsection_header: BlockStyle,
    bullet: BlockStyle,
    body: BlockStyle,
}

const INK: (f32, f32, f32) = (0.13, 0.13, 0.13);
const ACCENT: (f32, f32, f32) = (0.10, 0.21, 0.36);
const MUTED: (f32, f32, f32) = (0.38, 0.38, 0.38);

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            name: BlockStyle {
                font_size_pt: 20.0,
                leading_pt: 24.0,
                space_before_pt: 0.0,
                space_after_pt: 4.0,
                color: ACCENT,
                alignment: Alignment::Center,
                bold: true,
                rule_below: false,
                indent_pt: 0.0,
            },
            contact: BlockStyle {
                font_size_pt: 9.5,
                leading_pt: 12.0,
                space_before_pt: 0.0,
                space_after_pt: 2.0,
                color: MUTED,
                alignment: Alignment::Center,
                bold: false,
                rule_below: false,
                indent_pt: 0.0,
            },
            section_header: BlockStyle {
                font_size_pt: 12.5,
                leading_pt: 15.0,
                space_before_pt: 12.0,
                space_after_pt: 5.0,
                color: ACCENT,
                alignment: Alignment::Left,
                bold: true,
                rule_below: true,
                indent_pt: 0.0,
            },
            subsection_header: BlockStyle {
                font_size_pt: 11.0,
                leading_pt: 13.5,
                space_before_pt: 7.0,
                space_after_pt: 2.0,
                color: INK,
                alignment: Alignment::Left,
                bold: true,
                rule_below: false,
                indent_pt: 0.0,
            },
            bullet: BlockStyle {
                font_size_pt: 10.5,
                leading_pt: 13.0,
                space_before_pt: 1.0,
                space_after_pt: 1.0,
                color: INK,
                alignment: Alignment::Left,
                bold: false,
                rule_below: false,
                indent_pt: 14.0,
            },
            body: BlockStyle {
                font_size_pt: 10.5,
                leading_pt: 13.0,
                space_before_pt: 2.0,
                space_after_pt: 2.0,
                color: INK,
                alignment: Alignment::Left,
                bold: false,
                rule_below: false,
                indent_pt: 0.0,
            },
        }
    }
}

impl StyleSheet {
    pub fn get(&self, kind: BlockKind) -> &BlockStyle {
        match kind {
            BlockKind::Name => &self.name,
            BlockKind::Contact => &self.contact,
            BlockKind::SectionHeader => &self.section_header,
            BlockKind::SubsectionHeader => &self.subsection_header,
            BlockKind::Bullet => &self.bullet,
            BlockKind::Body => &self.body,
        }
    }
}
